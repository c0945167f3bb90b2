//! Elliptic curve groups over prime fields.

mod elliptic_curve;
pub mod named;

pub use self::elliptic_curve::{EllipticCurve, EllipticCurvePoint};
