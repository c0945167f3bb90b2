//! Implements the required cryptography.
//!
//! Verification only: elliptic curve arithmetic per BSI TR-03111, ECDSA and
//! RSA (PKCS#1 v1.5 and PSS) signature checks.

pub mod codec;
mod ec_public_key;
pub mod ecdsa;
pub mod groups;
pub mod mod_ring;
pub mod rsa;
pub mod signature;

pub use self::ec_public_key::{EcPublicKey, NamedCurve};
