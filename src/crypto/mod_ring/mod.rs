//! Ring of integers modulo an odd number.

mod element;
mod ring;
mod ring_ref;
mod uint_exp;
mod uint_mont;

pub use self::{
    element::{ModRingElement, ModRingElementRef},
    ring::ModRing,
    ring_ref::{RingRef, RingRefExt},
    uint_exp::UintExp,
    uint_mont::UintMont,
};
