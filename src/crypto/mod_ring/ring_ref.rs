#[cfg(test)]
use rand::Rng;
use {
    super::{ModRing, ModRingElement, UintMont},
    std::ops::Deref,
};

/// Trait for ModRing parameter references.
///
/// Elements carry a `RingRef` rather than a copy of the ring parameters. The
/// only implementation is a plain reference, which lets curve points borrow
/// the base field of a process wide named curve.
pub trait RingRef: Copy + Deref<Target = ModRing<Self::Uint>> {
    type Uint: UintMont;
}

#[allow(clippy::wrong_self_convention)]
pub trait RingRefExt: RingRef {
    fn from_montgomery(self, value: Self::Uint) -> ModRingElement<Self>;
    fn zero(self) -> ModRingElement<Self>;
    fn one(self) -> ModRingElement<Self>;
    fn from_u64(self, value: u64) -> ModRingElement<Self>;
    fn from<T: Into<Self::Uint>>(self, value: T) -> ModRingElement<Self>;
    /// Uniformly random element, for tests.
    #[cfg(test)]
    fn random<R: Rng + ?Sized>(self, rng: &mut R) -> ModRingElement<Self>;
}

impl<Uint: UintMont> RingRef for &ModRing<Uint> {
    type Uint = Uint;
}

impl<Ring: RingRef> RingRefExt for Ring {
    #[inline(always)]
    fn from_montgomery(self, value: Ring::Uint) -> ModRingElement<Self> {
        debug_assert!(value < self.modulus());
        ModRingElement::from_montgomery(self, value)
    }

    #[inline(always)]
    fn from_u64(self, value: u64) -> ModRingElement<Self> {
        self.from(Ring::Uint::from_u64(value))
    }

    /// # Panics
    ///
    /// Panics if `value` is not reduced.
    fn from<T: Into<Self::Uint>>(self, value: T) -> ModRingElement<Self> {
        let value = value.into();
        assert!(value < self.modulus());
        let value = self.mont_mul(value, self.montgomery_r2());
        self.from_montgomery(value)
    }

    #[inline(always)]
    fn zero(self) -> ModRingElement<Self> {
        self.from_montgomery(Ring::Uint::from_u64(0))
    }

    #[inline(always)]
    fn one(self) -> ModRingElement<Self> {
        self.from_montgomery(self.montgomery_r())
    }

    #[cfg(test)]
    fn random<R: Rng + ?Sized>(self, rng: &mut R) -> ModRingElement<Self> {
        self.from_montgomery(Ring::Uint::random(rng, self.modulus()))
    }
}
