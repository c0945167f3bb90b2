use {
    ruint::Uint,
    subtle::{Choice, ConstantTimeEq},
};

/// Trait for Uint backends that can be used as exponents and scalars.
pub trait UintExp {
    /// Returns an upper bound for the highest bit set.
    /// Ideally this should not depend on the value.
    fn bit_len(&self) -> usize;

    /// Is the `index`th bit set in the binary expansion of `self`.
    fn bit_ct(&self, index: usize) -> Choice;
}

impl<const BITS: usize, const LIMBS: usize> UintExp for Uint<BITS, LIMBS> {
    fn bit_len(&self) -> usize {
        BITS
    }

    fn bit_ct(&self, index: usize) -> Choice {
        let limb = self.as_limbs()[index / 64];
        let bit = (limb >> (index % 64)) & 1;
        bit.ct_eq(&1)
    }
}
