#[cfg(test)]
use rand::Rng;
use {
    super::{ModRing, UintExp},
    ruint::{aliases::U64, Uint},
    std::fmt::Debug,
    subtle::{ConditionallySelectable, ConstantTimeEq},
};

/// Trait for Uint backends supporting Montgomery multiplication.
///
/// The only implemented backed is Ruint, but the code is cleaner
/// if we abstract this, otherwise we would have to pass along the
/// const-generic parameters everywhere.
pub trait UintMont:
    Sized
    + Copy
    + PartialEq
    + Eq
    + PartialOrd
    + Debug
    + Send
    + Sync
    + ConstantTimeEq
    + ConditionallySelectable
    + UintExp
{
    fn parameters_from_modulus(modulus: Self) -> ModRing<Self>;
    fn from_u64(value: u64) -> Self;
    #[cfg(test)]
    fn random<R: Rng + ?Sized>(rng: &mut R, max: Self) -> Self;
    fn add_mod(self, other: Self, modulus: Self) -> Self;
    fn sub_mod(self, other: Self, modulus: Self) -> Self;
    fn mul_redc(self, other: Self, modulus: Self, mod_inv: u64) -> Self;
    fn square_redc(self, modulus: Self, mod_inv: u64) -> Self;
    fn inv_mod(self, modulus: Self) -> Option<Self>;

    /// Exponent `e` such that `x^e` is a square root of any quadratic residue
    /// `x`, if the modulus admits one.
    ///
    /// Only primes `p = 3 mod 4` are supported, where `e = (p + 1) / 4`. This
    /// covers all the curves in [`crate::crypto::groups::named`].
    fn sqrt_exponent(modulus: Self) -> Option<Self>;
}

impl<const BITS: usize, const LIMBS: usize> UintMont for Uint<BITS, LIMBS> {
    fn parameters_from_modulus(modulus: Self) -> ModRing<Self> {
        let mod_inv = U64::wrapping_from(modulus)
            .inv_ring()
            .expect("Modulus not an odd positive integer.")
            .wrapping_neg()
            .to();

        // montgomery_r = 2^(64 * LIMBS), compute its square mod modulus.
        let mut montgomery_r2 = Self::ZERO;
        if Self::BITS > 32 {
            montgomery_r2.set_bit(32 * Self::LIMBS, true);
        } else {
            montgomery_r2 = Self::from((1_u64 << 32) % modulus.to::<u64>());
        }
        montgomery_r2 = montgomery_r2.mul_mod(montgomery_r2, modulus);
        montgomery_r2 = montgomery_r2.mul_mod(montgomery_r2, modulus);
        ModRing::from_parameters(modulus, montgomery_r2, mod_inv)
    }

    #[inline]
    fn from_u64(value: u64) -> Self {
        Self::from(value)
    }

    #[cfg(test)]
    fn random<R: Rng + ?Sized>(rng: &mut R, max: Self) -> Self {
        let leading_zeros = max.leading_zeros();
        loop {
            let mut value = rng.gen::<Self>();
            value >>= leading_zeros;
            if value <= max {
                return value;
            }
        }
    }

    #[inline]
    fn add_mod(self, other: Self, modulus: Self) -> Self {
        let (sum, carry) = self.overflowing_add(other);
        let (reduced, borrow) = sum.overflowing_sub(modulus);
        if carry | !borrow {
            reduced
        } else {
            sum
        }
    }

    #[inline]
    fn sub_mod(self, other: Self, modulus: Self) -> Self {
        let (result, borrow) = self.overflowing_sub(other);
        if borrow {
            result.wrapping_add(modulus)
        } else {
            result
        }
    }

    #[inline]
    fn mul_redc(self, other: Self, modulus: Self, mod_inv: u64) -> Self {
        Self::mul_redc(self, other, modulus, mod_inv)
    }

    #[inline]
    fn square_redc(self, modulus: Self, mod_inv: u64) -> Self {
        Self::mul_redc(self, self, modulus, mod_inv)
    }

    #[inline]
    fn inv_mod(self, modulus: Self) -> Option<Self> {
        Self::inv_mod(self, modulus)
    }

    fn sqrt_exponent(modulus: Self) -> Option<Self> {
        // (p + 1) / 4 = (p >> 2) + 1 for p = 3 mod 4, without overflowing.
        (modulus.bit(0) && modulus.bit(1)).then(|| (modulus >> 2) + Self::from(1_u64))
    }
}
