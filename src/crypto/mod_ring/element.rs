use {
    super::{uint_exp::UintExp, ModRing, RingRef, RingRefExt, UintMont},
    num_traits::Inv,
    std::{
        fmt::{self, Formatter},
        ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    },
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
};

/// Element of a [`ModRing`], stored in Montgomery form.
#[derive(Clone, Copy)]
pub struct ModRingElement<Ring: RingRef> {
    ring:  Ring,
    value: Ring::Uint,
}

/// ModRingElement with the ring parameters by embedded reference.
pub type ModRingElementRef<'a, Uint> = ModRingElement<&'a ModRing<Uint>>;

impl<Ring: RingRef> ModRingElement<Ring> {
    #[inline]
    #[must_use]
    pub const fn from_montgomery(ring: Ring, value: Ring::Uint) -> Self {
        Self { ring, value }
    }

    #[inline]
    #[must_use]
    pub fn ring(&self) -> &ModRing<Ring::Uint> {
        &self.ring
    }

    #[inline]
    #[must_use]
    pub const fn as_montgomery(self) -> Ring::Uint {
        self.value
    }

    // Note: We can not implement `From<Ring::Uint>` for `ModRingElement<Ring>`
    // because this conflicts with `impl T From<T> for T`.
    #[inline]
    #[must_use]
    pub fn to_uint(self) -> Ring::Uint {
        self.ring.mont_mul(self.value, Ring::Uint::from_u64(1))
    }

    #[inline]
    #[must_use]
    pub fn square(mut self) -> Self {
        self.value = self.ring.mont_square(self.value);
        self
    }

    /// Small exponentiation
    ///
    /// Run time may depend on the exponent, use [`Self::pow_ct`] if constant
    /// time or large exponents are required.
    #[inline]
    #[must_use]
    pub fn pow(self, exponent: usize) -> Self {
        match exponent {
            0 => self.ring.one(),
            1 => self,
            n if n % 2 == 0 => self.pow(n / 2).square(),
            n => self * self.pow(n / 2).square(),
        }
    }

    /// Constant-time exponentation with arbitrary unsigned int exponent.
    #[must_use]
    pub fn pow_ct<U: UintExp>(self, exponent: U) -> Self {
        let mut result = self.ring.one();
        let mut power = self;
        for i in 0..exponent.bit_len() {
            let product = result * power;
            result.conditional_assign(&product, exponent.bit_ct(i));
            power = power.square();
        }
        result
    }

    /// Square root, if `self` is a quadratic residue.
    ///
    /// Returns `None` for non-residues and for moduli other than primes
    /// `3 mod 4`. The other root is the negation of the returned one.
    #[must_use]
    pub fn sqrt(self) -> Option<Self> {
        let exponent = Ring::Uint::sqrt_exponent(self.ring.modulus())?;
        let root = self.pow_ct(exponent);
        (root.square() == self).then_some(root)
    }
}

macro_rules! forward_fmt {
    ($($trait:path),+) => {
        $(
            impl<Ring: RingRef> $trait for ModRingElement<Ring> where Ring::Uint: $trait {
                fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                    let uint = self.to_uint();
                    <Ring::Uint as $trait>::fmt(&uint, f)
                }
            }
        )+
    };
}

forward_fmt!(fmt::Debug, fmt::Display, fmt::LowerHex, fmt::UpperHex);

impl<Ring: RingRef> PartialEq for ModRingElement<Ring> {
    fn eq(&self, other: &Self) -> bool {
        assert_eq!(*self.ring, *other.ring);
        self.value.ct_eq(&other.value).into()
    }
}

impl<Ring: RingRef> Eq for ModRingElement<Ring> {}

impl<Ring: RingRef> Add for ModRingElement<Ring> {
    type Output = Self;

    #[inline(always)]
    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<Ring: RingRef> Sub for ModRingElement<Ring> {
    type Output = Self;

    #[inline(always)]
    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl<Ring: RingRef> Mul for ModRingElement<Ring> {
    type Output = Self;

    #[inline(always)]
    fn mul(mut self, other: Self) -> Self {
        self *= other;
        self
    }
}

impl<Ring: RingRef> Neg for ModRingElement<Ring> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.ring.zero() - self
    }
}

impl<Ring: RingRef> Inv for ModRingElement<Ring> {
    type Output = Option<Self>;

    fn inv(self) -> Self::Output {
        // value = a R, inv_mod gives a^-1 R^-1, two factors R short.
        let value = self.value.inv_mod(self.ring.modulus())?;
        let value = self.ring.mont_mul(value, self.ring.montgomery_r3());
        Some(self.ring.from_montgomery(value))
    }
}

impl<Ring: RingRef> Div for ModRingElement<Ring> {
    type Output = Option<Self>;

    /// Division
    ///
    /// Run time may depend on the value of the divisor.
    #[inline(always)]
    fn div(self, other: Self) -> Option<Self> {
        assert_eq!(self.ring(), other.ring());
        other.inv().map(|inv| self * inv)
    }
}

impl<Ring: RingRef> AddAssign for ModRingElement<Ring> {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        assert_eq!(self.ring(), other.ring());
        self.value = self.value.add_mod(other.value, self.ring.modulus());
    }
}

impl<Ring: RingRef> SubAssign for ModRingElement<Ring> {
    #[inline(always)]
    fn sub_assign(&mut self, other: Self) {
        assert_eq!(self.ring(), other.ring());
        self.value = self.value.sub_mod(other.value, self.ring.modulus());
    }
}

impl<Ring: RingRef> MulAssign for ModRingElement<Ring> {
    #[inline(always)]
    fn mul_assign(&mut self, other: Self) {
        assert_eq!(self.ring(), other.ring());
        self.value = self.ring.mont_mul(self.value, other.value);
    }
}

impl<Ring: RingRef> DivAssign for ModRingElement<Ring> {
    fn div_assign(&mut self, rhs: Self) {
        *self = self.div(rhs).expect("Division by non-invertible");
    }
}

impl<Ring: RingRef> ConditionallySelectable for ModRingElement<Ring> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        assert_eq!(a.ring(), b.ring());
        let value = Ring::Uint::conditional_select(&a.value, &b.value, choice);
        a.ring.from_montgomery(value)
    }
}

impl<Ring: RingRef> ConstantTimeEq for ModRingElement<Ring> {
    fn ct_eq(&self, other: &Self) -> Choice {
        assert_eq!(self.ring(), other.ring());
        self.value.ct_eq(&other.value)
    }
}
