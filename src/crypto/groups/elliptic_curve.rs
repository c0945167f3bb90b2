use {
    super::super::mod_ring::{ModRing, ModRingElementRef, RingRefExt, UintExp, UintMont},
    anyhow::{ensure, Result},
    std::{
        fmt::{self, Formatter},
        ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    },
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq},
};

/// Short Weierstrass curve `y^2 = x^3 + a x + b` over a prime field.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct EllipticCurve<U: UintMont> {
    base_field:      ModRing<U>,
    scalar_field:    ModRing<U>,
    a_monty:         U,
    b_monty:         U,
    cofactor:        U,
    generator_monty: (U, U),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EllipticCurvePoint<'a, U: UintMont> {
    curve:       &'a EllipticCurve<U>,
    coordinates: Coordinates<'a, U>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Coordinates<'a, U: UintMont> {
    Infinity,
    Affine(ModRingElementRef<'a, U>, ModRingElementRef<'a, U>),
}

impl<U: UintMont> EllipticCurve<U> {
    pub fn new(modulus: U, a: U, b: U, x: U, y: U, order: U, cofactor: U) -> Result<Self> {
        ensure!(a < modulus, "a not in field");
        ensure!(b < modulus, "b not in field");
        ensure!(x < modulus, "x not in field");
        ensure!(y < modulus, "y not in field");
        let base_field = ModRing::from_modulus(modulus);
        let scalar_field = ModRing::from_modulus(order);
        let a = base_field.from(a);
        let b = base_field.from(b);
        let x = base_field.from(x);
        let y = base_field.from(y);

        // Ensure non-singular
        let c4 = base_field.from_u64(4);
        let c27 = base_field.from_u64(27);
        ensure!(
            c4 * a.pow(3) + c27 * b.pow(2) != base_field.zero(),
            "Singular curve"
        );

        // Ensure not anomalous
        ensure!(modulus != order, "Anomalous curve");

        // Ensure generator is on curve
        ensure!(y.pow(2) == x.pow(3) + a * x + b, "Generator not on curve");

        let curve = Self {
            base_field,
            scalar_field,
            a_monty: a.as_montgomery(),
            b_monty: b.as_montgomery(),
            cofactor,
            generator_monty: (x.as_montgomery(), y.as_montgomery()),
        };

        // Ensure generator has order `order`
        let generator = curve.generator();
        ensure!(
            generator.mul_uint(order) == curve.infinity(),
            "Generator order mismatch"
        );

        Ok(curve)
    }

    pub const fn base_field(&self) -> &ModRing<U> {
        &self.base_field
    }

    pub const fn scalar_field(&self) -> &ModRing<U> {
        &self.scalar_field
    }

    pub fn a(&self) -> ModRingElementRef<'_, U> {
        self.base_field.from_montgomery(self.a_monty)
    }

    pub fn b(&self) -> ModRingElementRef<'_, U> {
        self.base_field.from_montgomery(self.b_monty)
    }

    pub const fn cofactor(&self) -> U {
        self.cofactor
    }

    pub fn generator(&self) -> EllipticCurvePoint<'_, U> {
        EllipticCurvePoint {
            curve:       self,
            coordinates: Coordinates::Affine(
                self.base_field.from_montgomery(self.generator_monty.0),
                self.base_field.from_montgomery(self.generator_monty.1),
            ),
        }
    }

    /// Point at infinity
    pub const fn infinity(&self) -> EllipticCurvePoint<'_, U> {
        EllipticCurvePoint {
            curve:       self,
            coordinates: Coordinates::Infinity,
        }
    }

    pub fn from_affine<'a>(
        &'a self,
        x: ModRingElementRef<'a, U>,
        y: ModRingElementRef<'a, U>,
    ) -> Result<EllipticCurvePoint<'a, U>> {
        self.ensure_valid(x, y)?;
        Ok(EllipticCurvePoint {
            curve:       self,
            coordinates: Coordinates::Affine(x, y),
        })
    }

    /// Returns a point with x-coordinate `x` if it exists.
    /// If a solution `p` exists, the other solution is `-p`.
    pub fn from_x<'a>(&'a self, x: ModRingElementRef<'a, U>) -> Option<EllipticCurvePoint<'a, U>> {
        assert_eq!(x.ring(), &self.base_field);
        let y2 = x.pow(3) + self.a() * x + self.b();
        let y = y2.sqrt()?;
        Some(EllipticCurvePoint {
            curve:       self,
            coordinates: Coordinates::Affine(x, y),
        })
    }

    /// Scalar multiplication using a table of doublings of the base point,
    /// see [`EllipticCurvePoint::doubling_table`].
    ///
    /// # Panics
    ///
    /// Panics if the table is shorter than the bit length of `scalar` or holds
    /// points of another curve.
    pub fn mul_table<'a, W: UintExp>(
        &'a self,
        table: &[EllipticCurvePoint<'a, U>],
        scalar: W,
    ) -> EllipticCurvePoint<'a, U> {
        assert!(table.len() >= scalar.bit_len(), "Multiplication table too short");
        let mut result = self.infinity();
        for (i, power) in table.iter().take(scalar.bit_len()).enumerate() {
            assert_eq!(power.curve, self);
            result.conditional_assign(&(result + *power), scalar.bit_ct(i));
        }
        result
    }

    fn ensure_valid<'a>(
        &'a self,
        x: ModRingElementRef<'a, U>,
        y: ModRingElementRef<'a, U>,
    ) -> Result<()> {
        ensure!(x.ring() == &self.base_field);
        ensure!(y.ring() == &self.base_field);

        // Check curve equation y^2 = x^3 + ax + b
        ensure!(
            y.pow(2) == x.pow(3) + self.a() * x + self.b(),
            "Point not on curve."
        );

        if self.cofactor() != U::from_u64(1) {
            let point = EllipticCurvePoint {
                curve:       self,
                coordinates: Coordinates::Affine(x, y),
            };
            ensure!(
                point.mul_uint(self.scalar_field().modulus()) == self.infinity(),
                "Point not in subgroup."
            );
        }
        Ok(())
    }
}

impl<'a, U: UintMont> EllipticCurvePoint<'a, U> {
    pub const fn curve(&self) -> &'a EllipticCurve<U> {
        self.curve
    }

    pub const fn is_infinity(&self) -> bool {
        matches!(self.coordinates, Coordinates::Infinity)
    }

    /// Affine coordinates, `None` for the point at infinity.
    pub const fn coordinates(&self) -> Option<(ModRingElementRef<'a, U>, ModRingElementRef<'a, U>)> {
        match self.coordinates {
            Coordinates::Infinity => None,
            Coordinates::Affine(x, y) => Some((x, y)),
        }
    }

    pub const fn x(&self) -> Option<ModRingElementRef<'a, U>> {
        match self.coordinates {
            Coordinates::Infinity => None,
            Coordinates::Affine(x, _) => Some(x),
        }
    }

    pub const fn y(&self) -> Option<ModRingElementRef<'a, U>> {
        match self.coordinates {
            Coordinates::Infinity => None,
            Coordinates::Affine(_, y) => Some(y),
        }
    }

    /// The points `2^i · self` for `i` in `0..bits`.
    pub fn doubling_table(self, bits: usize) -> Vec<Self> {
        let mut table = Vec::with_capacity(bits);
        let mut power = self;
        for _ in 0..bits {
            table.push(power);
            power += power;
        }
        table
    }

    pub(crate) fn mul_uint<W: UintExp>(mut self, scalar: W) -> Self {
        let mut result = self.curve.infinity();
        for i in 0..scalar.bit_len() {
            result.conditional_assign(&(result + self), scalar.bit_ct(i));
            self += self;
        }
        result
    }
}

macro_rules! forward_fmt {
    ($($trait:path),+) => {
        $(
            impl<'a, U: UintMont + $trait> $trait for EllipticCurvePoint<'a, U> {
                fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                    match self.coordinates {
                        Coordinates::Infinity => write!(f, "Infinity"),
                        Coordinates::Affine(x, y) => {
                            write!(f, "(")?;
                            <ModRingElementRef<'_, U> as $trait>::fmt(&x, f)?;
                            write!(f, ", ")?;
                            <ModRingElementRef<'_, U> as $trait>::fmt(&y, f)?;
                            write!(f, ")")
                        }
                    }
                }
            }
        )+
    };
}

forward_fmt!(fmt::Debug, fmt::Display, fmt::LowerHex, fmt::UpperHex);

impl<U: UintMont> Add for EllipticCurvePoint<'_, U> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        assert_eq!(self.curve, other.curve);
        match (self.coordinates, other.coordinates) {
            (Coordinates::Infinity, _) => other,
            (_, Coordinates::Infinity) => self,
            (Coordinates::Affine(x1, y1), Coordinates::Affine(x2, y2)) => {
                // https://hyperelliptic.org/EFD/g1p/auto-shortw.html
                let field = self.curve.base_field();
                let lambda = if x1 != x2 {
                    (y2 - y1) / (x2 - x1)
                } else if y1 == y2 {
                    // Point doubling
                    (field.from_u64(3) * x1.square() + self.curve.a()) / (field.from_u64(2) * y1)
                } else {
                    None
                };
                // Only P + (-P) has no slope, this includes doubling a point with y = 0.
                let Some(lambda) = lambda else {
                    return self.curve.infinity();
                };
                let x3 = lambda.square() - x1 - x2;
                let y3 = lambda * (x1 - x3) - y1;
                EllipticCurvePoint {
                    curve:       self.curve,
                    coordinates: Coordinates::Affine(x3, y3),
                }
            }
        }
    }
}

impl<U: UintMont> AddAssign for EllipticCurvePoint<'_, U> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<U: UintMont> Neg for EllipticCurvePoint<'_, U> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.coordinates {
            Coordinates::Infinity => self,
            Coordinates::Affine(x, y) => EllipticCurvePoint {
                curve:       self.curve,
                coordinates: Coordinates::Affine(x, -y),
            },
        }
    }
}

impl<U: UintMont> Sub for EllipticCurvePoint<'_, U> {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, other: Self) -> Self::Output {
        self + other.neg()
    }
}

impl<U: UintMont> SubAssign for EllipticCurvePoint<'_, U> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<'a, U: UintMont> Mul<ModRingElementRef<'a, U>> for EllipticCurvePoint<'a, U> {
    type Output = Self;

    fn mul(self, scalar: ModRingElementRef<'a, U>) -> Self::Output {
        assert_eq!(scalar.ring(), self.curve.scalar_field());
        self.mul_uint(scalar.to_uint())
    }
}

impl<'a, U: UintMont> MulAssign<ModRingElementRef<'a, U>> for EllipticCurvePoint<'a, U> {
    fn mul_assign(&mut self, scalar: ModRingElementRef<'a, U>) {
        *self = *self * scalar;
    }
}

/// Conditionally select an Elliptic Curve Point
///
/// Note: Points must have identical representation (Infinity / Affine) for
/// constant-time.
///
/// # Panics
///
/// Panics if the points are not on the same curve
impl<'a, U: UintMont> ConditionallySelectable for EllipticCurvePoint<'a, U> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        assert_eq!(a.curve, b.curve);
        use Coordinates::*;
        let coordinates = match (&a.coordinates, &b.coordinates) {
            (Infinity, Infinity) => Infinity,
            (Affine(ax, ay), Affine(bx, by)) => Affine(
                ModRingElementRef::<'a, U>::conditional_select(ax, bx, choice),
                ModRingElementRef::<'a, U>::conditional_select(ay, by, choice),
            ),
            (a, b) => {
                if bool::from(choice) {
                    *b
                } else {
                    *a
                }
            }
        };
        Self {
            curve: a.curve,
            coordinates,
        }
    }
}

/// Constant time coordinate equality check.
///
/// Warning: Only constant time in coordinates, not in Infinity / Affine cases
/// distinction.
///
/// # Panics
///
/// Panics if the points are not on the same curve
impl<U: UintMont> ConstantTimeEq for EllipticCurvePoint<'_, U> {
    fn ct_eq(&self, other: &Self) -> Choice {
        use Coordinates::*;
        assert_eq!(self.curve, other.curve);
        match (&self.coordinates, &other.coordinates) {
            (Infinity, Infinity) => Choice::from(1),
            (Affine(ax, ay), Affine(bx, by)) => ax.ct_eq(bx) & ay.ct_eq(by),
            _ => Choice::from(0),
        }
    }
}
