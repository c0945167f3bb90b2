//! ECDSA signature verification implementation

use {
    super::{groups::EllipticCurvePoint, mod_ring::RingRefExt},
    anyhow::{anyhow, ensure, Result},
    der::{asn1::Uint as DerUint, Sequence},
    num_traits::Inv,
    ruint::Uint,
};

/// `ECDSA-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }` (RFC 5480 / X9.62).
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EcdsaSignature {
    pub r: DerUint,
    pub s: DerUint,
}

#[derive(Clone, Copy, Debug)]
pub struct EcdsaPublicKey<'a, 't, const BITS: usize, const LIMBS: usize> {
    point: EllipticCurvePoint<'a, Uint<BITS, LIMBS>>,
    table: Option<&'t [EllipticCurvePoint<'a, Uint<BITS, LIMBS>>]>,
}

impl<'a, 't, const BITS: usize, const LIMBS: usize> EcdsaPublicKey<'a, 't, BITS, LIMBS> {
    pub fn new(point: EllipticCurvePoint<'a, Uint<BITS, LIMBS>>) -> Result<Self> {
        ensure!(!point.is_infinity(), "Public key is the point at infinity");
        Ok(Self { point, table: None })
    }

    /// Use precomputed doublings of the public point, see
    /// [`EllipticCurvePoint::doubling_table`].
    pub fn with_table(mut self, table: &'t [EllipticCurvePoint<'a, Uint<BITS, LIMBS>>]) -> Self {
        assert!(table.len() >= BITS, "Multiplication table too short");
        assert_eq!(table[0], self.point);
        self.table = Some(table);
        self
    }

    /// Verify a signature over a message hash, per BSI TR-03111 4.2.1.2.
    pub fn verify(&self, message_hash: &[u8], signature: &EcdsaSignature) -> Result<()> {
        let curve = self.point.curve();
        let scalars = curve.scalar_field();
        let order = scalars.modulus();

        let r = to_uint::<BITS, LIMBS>(&signature.r)?;
        let s = to_uint::<BITS, LIMBS>(&signature.s)?;
        ensure!(r != Uint::ZERO && r < order, "r out of range");
        ensure!(s != Uint::ZERO && s < order, "s out of range");
        let e = hash_to_scalar(message_hash, order)?;

        // w = s^(-1) mod n
        let w = scalars
            .from(s)
            .inv()
            .ok_or_else(|| anyhow!("Invalid s value"))?;

        // u1 = e * w mod n
        let u1 = scalars.from(e) * w;
        // u2 = r * w mod n
        let u2 = scalars.from(r) * w;

        // Q = u1 * G + u2 * P
        let u2_p = match self.table {
            Some(table) => curve.mul_table(table, u2.to_uint()),
            None => self.point * u2,
        };
        let q = curve.generator() * u1 + u2_p;

        // Grab x of the Q point
        let x = q.x().ok_or_else(|| anyhow!("Verification point at infinity"))?;
        ensure!(x.to_uint() % order == r, "Invalid ECDSA signature");
        Ok(())
    }
}

fn to_uint<const BITS: usize, const LIMBS: usize>(value: &DerUint) -> Result<Uint<BITS, LIMBS>> {
    Uint::try_from_be_slice(value.as_bytes()).ok_or_else(|| anyhow!("Integer too large"))
}

/// Leftmost `bit_len(order)` bits of the hash, reduced modulo the order.
fn hash_to_scalar<const BITS: usize, const LIMBS: usize>(
    hash: &[u8],
    order: Uint<BITS, LIMBS>,
) -> Result<Uint<BITS, LIMBS>> {
    let order_bits = order.bit_len();
    let len = hash.len().min(order_bits.div_ceil(8));
    let mut e = Uint::<BITS, LIMBS>::try_from_be_slice(&hash[..len])
        .ok_or_else(|| anyhow!("Hash too large"))?;
    if len * 8 > order_bits {
        e >>= len * 8 - order_bits;
    }
    Ok(e % order)
}

#[cfg(test)]
pub(crate) mod tests {
    use {
        super::*,
        crate::crypto::{
            groups::named::{BRAINPOOL_P256R1, SECP384R1},
            mod_ring::ModRingElementRef,
        },
        hex_literal::hex,
        ruint::aliases::{U256, U384},
    };

    /// Textbook signing, only for producing test vectors.
    pub(crate) fn sign<'a, const BITS: usize, const LIMBS: usize>(
        private: ModRingElementRef<'a, Uint<BITS, LIMBS>>,
        nonce: ModRingElementRef<'a, Uint<BITS, LIMBS>>,
        generator: EllipticCurvePoint<'a, Uint<BITS, LIMBS>>,
        message_hash: &[u8],
    ) -> EcdsaSignature {
        let scalars = generator.curve().scalar_field();
        let order = scalars.modulus();
        let r = (generator * nonce).x().unwrap().to_uint() % order;
        let e = hash_to_scalar(message_hash, order).unwrap();
        let s = (scalars.from(e) + scalars.from(r) * private) * nonce.inv().unwrap();
        EcdsaSignature {
            r: DerUint::new(&r.to_be_bytes_vec()).unwrap(),
            s: DerUint::new(&s.to_uint().to_be_bytes_vec()).unwrap(),
        }
    }

    #[test]
    fn test_hash_to_scalar() {
        let order = U256::from(0xffff_u64);
        let hash = hex!("abcdef");
        // Only the leftmost 16 bits are used.
        assert_eq!(hash_to_scalar(&hash, order).unwrap(), U256::from(0xabcd_u64));
        let order = U256::from(0xfff1_u64);
        assert_eq!(hash_to_scalar(&hex!("fff5"), order).unwrap(), U256::from(4_u64));
    }

    #[test]
    fn test_verify() {
        let curve = &*BRAINPOOL_P256R1;
        let rng = &mut rand::thread_rng();
        let private = curve.scalar_field().random(rng);
        let public = curve.generator() * private;
        let hash = hex!("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08");
        let signature = sign(private, curve.scalar_field().random(rng), curve.generator(), &hash);

        let key = EcdsaPublicKey::new(public).unwrap();
        key.verify(&hash, &signature).unwrap();

        let table = public.doubling_table(256);
        key.with_table(&table).verify(&hash, &signature).unwrap();

        let mut other = hash;
        other[0] ^= 1;
        assert!(key.verify(&other, &signature).is_err());

        let swapped = EcdsaSignature {
            r: signature.s.clone(),
            s: signature.r.clone(),
        };
        assert!(key.verify(&hash, &swapped).is_err());
    }

    #[test]
    fn test_range_checks() {
        let curve = &*SECP384R1;
        let key = EcdsaPublicKey::new(curve.generator()).unwrap();
        let order: U384 = curve.scalar_field().modulus();
        let zero = EcdsaSignature {
            r: DerUint::new(&[0]).unwrap(),
            s: DerUint::new(&[1]).unwrap(),
        };
        assert!(key.verify(&[1; 48], &zero).is_err());
        let too_large = EcdsaSignature {
            r: DerUint::new(&order.to_be_bytes_vec()).unwrap(),
            s: DerUint::new(&[1]).unwrap(),
        };
        assert!(key.verify(&[1; 48], &too_large).is_err());
        assert!(EcdsaPublicKey::new(curve.infinity()).is_err());
    }
}
