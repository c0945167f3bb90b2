use {
    super::{
        codec::{BsiTr031111Codec, BufCodecParent, BufMutCodec, Codec},
        ecdsa::{EcdsaPublicKey, EcdsaSignature},
        groups::{
            named::{
                BRAINPOOL_P256R1, BRAINPOOL_P384R1, BRAINPOOL_P512R1, SECP256R1, SECP384R1,
                SECP521R1,
            },
            EllipticCurve, EllipticCurvePoint,
        },
    },
    crate::{
        asn1::public_key_info::EcPublicKeyInfo,
        error::{Error, Result},
        oid,
    },
    anyhow::{anyhow, ensure},
    bytes::Buf,
    der::{asn1::ObjectIdentifier as Oid, Decode},
    once_cell::sync::OnceCell,
    ruint::Uint,
    std::fmt::{self, Debug, Display, Formatter},
    tracing::debug,
};

/// Named curves supported for certificate keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    BrainpoolP256r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl NamedCurve {
    pub const ALL: [Self; 6] = [
        Self::BrainpoolP256r1,
        Self::BrainpoolP384r1,
        Self::BrainpoolP512r1,
        Self::Secp256r1,
        Self::Secp384r1,
        Self::Secp521r1,
    ];

    pub fn from_oid(oid: Oid) -> Option<Self> {
        Self::ALL.into_iter().find(|curve| curve.oid() == oid)
    }

    pub const fn oid(self) -> Oid {
        match self {
            Self::BrainpoolP256r1 => oid::BRAINPOOL_P256R1,
            Self::BrainpoolP384r1 => oid::BRAINPOOL_P384R1,
            Self::BrainpoolP512r1 => oid::BRAINPOOL_P512R1,
            Self::Secp256r1 => oid::SECP256R1,
            Self::Secp384r1 => oid::SECP384R1,
            Self::Secp521r1 => oid::SECP521R1,
        }
    }

    /// Degree of the curve, the bit length of the field prime.
    pub const fn bits(self) -> usize {
        match self {
            Self::BrainpoolP256r1 | Self::Secp256r1 => 256,
            Self::BrainpoolP384r1 | Self::Secp384r1 => 384,
            Self::BrainpoolP512r1 => 512,
            Self::Secp521r1 => 521,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::BrainpoolP256r1 => "brainpoolP256r1",
            Self::BrainpoolP384r1 => "brainpoolP384r1",
            Self::BrainpoolP512r1 => "brainpoolP512r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
        }
    }
}

impl Display for NamedCurve {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elliptic curve public key on a named curve.
///
/// A constructed key always holds a valid, finite point of its curve. The key
/// does not borrow from the certificate it was taken from.
///
/// Scalar multiplications by the key can be accelerated with a table of
/// doublings, built at most once by [`Self::compute_multiplication_table`].
/// The table is guarded by a [`OnceCell`], so it is safe to trigger from any
/// thread while the key is shared.
#[derive(Clone)]
pub struct EcPublicKey {
    curve: NamedCurve,
    key:   Key,
}

#[derive(Clone)]
enum Key {
    U256(CurveKey<256, 4>),
    U384(CurveKey<384, 6>),
    U512(CurveKey<512, 8>),
    U521(CurveKey<521, 9>),
}

#[derive(Clone)]
struct CurveKey<const BITS: usize, const LIMBS: usize> {
    point: EllipticCurvePoint<'static, Uint<BITS, LIMBS>>,
    table: OnceCell<Vec<EllipticCurvePoint<'static, Uint<BITS, LIMBS>>>>,
}

macro_rules! with_key {
    ($key:expr, $k:ident => $body:expr) => {
        match $key {
            Key::U256($k) => $body,
            Key::U384($k) => $body,
            Key::U512($k) => $body,
            Key::U521($k) => $body,
        }
    };
}

macro_rules! impl_from_curve_key {
    ($($variant:ident: $bits:literal, $limbs:literal;)+) => {
        $(
            impl From<CurveKey<$bits, $limbs>> for Key {
                fn from(key: CurveKey<$bits, $limbs>) -> Self {
                    Self::$variant(key)
                }
            }
        )+
    };
}

impl_from_curve_key! {
    U256: 256, 4;
    U384: 384, 6;
    U512: 512, 8;
    U521: 521, 9;
}

impl EcPublicKey {
    /// Decodes a SEC1 / BSI TR-03111 encoded point on `curve`.
    ///
    /// Fails with [`Error::Construction`] if the encoding is malformed, the
    /// point is not on the curve, or it is the point at infinity.
    pub fn new(curve: NamedCurve, point: &[u8]) -> Result<Self> {
        let key = match curve {
            NamedCurve::BrainpoolP256r1 => {
                CurveKey::decode(&*BRAINPOOL_P256R1, point).map(Key::from)
            }
            NamedCurve::BrainpoolP384r1 => {
                CurveKey::decode(&*BRAINPOOL_P384R1, point).map(Key::from)
            }
            NamedCurve::BrainpoolP512r1 => {
                CurveKey::decode(&*BRAINPOOL_P512R1, point).map(Key::from)
            }
            NamedCurve::Secp256r1 => {
                CurveKey::decode(&*SECP256R1, point).map(Key::from)
            }
            NamedCurve::Secp384r1 => {
                CurveKey::decode(&*SECP384R1, point).map(Key::from)
            }
            NamedCurve::Secp521r1 => {
                CurveKey::decode(&*SECP521R1, point).map(Key::from)
            }
        }
        .map_err(|error| {
            debug!(%curve, %error, "Rejected elliptic curve public key");
            Error::construction(error.context(format!("Invalid point on {curve}")))
        })?;
        Ok(Self { curve, key })
    }

    pub(crate) fn from_info(info: &EcPublicKeyInfo) -> Result<Self> {
        let curve = NamedCurve::from_oid(info.named_curve).ok_or_else(|| {
            Error::construction(anyhow!("Unsupported named curve {}", info.named_curve))
        })?;
        Self::new(curve, &info.point)
    }

    pub const fn curve(&self) -> NamedCurve {
        self.curve
    }

    /// Always true, a constructed key always holds a point.
    pub const fn has_public_key(&self) -> bool {
        true
    }

    /// Size of a field element in bytes.
    pub const fn field_size_bytes(&self) -> usize {
        self.curve.bits().div_ceil(8)
    }

    /// Precompute doublings of the public point to speed up later scalar
    /// multiplications. Idempotent.
    pub fn compute_multiplication_table(&self) {
        with_key!(&self.key, key => {
            key.table();
        });
    }

    pub fn has_multiplication_table(&self) -> bool {
        with_key!(&self.key, key => key.table.get().is_some())
    }

    /// Compares the points of two keys.
    ///
    /// Keys on different curves can not be compared and give
    /// [`Error::CurveMismatch`]. `==` treats those as unequal.
    pub fn compare(&self, other: &Self) -> Result<bool> {
        if self.curve != other.curve {
            return Err(Error::CurveMismatch);
        }
        Ok(match (&self.key, &other.key) {
            (Key::U256(a), Key::U256(b)) => a.point == b.point,
            (Key::U384(a), Key::U384(b)) => a.point == b.point,
            (Key::U512(a), Key::U512(b)) => a.point == b.point,
            (Key::U521(a), Key::U521(b)) => a.point == b.point,
            _ => return Err(Error::CurveMismatch),
        })
    }

    /// SEC1 encoding of the point, `04 || x || y` or `02/03 || x`.
    pub fn to_sec1_bytes(&self, compressed: bool) -> Vec<u8> {
        with_key!(&self.key, key => key.encode(compressed))
    }

    /// Affine coordinates as big-endian field elements of
    /// [`Self::field_size_bytes`] each.
    pub fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        with_key!(&self.key, key => key.coordinates())
    }

    /// The key multiplied by a big-endian scalar, reduced modulo the group
    /// order. Uses the multiplication table if one was computed.
    pub fn multiply(&self, scalar: &[u8]) -> Result<Self> {
        let key = with_key!(&self.key, key => {
            Key::from(key.multiply(scalar).map_err(Error::construction)?)
        });
        Ok(Self {
            curve: self.curve,
            key,
        })
    }

    /// ECDSA verification of a DER `ECDSA-Sig-Value` over a message hash.
    pub fn verify_prehashed(&self, hash: &[u8], der_signature: &[u8]) -> bool {
        let result = EcdsaSignature::from_der(der_signature)
            .map_err(anyhow::Error::from)
            .and_then(|signature| self.verify(hash, &signature));
        match result {
            Ok(()) => true,
            Err(error) => {
                debug!(curve = %self.curve, %error, "ECDSA verification failed");
                false
            }
        }
    }

    pub(crate) fn verify(&self, hash: &[u8], signature: &EcdsaSignature) -> anyhow::Result<()> {
        with_key!(&self.key, key => key.verify(hash, signature))
    }
}

impl PartialEq for EcPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other).unwrap_or(false)
    }
}

impl Eq for EcPublicKey {}

impl Debug for EcPublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPublicKey")
            .field("curve", &self.curve)
            .field("point", &hex::encode(self.to_sec1_bytes(false)))
            .finish()
    }
}

impl<const BITS: usize, const LIMBS: usize> CurveKey<BITS, LIMBS> {
    fn new(point: EllipticCurvePoint<'static, Uint<BITS, LIMBS>>) -> Self {
        Self {
            point,
            table: OnceCell::new(),
        }
    }

    fn decode(
        curve: &'static EllipticCurve<Uint<BITS, LIMBS>>,
        bytes: &[u8],
    ) -> anyhow::Result<Self> {
        let mut buffer = bytes;
        let point: EllipticCurvePoint<'static, Uint<BITS, LIMBS>> =
            buffer.get_codec_parent(&BsiTr031111Codec::default(), curve)?;
        ensure!(!buffer.has_remaining(), "Trailing bytes after point");
        ensure!(!point.is_infinity(), "Point at infinity");
        Ok(Self::new(point))
    }

    fn curve(&self) -> &'static EllipticCurve<Uint<BITS, LIMBS>> {
        self.point.curve()
    }

    fn table(&self) -> &[EllipticCurvePoint<'static, Uint<BITS, LIMBS>>] {
        self.table.get_or_init(|| self.point.doubling_table(BITS))
    }

    fn encode(&self, compressed: bool) -> Vec<u8> {
        let codec = BsiTr031111Codec {
            compressed_points: compressed,
            ..Default::default()
        };
        let mut buffer = Vec::with_capacity(codec.encoded_size(self.point));
        buffer.put_codec(&codec, self.point);
        buffer
    }

    fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        let codec = BsiTr031111Codec::default();
        let mut x = Vec::new();
        let mut y = Vec::new();
        if let Some((px, py)) = self.point.coordinates() {
            x.put_codec(&codec, px);
            y.put_codec(&codec, py);
        }
        (x, y)
    }

    fn multiply(&self, scalar: &[u8]) -> anyhow::Result<Self> {
        let curve = self.curve();
        let order = curve.scalar_field().modulus();
        let scalar = Uint::<BITS, LIMBS>::try_from_be_slice(scalar)
            .ok_or_else(|| anyhow!("Scalar too large"))?
            % order;
        let product = match self.table.get() {
            Some(table) => curve.mul_table(table, scalar),
            None => self.point.mul_uint(scalar),
        };
        ensure!(!product.is_infinity(), "Product is the point at infinity");
        Ok(Self::new(product))
    }

    fn verify(&self, hash: &[u8], signature: &EcdsaSignature) -> anyhow::Result<()> {
        let key = EcdsaPublicKey::new(self.point)?;
        match self.table.get() {
            Some(table) => key.with_table(table).verify(hash, signature),
            None => key.verify(hash, signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    const P256_G: [u8; 65] = hex!(
        "04 6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296
            4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
    );
    const BP256_G: [u8; 65] = hex!(
        "04 8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262
            547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997"
    );

    #[test]
    fn test_construction() {
        let key = EcPublicKey::new(NamedCurve::Secp256r1, &P256_G).unwrap();
        assert!(key.has_public_key());
        assert_eq!(key.curve(), NamedCurve::Secp256r1);
        assert_eq!(key.field_size_bytes(), 32);
        assert_eq!(key.to_sec1_bytes(false), P256_G);
        assert_eq!(key.coordinates().0, P256_G[1..33]);
        assert_eq!(key.coordinates().1, P256_G[33..]);

        let compressed = key.to_sec1_bytes(true);
        assert_eq!(compressed[0], 0x03);
        let decompressed = EcPublicKey::new(NamedCurve::Secp256r1, &compressed).unwrap();
        assert_eq!(decompressed, key);
    }

    #[test]
    fn test_off_curve() {
        let mut bytes = P256_G;
        bytes[64] ^= 1;
        let error = EcPublicKey::new(NamedCurve::Secp256r1, &bytes).unwrap_err();
        assert!(matches!(error, Error::Construction(_)));

        // The P-256 generator is not on brainpoolP256r1.
        assert!(EcPublicKey::new(NamedCurve::BrainpoolP256r1, &P256_G).is_err());
        assert!(EcPublicKey::new(NamedCurve::Secp256r1, &[0]).is_err());
        assert!(EcPublicKey::new(NamedCurve::Secp256r1, &P256_G[..64]).is_err());
        let mut trailing = P256_G.to_vec();
        trailing.push(0);
        assert!(EcPublicKey::new(NamedCurve::Secp256r1, &trailing).is_err());
    }

    #[test]
    fn test_field_sizes() {
        let sizes = NamedCurve::ALL.map(|curve| curve.bits().div_ceil(8));
        assert_eq!(sizes, [32, 48, 64, 32, 48, 66]);
        for curve in NamedCurve::ALL {
            assert_eq!(NamedCurve::from_oid(curve.oid()), Some(curve));
        }
    }

    #[test]
    fn test_equality() {
        let a = EcPublicKey::new(NamedCurve::Secp256r1, &P256_G).unwrap();
        let b = EcPublicKey::new(NamedCurve::Secp256r1, &P256_G).unwrap();
        let doubled = a.multiply(&[2]).unwrap();
        assert_eq!(a, b);
        assert!(a.compare(&b).unwrap());
        assert_ne!(a, doubled);
        assert!(!a.compare(&doubled).unwrap());

        let other_curve = EcPublicKey::new(NamedCurve::BrainpoolP256r1, &BP256_G).unwrap();
        assert!(matches!(a.compare(&other_curve), Err(Error::CurveMismatch)));
        assert_ne!(a, other_curve);
    }

    #[test]
    fn test_multiplication_table() {
        let key = EcPublicKey::new(NamedCurve::BrainpoolP256r1, &BP256_G).unwrap();
        let scalar = hex!("7522 87f5 b02d e3c4 bc3e 1794 5118 c51b 23c9 7278 e4cd 7480 48ac 56ba 5bdc 3d46");
        let before = key.multiply(&scalar).unwrap();
        assert!(!key.has_multiplication_table());
        key.compute_multiplication_table();
        key.compute_multiplication_table();
        assert!(key.has_multiplication_table());
        let after = key.multiply(&scalar).unwrap();
        assert_eq!(before, after);
        assert_eq!(before.to_sec1_bytes(false), after.to_sec1_bytes(false));
        // BSI worked example, the generator times this scalar.
        assert_eq!(
            after.to_sec1_bytes(false),
            hex!(
                "04 3DD29BBE5907FD21A152ADA4895FAAE7ACC55F5E50EFBFDE5AB0C6EB54F198D6
                    15913635F0FDF5BEB383E00355F82D3C41ED0DF2E28363433DFB73856A15DC9F"
            )
        );
    }

    #[test]
    fn test_verify_prehashed() {
        use crate::crypto::{ecdsa::tests::sign, groups::named::SECP384R1, mod_ring::RingRefExt};
        use der::Encode;

        let curve = &*SECP384R1;
        let rng = &mut rand::thread_rng();
        let private = curve.scalar_field().random(rng);
        let point = curve.generator() * private;
        let mut sec1 = Vec::new();
        sec1.put_codec(&BsiTr031111Codec::default(), point);
        let key = EcPublicKey::new(NamedCurve::Secp384r1, &sec1).unwrap();

        let hash = [0x5a; 48];
        let signature = sign(private, curve.scalar_field().random(rng), curve.generator(), &hash);
        let der = signature.to_der().unwrap();
        assert!(key.verify_prehashed(&hash, &der));
        key.compute_multiplication_table();
        assert!(key.verify_prehashed(&hash, &der));
        assert!(!key.verify_prehashed(&[0x5b; 48], &der));
        assert!(!key.verify_prehashed(&hash, &der[..der.len() - 1]));
    }
}
