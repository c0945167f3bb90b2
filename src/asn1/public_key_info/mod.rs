//! Classification of X.509 subject public keys.

use {
    crate::{
        error::KeyAlgorithm,
        oid::{ID_EC_PUBLIC_KEY, ID_RSASSA_PSS, RSA_ENCRYPTION},
    },
    anyhow::{anyhow, bail, Context, Error, Result},
    der::{
        asn1::{ObjectIdentifier as Oid, Uint},
        Decode, Encode, Sequence, Tag, Tagged,
    },
    x509_cert::spki::SubjectPublicKeyInfoOwned,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubjectPublicKeyInfo {
    Rsa(RsaPublicKeyInfo),
    Ec(EcPublicKeyInfo),
    Unknown(Oid),
}

/// PKCS#1 `RSAPublicKey`.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RsaPublicKeyInfo {
    pub modulus:         Uint,
    pub public_exponent: Uint,
}

/// RFC 5480 public key on a named curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcPublicKeyInfo {
    pub named_curve: Oid,
    /// SEC1 encoded point.
    pub point:       Vec<u8>,
}

impl SubjectPublicKeyInfo {
    pub const fn algorithm_family(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::Ec(_) => KeyAlgorithm::EllipticCurve,
            Self::Unknown(oid) => KeyAlgorithm::Other(*oid),
        }
    }
}

impl TryFrom<&SubjectPublicKeyInfoOwned> for SubjectPublicKeyInfo {
    type Error = Error;

    fn try_from(info: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let key = info
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| anyhow!("Public key bit string has unused bits"))?;
        match info.algorithm.oid {
            RSA_ENCRYPTION | ID_RSASSA_PSS => Ok(Self::Rsa(
                RsaPublicKeyInfo::from_der(key).context("Invalid RSAPublicKey")?,
            )),
            ID_EC_PUBLIC_KEY => {
                let params = info
                    .algorithm
                    .parameters
                    .as_ref()
                    .ok_or_else(|| anyhow!("Missing EC parameters"))?;
                // RFC 5480 only allows namedCurve in certificates.
                if params.tag() != Tag::ObjectIdentifier {
                    bail!("Only named curves are supported, found {}", params.tag());
                }
                Ok(Self::Ec(EcPublicKeyInfo {
                    named_curve: Oid::from_der(&params.to_der()?)?,
                    point:       key.to_vec(),
                }))
            }
            oid => Ok(Self::Unknown(oid)),
        }
    }
}
