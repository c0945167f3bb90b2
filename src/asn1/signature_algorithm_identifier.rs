use {
    super::{AnyAlgorithmIdentifier, DigestAlgorithmIdentifier, DigestAlgorithmParameters},
    crate::oid::{
        ECDSA_WITH_SHA1, ECDSA_WITH_SHA224, ECDSA_WITH_SHA256, ECDSA_WITH_SHA384,
        ECDSA_WITH_SHA512, ID_MGF1, ID_RSASSA_PSS, SHA1_WITH_RSA_ENCRYPTION,
        SHA224_WITH_RSA_ENCRYPTION, SHA256_WITH_RSA_ENCRYPTION, SHA384_WITH_RSA_ENCRYPTION,
        SHA512_WITH_RSA_ENCRYPTION,
    },
    der::{
        asn1::{Null, ObjectIdentifier as Oid},
        Any, Decode, DecodeValue, Encode, EncodeValue, Error, ErrorKind, Header, Length, Reader,
        Result, Sequence, Tag, Tagged, Writer,
    },
    x509_cert::spki::AlgorithmIdentifierOwned,
};

/// Signature algorithms found on X.509 certificates.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SignatureAlgorithmIdentifier {
    /// RSASSA-PKCS1-v1_5. The digest parameters record whether the
    /// signature algorithm carried an explicit `NULL`.
    RsaPkcs1(DigestAlgorithmIdentifier),
    RsaPss(RsaSsaPssParameters),
    /// ECDSA. The digest parameters record whether the signature algorithm
    /// carried an explicit `NULL`.
    Ecdsa(DigestAlgorithmIdentifier),
    Unknown(AnyAlgorithmIdentifier),
}

// RFC 4055 3.1:
// RSASSA-PSS-params  ::=  SEQUENCE  {
//     hashAlgorithm      [0] HashAlgorithm DEFAULT
//                               sha1Identifier,
//     maskGenAlgorithm   [1] MaskGenAlgorithm DEFAULT
//                               mgf1SHA1Identifier,
//     saltLength         [2] INTEGER DEFAULT 20,
//     trailerField       [3] INTEGER DEFAULT 1
//  }
#[derive(Clone, Debug, Default, Eq, PartialEq, Sequence)]
pub struct RsaSsaPssParameters {
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub hash_algorithm:     Option<DigestAlgorithmIdentifier>,
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    pub mask_gen_algorithm: Option<MaskGenAlgorithm>,
    #[asn1(context_specific = "2", tag_mode = "EXPLICIT", optional = "true")]
    pub salt_length:        Option<u64>,
    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", optional = "true")]
    pub trailer_field:      Option<u64>,
}

/// Mask generation function, only MGF1 is defined.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct MaskGenAlgorithm {
    pub algorithm:  Oid,
    pub parameters: DigestAlgorithmIdentifier,
}

const SHA1: DigestAlgorithmIdentifier =
    DigestAlgorithmIdentifier::Sha1(DigestAlgorithmParameters::Null);

impl RsaSsaPssParameters {
    pub fn hash_algorithm(&self) -> DigestAlgorithmIdentifier {
        self.hash_algorithm.unwrap_or(SHA1)
    }

    /// Hash used by MGF1.
    pub fn mask_gen_hash(&self) -> Result<DigestAlgorithmIdentifier> {
        match &self.mask_gen_algorithm {
            None => Ok(SHA1),
            Some(mgf) if mgf.algorithm == ID_MGF1 => Ok(mgf.parameters),
            Some(mgf) => Err(Error::new(
                ErrorKind::OidUnknown { oid: mgf.algorithm },
                Length::ZERO,
            )),
        }
    }

    pub fn salt_length(&self) -> u64 {
        self.salt_length.unwrap_or(20)
    }

    pub fn trailer_field(&self) -> u64 {
        self.trailer_field.unwrap_or(1)
    }
}

impl SignatureAlgorithmIdentifier {
    fn rsa_pkcs1_oid(digest: &DigestAlgorithmIdentifier) -> Oid {
        match digest {
            DigestAlgorithmIdentifier::Sha1(_) => SHA1_WITH_RSA_ENCRYPTION,
            DigestAlgorithmIdentifier::Sha224(_) => SHA224_WITH_RSA_ENCRYPTION,
            DigestAlgorithmIdentifier::Sha256(_) => SHA256_WITH_RSA_ENCRYPTION,
            DigestAlgorithmIdentifier::Sha384(_) => SHA384_WITH_RSA_ENCRYPTION,
            DigestAlgorithmIdentifier::Sha512(_) => SHA512_WITH_RSA_ENCRYPTION,
        }
    }

    fn ecdsa_oid(digest: &DigestAlgorithmIdentifier) -> Oid {
        match digest {
            DigestAlgorithmIdentifier::Sha1(_) => ECDSA_WITH_SHA1,
            DigestAlgorithmIdentifier::Sha224(_) => ECDSA_WITH_SHA224,
            DigestAlgorithmIdentifier::Sha256(_) => ECDSA_WITH_SHA256,
            DigestAlgorithmIdentifier::Sha384(_) => ECDSA_WITH_SHA384,
            DigestAlgorithmIdentifier::Sha512(_) => ECDSA_WITH_SHA512,
        }
    }

    pub fn oid(&self) -> Oid {
        match self {
            Self::RsaPkcs1(digest) => Self::rsa_pkcs1_oid(digest),
            Self::RsaPss(_) => ID_RSASSA_PSS,
            Self::Ecdsa(digest) => Self::ecdsa_oid(digest),
            Self::Unknown(any) => any.algorithm,
        }
    }
}

impl TryFrom<&AlgorithmIdentifierOwned> for SignatureAlgorithmIdentifier {
    type Error = Error;

    fn try_from(value: &AlgorithmIdentifierOwned) -> Result<Self> {
        Self::from_der(&value.to_der()?)
    }
}

impl Sequence<'_> for SignatureAlgorithmIdentifier {}

impl EncodeValue for SignatureAlgorithmIdentifier {
    fn value_len(&self) -> Result<Length> {
        match self {
            Self::RsaPkcs1(digest) | Self::Ecdsa(digest) => match digest.parameters() {
                DigestAlgorithmParameters::Absent => self.oid().encoded_len(),
                DigestAlgorithmParameters::Null => {
                    self.oid().encoded_len()? + Null.encoded_len()?
                }
            },
            Self::RsaPss(params) => ID_RSASSA_PSS.encoded_len()? + params.encoded_len()?,
            Self::Unknown(any) => any.value_len(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> Result<()> {
        match self {
            Self::RsaPkcs1(digest) | Self::Ecdsa(digest) => {
                self.oid().encode(writer)?;
                match digest.parameters() {
                    DigestAlgorithmParameters::Absent => Ok(()),
                    DigestAlgorithmParameters::Null => Null.encode(writer),
                }
            }
            Self::RsaPss(params) => {
                ID_RSASSA_PSS.encode(writer)?;
                params.encode(writer)
            }
            Self::Unknown(any) => any.encode_value(writer),
        }
    }
}

impl<'a> DecodeValue<'a> for SignatureAlgorithmIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        reader.read_nested(header.length, |reader| {
            let oid = Oid::decode(reader)?;
            if oid == ID_RSASSA_PSS {
                return Ok(Self::RsaPss(RsaSsaPssParameters::decode(reader)?));
            }
            let parameters = Option::<Any>::decode(reader)?;
            let digest_parameters = match &parameters {
                None => Some(DigestAlgorithmParameters::Absent),
                Some(any) if any.tag() == Tag::Null && any.value().is_empty() => {
                    Some(DigestAlgorithmParameters::Null)
                }
                Some(_) => None,
            };
            let digest = |variant: fn(DigestAlgorithmParameters) -> DigestAlgorithmIdentifier| {
                digest_parameters.map(variant)
            };
            let known = match oid {
                SHA1_WITH_RSA_ENCRYPTION => digest(DigestAlgorithmIdentifier::Sha1).map(Self::RsaPkcs1),
                SHA224_WITH_RSA_ENCRYPTION => {
                    digest(DigestAlgorithmIdentifier::Sha224).map(Self::RsaPkcs1)
                }
                SHA256_WITH_RSA_ENCRYPTION => {
                    digest(DigestAlgorithmIdentifier::Sha256).map(Self::RsaPkcs1)
                }
                SHA384_WITH_RSA_ENCRYPTION => {
                    digest(DigestAlgorithmIdentifier::Sha384).map(Self::RsaPkcs1)
                }
                SHA512_WITH_RSA_ENCRYPTION => {
                    digest(DigestAlgorithmIdentifier::Sha512).map(Self::RsaPkcs1)
                }
                ECDSA_WITH_SHA1 => digest(DigestAlgorithmIdentifier::Sha1).map(Self::Ecdsa),
                ECDSA_WITH_SHA224 => digest(DigestAlgorithmIdentifier::Sha224).map(Self::Ecdsa),
                ECDSA_WITH_SHA256 => digest(DigestAlgorithmIdentifier::Sha256).map(Self::Ecdsa),
                ECDSA_WITH_SHA384 => digest(DigestAlgorithmIdentifier::Sha384).map(Self::Ecdsa),
                ECDSA_WITH_SHA512 => digest(DigestAlgorithmIdentifier::Sha512).map(Self::Ecdsa),
                _ => None,
            };
            Ok(known.unwrap_or(Self::Unknown(AnyAlgorithmIdentifier {
                algorithm: oid,
                parameters,
            })))
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn test_rsa_pkcs1() {
        let der = hex!("300d 0609 2a864886f70d01010b 0500");
        let algo = SignatureAlgorithmIdentifier::from_der(&der).unwrap();
        assert_eq!(
            algo,
            SignatureAlgorithmIdentifier::RsaPkcs1(DigestAlgorithmIdentifier::Sha256(
                DigestAlgorithmParameters::Null
            ))
        );
        assert_eq!(algo.to_der().unwrap(), der);
    }

    #[test]
    fn test_ecdsa() {
        let der = hex!("300a 0608 2a8648ce3d040302");
        let algo = SignatureAlgorithmIdentifier::from_der(&der).unwrap();
        assert_eq!(
            algo,
            SignatureAlgorithmIdentifier::Ecdsa(DigestAlgorithmIdentifier::Sha256(
                DigestAlgorithmParameters::Absent
            ))
        );
        assert_eq!(algo.to_der().unwrap(), der);
    }

    #[test]
    fn test_rsa_pss_sha256() {
        // SHA-256, MGF1 with SHA-256, salt length 32
        let der = hex!(
            "3041 0609 2a864886f70d01010a 3034
             a00f 300d 0609 608648016503040201 0500
             a11c 301a 0609 2a864886f70d010108 300d 0609 608648016503040201 0500
             a203 0201 20"
        );
        let algo = SignatureAlgorithmIdentifier::from_der(&der).unwrap();
        let SignatureAlgorithmIdentifier::RsaPss(params) = &algo else {
            panic!("expected RSASSA-PSS, got {algo:?}");
        };
        assert_eq!(
            params.hash_algorithm(),
            DigestAlgorithmIdentifier::Sha256(DigestAlgorithmParameters::Null)
        );
        assert_eq!(
            params.mask_gen_hash().unwrap(),
            DigestAlgorithmIdentifier::Sha256(DigestAlgorithmParameters::Null)
        );
        assert_eq!(params.salt_length(), 32);
        assert_eq!(params.trailer_field(), 1);
        assert_eq!(algo.to_der().unwrap(), der);
    }

    #[test]
    fn test_rsa_pss_defaults() {
        let der = hex!("300d 0609 2a864886f70d01010a 3000");
        let SignatureAlgorithmIdentifier::RsaPss(params) =
            SignatureAlgorithmIdentifier::from_der(&der).unwrap()
        else {
            panic!("expected RSASSA-PSS");
        };
        assert_eq!(params, RsaSsaPssParameters::default());
        assert!(matches!(
            params.hash_algorithm(),
            DigestAlgorithmIdentifier::Sha1(_)
        ));
        assert_eq!(params.salt_length(), 20);
    }

    #[test]
    fn test_unknown() {
        // md5WithRSAEncryption
        let der = hex!("300d 0609 2a864886f70d010104 0500");
        let algo = SignatureAlgorithmIdentifier::from_der(&der).unwrap();
        assert!(matches!(algo, SignatureAlgorithmIdentifier::Unknown(_)));
        assert_eq!(algo.to_der().unwrap(), der);
    }
}
