use {
    crate::oid::{ID_SHA1, ID_SHA224, ID_SHA256, ID_SHA384, ID_SHA512},
    der::{
        asn1::{Null, ObjectIdentifier as Oid},
        Decode, DecodeValue, Encode, EncodeValue, Error, ErrorKind, Header, Length, Reader, Result,
        Sequence, Writer,
    },
    sha1::Sha1,
    sha2::{Digest, Sha224, Sha256, Sha384, Sha512},
};

/// Hash algorithm identifier.
///
/// RFC 5754 allows the parameters to be either absent or `NULL`, both are
/// seen in the wild, so which one was used is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DigestAlgorithmIdentifier {
    Sha1(Parameters),
    Sha224(Parameters),
    Sha256(Parameters),
    Sha384(Parameters),
    Sha512(Parameters),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Parameters {
    #[default]
    Absent,
    Null,
}

impl DigestAlgorithmIdentifier {
    pub fn from_oid(oid: Oid, parameters: Parameters) -> Option<Self> {
        Some(match oid {
            ID_SHA1 => Self::Sha1(parameters),
            ID_SHA224 => Self::Sha224(parameters),
            ID_SHA256 => Self::Sha256(parameters),
            ID_SHA384 => Self::Sha384(parameters),
            ID_SHA512 => Self::Sha512(parameters),
            _ => return None,
        })
    }

    pub const fn oid(&self) -> Oid {
        match self {
            Self::Sha1(_) => ID_SHA1,
            Self::Sha224(_) => ID_SHA224,
            Self::Sha256(_) => ID_SHA256,
            Self::Sha384(_) => ID_SHA384,
            Self::Sha512(_) => ID_SHA512,
        }
    }

    pub const fn parameters(&self) -> Parameters {
        match self {
            Self::Sha1(p) | Self::Sha224(p) | Self::Sha256(p) | Self::Sha384(p) | Self::Sha512(p) => {
                *p
            }
        }
    }

    /// Output size in bytes.
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha1(_) => 20,
            Self::Sha224(_) => 28,
            Self::Sha256(_) => 32,
            Self::Sha384(_) => 48,
            Self::Sha512(_) => 64,
        }
    }

    pub fn hash_bytes(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1(_) => Sha1::digest(data).to_vec(),
            Self::Sha224(_) => Sha224::digest(data).to_vec(),
            Self::Sha256(_) => Sha256::digest(data).to_vec(),
            Self::Sha384(_) => Sha384::digest(data).to_vec(),
            Self::Sha512(_) => Sha512::digest(data).to_vec(),
        }
    }
}

impl Sequence<'_> for DigestAlgorithmIdentifier {}

impl EncodeValue for DigestAlgorithmIdentifier {
    fn value_len(&self) -> Result<Length> {
        match self.parameters() {
            Parameters::Absent => self.oid().encoded_len(),
            Parameters::Null => self.oid().encoded_len()? + Null.encoded_len()?,
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> Result<()> {
        self.oid().encode(writer)?;
        match self.parameters() {
            Parameters::Absent => Ok(()),
            Parameters::Null => Null.encode(writer),
        }
    }
}

impl<'a> DecodeValue<'a> for DigestAlgorithmIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        reader.read_nested(header.length, |reader| {
            let oid = Oid::decode(reader)?;
            let parameters = match Option::<Null>::decode(reader)? {
                Some(Null) => Parameters::Null,
                None => Parameters::Absent,
            };
            Self::from_oid(oid, parameters)
                .ok_or_else(|| Error::new(ErrorKind::OidUnknown { oid }, Length::ZERO))
        })
    }
}
