//! Common PKI admission syntax (`id-isismtt-at-admission`, 1.3.36.8.3.3).
//!
//! The layout follows the one found in deployed gematik certificates, which is
//! also the one OpenSSL implements:
//!
//! ```text
//! AdmissionSyntax ::= SEQUENCE {
//!     admissionAuthority      GeneralName OPTIONAL,
//!     contentsOfAdmissions    SEQUENCE OF Admissions }
//!
//! Admissions ::= SEQUENCE {
//!     admissionAuthority  [0] EXPLICIT GeneralName OPTIONAL,
//!     namingAuthority     [1] EXPLICIT NamingAuthority OPTIONAL,
//!     professionInfos     SEQUENCE OF ProfessionInfo }
//!
//! ProfessionInfo ::= SEQUENCE {
//!     namingAuthority     [0] EXPLICIT NamingAuthority OPTIONAL,
//!     professionItems     SEQUENCE OF DirectoryString,
//!     professionOIDs      SEQUENCE OF OBJECT IDENTIFIER OPTIONAL,
//!     registrationNumber  PrintableString OPTIONAL,
//!     addProfessionInfo   OCTET STRING OPTIONAL }
//! ```

use {
    super::DirectoryString,
    der::{
        asn1::{
            ContextSpecificRef, Ia5String, ObjectIdentifier as Oid, OctetString, PrintableString,
        },
        Any, Decode, DecodeOwned, DecodeValue, Encode, EncodeValue, Header, Length, Reader,
        Sequence, Tag, TagMode, TagNumber, Tagged, Writer,
    },
    tracing::debug,
    x509_cert::ext::pkix::name::GeneralName,
};

#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct AdmissionSyntax {
    pub admission_authority:    Option<GeneralName>,
    pub contents_of_admissions: Vec<Admissions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct Admissions {
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub admission_authority: Option<GeneralName>,
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    pub naming_authority:    Option<NamingAuthority>,
    pub profession_infos:    Vec<ProfessionInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Sequence)]
pub struct NamingAuthority {
    pub naming_authority_id:   Option<Oid>,
    pub naming_authority_url:  Option<Ia5String>,
    pub naming_authority_text: Option<DirectoryString>,
}

/// A single profession entry.
///
/// Decoding is lenient per field: a field that is present but can not be
/// read is treated as absent, so one malformed registration number does not
/// hide the profession OIDs next to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfessionInfo {
    pub naming_authority:    Option<NamingAuthority>,
    pub profession_items:    Vec<DirectoryString>,
    pub profession_oids:     Option<Vec<Oid>>,
    pub registration_number: Option<String>,
    pub add_profession_info: Option<OctetString>,
}

const NAMING_AUTHORITY_TAG: TagNumber = TagNumber::N0;

impl AdmissionSyntax {
    /// Iterates over every profession info of every admission, in order.
    pub fn profession_infos(&self) -> impl Iterator<Item = &ProfessionInfo> {
        self.contents_of_admissions
            .iter()
            .flat_map(|admissions| admissions.profession_infos.iter())
    }
}

impl ProfessionInfo {
    pub fn profession_oids(&self) -> &[Oid] {
        self.profession_oids.as_deref().unwrap_or_default()
    }

    fn naming_authority_tagged(&self) -> Option<ContextSpecificRef<'_, NamingAuthority>> {
        self.naming_authority
            .as_ref()
            .map(|value| ContextSpecificRef {
                tag_number: NAMING_AUTHORITY_TAG,
                tag_mode: TagMode::Explicit,
                value,
            })
    }

    fn registration_number_encoded(&self) -> der::Result<Option<PrintableString>> {
        self.registration_number
            .as_deref()
            .map(PrintableString::new)
            .transpose()
    }
}

impl Sequence<'_> for ProfessionInfo {}

impl EncodeValue for ProfessionInfo {
    fn value_len(&self) -> der::Result<Length> {
        self.naming_authority_tagged().encoded_len()?
            + self.profession_items.encoded_len()?
            + self.profession_oids.encoded_len()?
            + self.registration_number_encoded()?.encoded_len()?
            + self.add_profession_info.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.naming_authority_tagged().encode(writer)?;
        self.profession_items.encode(writer)?;
        self.profession_oids.encode(writer)?;
        self.registration_number_encoded()?.encode(writer)?;
        self.add_profession_info.encode(writer)
    }
}

impl<'a> DecodeValue<'a> for ProfessionInfo {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut info = Self::default();
            let mut sequences = 0;
            while !reader.is_finished() {
                let field = Any::decode(reader)?;
                match field.tag() {
                    Tag::ContextSpecific {
                        number,
                        constructed: true,
                    } if number == NAMING_AUTHORITY_TAG => {
                        info.naming_authority = lenient("namingAuthority", || {
                            NamingAuthority::from_der(field.value())
                        });
                    }
                    Tag::Sequence if sequences == 0 => {
                        sequences += 1;
                        info.profession_items =
                            lenient("professionItems", || reparse(&field)).unwrap_or_default();
                    }
                    Tag::Sequence if sequences == 1 => {
                        sequences += 1;
                        info.profession_oids = lenient("professionOIDs", || reparse(&field));
                    }
                    Tag::PrintableString => {
                        info.registration_number = lenient("registrationNumber", || {
                            reparse::<PrintableString>(&field)?;
                            String::from_utf8(field.value().to_vec())
                                .map_err(|_| Tag::PrintableString.value_error())
                        });
                    }
                    Tag::OctetString => {
                        info.add_profession_info =
                            lenient("addProfessionInfo", || reparse(&field));
                    }
                    tag => debug!("ignoring unexpected ProfessionInfo field with tag {tag}"),
                }
            }
            Ok(info)
        })
    }
}

fn reparse<T: DecodeOwned>(field: &Any) -> der::Result<T> {
    T::from_der(&field.to_der()?)
}

fn lenient<T>(field: &str, decode: impl FnOnce() -> der::Result<T>) -> Option<T> {
    decode()
        .map_err(|error| debug!("treating unreadable {field} as absent: {error}"))
        .ok()
}
