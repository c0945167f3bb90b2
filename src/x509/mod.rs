//! The certificate facade.
//!
//! A [`Certificate`] holds one fully decoded X.509 certificate together with
//! the bytes it was parsed from. Everything that is mandatory in a certificate
//! is decoded and checked at construction, extensions are decoded on every
//! query. Missing or undecodable extensions make the predicates return
//! `false` (or `None`) instead of failing.

mod extensions;
mod identity;
mod name;

pub use self::{
    extensions::{ExtendedKeyUsage, KeyUsage},
    identity::{IdentifierInformation, IK_NUMBER_PATTERN, KVNR_PATTERN},
    name::NameKind,
};
use {
    crate::{
        asn1::{
            admission::AdmissionSyntax, public_key_info::SubjectPublicKeyInfo,
            qc_statement::QcStatements, SignatureAlgorithmIdentifier,
        },
        crypto::{signature::verify_signature, EcPublicKey},
        error::{Error, KeyAlgorithm, Result},
        oid::{
            ID_AD_OCSP, ID_CE_AUTHORITY_KEY_IDENTIFIER, ID_CE_BASIC_CONSTRAINTS,
            ID_CE_CERTIFICATE_POLICIES, ID_CE_EXT_KEY_USAGE, ID_CE_KEY_USAGE,
            ID_CE_SUBJECT_ALT_NAME, ID_CE_SUBJECT_KEY_IDENTIFIER, ID_ISISMTT_AT_ADMISSION,
            ID_PE_AUTHORITY_INFO_ACCESS, ID_PE_QC_STATEMENTS,
        },
    },
    anyhow::{anyhow, ensure, Context},
    base64::{engine::general_purpose::STANDARD, Engine},
    der::{
        asn1::{BitString, BitStringRef, ObjectIdentifier as Oid},
        pem::{self, LineEnding},
        AnyRef, Decode, Encode, Sequence,
    },
    regex::Regex,
    sha1::Sha1,
    sha2::{Digest, Sha256},
    std::{
        collections::HashMap,
        fmt::{self, Debug, Formatter},
        sync::Arc,
        time::SystemTime,
    },
    tracing::debug,
    x509_cert::{
        certificate::{Certificate as X509Certificate, TbsCertificate},
        ext::{
            pkix::{
                name::GeneralName, AuthorityInfoAccessSyntax, AuthorityKeyIdentifier,
                BasicConstraints, CertificatePolicies,
                ExtendedKeyUsage as ExtendedKeyUsageExtension, SubjectAltName,
                SubjectKeyIdentifier,
            },
            Extension,
        },
        name::Name,
    },
};

const PEM_LABEL: &str = "CERTIFICATE";

/// Which of the two signature verification paths a certificate's key needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningAlgorithm {
    /// Any RSA key.
    RsaPss,
    /// Everything else.
    EllipticCurve,
}

/// An immutable, parsed X.509 certificate.
///
/// Cloning is cheap and shares the decoded certificate.
#[derive(Clone)]
pub struct Certificate(Arc<Inner>);

struct Inner {
    der:         Vec<u8>,
    certificate: X509Certificate,
    public_key:  SubjectPublicKeyInfo,
    not_before:  SystemTime,
    not_after:   SystemTime,
}

/// The outer certificate structure with the signed part left encoded.
#[derive(Sequence)]
struct RawCertificate<'a> {
    tbs_certificate:     AnyRef<'a>,
    signature_algorithm: AnyRef<'a>,
    signature:           BitStringRef<'a>,
}

impl Certificate {
    /// Parses exactly one DER encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let certificate = X509Certificate::from_der(der).map_err(Error::parse)?;
        let tbs = &certificate.tbs_certificate;
        let public_key = SubjectPublicKeyInfo::try_from(&tbs.subject_public_key_info)
            .context("Invalid subject public key")
            .map_err(Error::Parse)?;
        let not_before = tbs.validity.not_before.to_system_time();
        let not_after = tbs.validity.not_after.to_system_time();
        Ok(Self(Arc::new(Inner {
            der: der.to_vec(),
            certificate,
            public_key,
            not_before,
            not_after,
        })))
    }

    /// Parses Base64 encoded DER. Whitespace, including line breaks, is
    /// ignored.
    pub fn from_base64(text: &str) -> Result<Self> {
        let compact = text
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>();
        let der = STANDARD.decode(compact).map_err(Error::parse)?;
        Self::from_der(&der)
    }

    /// Parses a single PEM block labeled `CERTIFICATE`.
    pub fn from_pem(text: &str) -> Result<Self> {
        let (label, der) = pem::decode_vec(text.trim().as_bytes())
            .map_err(|error| Error::parse(anyhow!("Invalid PEM: {error}")))?;
        if label != PEM_LABEL {
            return Err(Error::parse(anyhow!("Unexpected PEM label {label}")));
        }
        Self::from_der(&der)
    }

    /// The bytes the certificate was parsed from.
    pub fn to_der(&self) -> &[u8] {
        &self.0.der
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0.der)
    }

    pub fn to_pem(&self) -> Result<String> {
        pem::encode_string(PEM_LABEL, LineEnding::LF, &self.0.der)
            .map_err(|error| Error::Fail(anyhow!("PEM encoding failed: {error}")))
    }

    fn tbs(&self) -> &TbsCertificate {
        &self.0.certificate.tbs_certificate
    }

    fn extensions(&self) -> &[Extension] {
        self.tbs().extensions.as_deref().unwrap_or_default()
    }

    /// One line rendering of the subject, for display only.
    pub fn subject(&self) -> String {
        name::oneline(&self.tbs().subject)
    }

    /// One line rendering of the issuer, for display only.
    pub fn issuer(&self) -> String {
        name::oneline(&self.tbs().issuer)
    }

    pub fn not_before(&self) -> SystemTime {
        self.0.not_before
    }

    pub fn not_after(&self) -> SystemTime {
        self.0.not_after
    }

    /// Whether `at` lies within the validity period, both bounds inclusive.
    pub fn check_validity_period(&self, at: SystemTime) -> bool {
        self.0.not_before <= at && at <= self.0.not_after
    }

    pub fn is_ca_cert(&self) -> bool {
        extensions::decode::<BasicConstraints>(self.extensions(), ID_CE_BASIC_CONSTRAINTS)
            .is_some_and(|constraints| constraints.ca)
    }

    pub fn fingerprint_sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.0.der))
    }

    pub fn fingerprint_sha1_hex(&self) -> String {
        hex::encode(Sha1::digest(&self.0.der))
    }

    /// Upper case hex of the serial number without leading zero bytes.
    pub fn serial_number(&self) -> String {
        let bytes = self.tbs().serial_number.as_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        match &bytes[start..] {
            [] => "00".to_owned(),
            magnitude => hex::encode_upper(magnitude),
        }
    }

    /// Lower case hex, empty if the extension is absent.
    pub fn subject_key_identifier_hex(&self) -> String {
        extensions::decode::<SubjectKeyIdentifier>(self.extensions(), ID_CE_SUBJECT_KEY_IDENTIFIER)
            .map(|identifier| hex::encode(identifier.0.as_bytes()))
            .unwrap_or_default()
    }

    /// Lower case hex of the `keyIdentifier`, empty if absent.
    pub fn authority_key_identifier_hex(&self) -> String {
        extensions::decode::<AuthorityKeyIdentifier>(
            self.extensions(),
            ID_CE_AUTHORITY_KEY_IDENTIFIER,
        )
        .and_then(|identifier| identifier.key_identifier)
        .map(|identifier| hex::encode(identifier.as_bytes()))
        .unwrap_or_default()
    }

    /// Verifies the signature on this certificate with the public key of
    /// `issuer`. Every failure, including unsupported algorithms, is `false`.
    pub fn signature_is_valid_and_was_signed_by(&self, issuer: &Certificate) -> bool {
        match self.verify_signed_by(issuer) {
            Ok(()) => true,
            Err(error) => {
                debug!(
                    subject = %self.subject(),
                    issuer = %issuer.subject(),
                    "Certificate signature rejected: {error:#}"
                );
                false
            }
        }
    }

    fn verify_signed_by(&self, issuer: &Certificate) -> anyhow::Result<()> {
        let certificate = &self.0.certificate;
        ensure!(
            certificate.signature_algorithm == certificate.tbs_certificate.signature,
            "Signature algorithm differs from the one in the signed part"
        );
        let raw = RawCertificate::from_der(&self.0.der)?;
        let algorithm = SignatureAlgorithmIdentifier::try_from(&certificate.signature_algorithm)?;
        let signature = raw
            .signature
            .as_bytes()
            .ok_or_else(|| anyhow!("Signature bit string has unused bits"))?;
        verify_signature(
            &issuer.0.public_key,
            &algorithm,
            &raw.tbs_certificate.to_der()?,
            signature,
        )
    }

    pub fn get_signing_algorithm(&self) -> SigningAlgorithm {
        match self.0.public_key.algorithm_family() {
            KeyAlgorithm::Rsa => SigningAlgorithm::RsaPss,
            KeyAlgorithm::EllipticCurve | KeyAlgorithm::Other(_) => {
                SigningAlgorithm::EllipticCurve
            }
        }
    }

    /// The subject public key as elliptic curve key.
    ///
    /// Fails with [`Error::AlgorithmMismatch`] for keys that are not elliptic
    /// curve keys and [`Error::Construction`] for unsupported curves or
    /// invalid points.
    pub fn get_elliptic_curve_public_key(&self) -> Result<EcPublicKey> {
        match &self.0.public_key {
            SubjectPublicKeyInfo::Ec(info) => EcPublicKey::from_info(info),
            other => Err(Error::AlgorithmMismatch {
                expected: KeyAlgorithm::EllipticCurve,
                actual:   other.algorithm_family(),
            }),
        }
    }

    /// The decoded admission extension, `None` if absent or undecodable.
    pub fn admission_syntax(&self) -> Option<AdmissionSyntax> {
        extensions::decode(self.extensions(), ID_ISISMTT_AT_ADMISSION)
    }

    /// Registration number of the first profession info of the first
    /// admission. Absent and empty registration numbers are both `None`.
    pub fn get_telematik_id(&self) -> Option<String> {
        self.admission_syntax()
            .and_then(|syntax| identity::first_registration_number(&syntax))
    }

    /// Whether any profession info of any admission carries `telematik_id`.
    pub fn contains_telematik_id(&self, telematik_id: &str) -> bool {
        self.admission_syntax()
            .is_some_and(|syntax| identity::contains_registration_number(&syntax, telematik_id))
    }

    /// Whether any profession OID is one of `roles`.
    pub fn check_roles(&self, roles: &[Oid]) -> bool {
        self.admission_syntax()
            .is_some_and(|syntax| identity::has_any_role(&syntax, roles))
    }

    /// All profession OIDs in certificate order.
    pub fn roles(&self) -> Vec<Oid> {
        self.admission_syntax()
            .map(|syntax| identity::profession_oids(&syntax))
            .unwrap_or_default()
    }

    /// Whether the key usage extension is present and asserts every bit of
    /// `usages`.
    pub fn check_key_usage(&self, usages: &[KeyUsage]) -> bool {
        extensions::decode::<BitString>(self.extensions(), ID_CE_KEY_USAGE)
            .is_some_and(|bits| usages.iter().all(|usage| usage.is_set(&bits)))
    }

    /// Whether every purpose of `usages` is asserted. A certificate without
    /// extended key usage only satisfies the empty request.
    pub fn check_extended_key_usage(&self, usages: &[ExtendedKeyUsage]) -> bool {
        match extensions::decode::<ExtendedKeyUsageExtension>(
            self.extensions(),
            ID_CE_EXT_KEY_USAGE,
        ) {
            None => usages.is_empty(),
            Some(purposes) => usages
                .iter()
                .all(|usage| purposes.0.iter().any(|purpose| usage.matches(purpose))),
        }
    }

    pub fn certificate_policies(&self) -> Vec<Oid> {
        extensions::decode::<CertificatePolicies>(self.extensions(), ID_CE_CERTIFICATE_POLICIES)
            .map(|policies| {
                policies
                    .0
                    .iter()
                    .map(|policy| policy.policy_identifier)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the policy with dotted OID `policy` is asserted.
    pub fn check_certificate_policy(&self, policy: &str) -> bool {
        self.certificate_policies()
            .iter()
            .any(|oid| oid.to_string() == policy)
    }

    /// Whether a certificatePolicies extension is present and decodes, even
    /// if it lists no policy.
    pub fn has_certificate_policy(&self) -> bool {
        extensions::decode::<CertificatePolicies>(self.extensions(), ID_CE_CERTIFICATE_POLICIES)
            .is_some()
    }

    pub fn qc_statements(&self) -> Vec<Oid> {
        extensions::decode::<QcStatements>(self.extensions(), ID_PE_QC_STATEMENTS)
            .map(|statements| statements.iter().map(|s| s.statement_id).collect())
            .unwrap_or_default()
    }

    /// Whether the first QC statement has the dotted OID `statement`.
    pub fn check_qc_statement(&self, statement: &str) -> bool {
        self.qc_statements()
            .first()
            .is_some_and(|oid| oid.to_string() == statement)
    }

    /// Whether every critical extension is one of `allowed`.
    pub fn check_critical(&self, allowed: &[Oid]) -> bool {
        self.extensions()
            .iter()
            .filter(|extension| extension.critical)
            .all(|extension| {
                let known = allowed.contains(&extension.extn_id);
                if !known {
                    debug!(oid = %extension.extn_id, "Unexpected critical extension");
                }
                known
            })
    }

    /// URIs of all OCSP responders in the authority information access
    /// extension.
    pub fn ocsp_urls(&self) -> Vec<String> {
        let Some(access) = extensions::decode::<AuthorityInfoAccessSyntax>(
            self.extensions(),
            ID_PE_AUTHORITY_INFO_ACCESS,
        ) else {
            return Vec::new();
        };
        access
            .0
            .iter()
            .filter(|description| description.access_method == ID_AD_OCSP)
            .filter_map(|description| match &description.access_location {
                GeneralName::UniformResourceIdentifier(uri) => Some(uri.to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn subject_alternative_name_dns_names(&self) -> Vec<String> {
        let Some(names) =
            extensions::decode::<SubjectAltName>(self.extensions(), ID_CE_SUBJECT_ALT_NAME)
        else {
            return Vec::new();
        };
        names
            .0
            .iter()
            .filter_map(|name| match name {
                GeneralName::DnsName(dns) => Some(dns.to_string()),
                _ => None,
            })
            .filter(|dns| !dns.is_empty())
            .collect()
    }

    /// KVNR, IK number and names from the subject.
    pub fn identifier_information(&self) -> IdentifierInformation {
        IdentifierInformation::from_subject(&self.tbs().subject)
    }

    /// The first `serialNumber` attribute of the subject.
    pub fn serial_number_from_subject(&self) -> Option<String> {
        name::first_value(&self.tbs().subject, name::SERIAL_NUMBER)
    }

    pub fn distinguished_name_map_from_subject(&self) -> HashMap<String, Vec<String>> {
        name::to_map(&self.tbs().subject)
    }

    /// First value of `attribute` in the chosen name that matches `pattern`.
    pub fn find_first_matching(
        &self,
        which: NameKind,
        attribute: Oid,
        pattern: &Regex,
    ) -> Option<String> {
        let dn: &Name = match which {
            NameKind::Subject => &self.tbs().subject,
            NameKind::Issuer => &self.tbs().issuer,
        };
        name::find_first_matching(dn, attribute, pattern)
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.der == other.0.der
    }
}

impl Eq for Certificate {}

impl Debug for Certificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject())
            .field("issuer", &self.issuer())
            .field("serial_number", &self.serial_number())
            .finish()
    }
}
