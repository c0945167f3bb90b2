//! Object identifiers used throughout the crate.
//!
//! Role and institution OIDs are from gemSpec_OID, tables Tab_PKI_402 and
//! Tab_PKI_403.

use der::asn1::ObjectIdentifier as Oid;

// Certificate extensions
pub const ID_CE_SUBJECT_KEY_IDENTIFIER: Oid = Oid::new_unwrap("2.5.29.14");
pub const ID_CE_KEY_USAGE: Oid = Oid::new_unwrap("2.5.29.15");
pub const ID_CE_SUBJECT_ALT_NAME: Oid = Oid::new_unwrap("2.5.29.17");
pub const ID_CE_BASIC_CONSTRAINTS: Oid = Oid::new_unwrap("2.5.29.19");
pub const ID_CE_CERTIFICATE_POLICIES: Oid = Oid::new_unwrap("2.5.29.32");
pub const ID_CE_AUTHORITY_KEY_IDENTIFIER: Oid = Oid::new_unwrap("2.5.29.35");
pub const ID_CE_EXT_KEY_USAGE: Oid = Oid::new_unwrap("2.5.29.37");
pub const ID_PE_AUTHORITY_INFO_ACCESS: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.1.1");
pub const ID_PE_QC_STATEMENTS: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.1.3");
pub const ID_AD_OCSP: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.48.1");

/// Common PKI (ISIS-MTT) admission extension.
pub const ID_ISISMTT_AT_ADMISSION: Oid = Oid::new_unwrap("1.3.36.8.3.3");

// Extended key usage purposes
pub const ID_KP_SERVER_AUTH: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.1");
pub const ID_KP_CLIENT_AUTH: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.2");
pub const ID_KP_CODE_SIGNING: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.3");
pub const ID_KP_EMAIL_PROTECTION: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.4");
pub const ID_KP_TIME_STAMPING: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.8");
pub const ID_KP_OCSP_SIGNING: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.9");
pub const ID_KP_DVCS: Oid = Oid::new_unwrap("1.3.6.1.5.5.7.3.10");
pub const ID_MS_SGC: Oid = Oid::new_unwrap("1.3.6.1.4.1.311.10.3.3");
pub const ID_NS_SGC: Oid = Oid::new_unwrap("2.16.840.1.113730.4.1");
pub const ANY_EXTENDED_KEY_USAGE: Oid = Oid::new_unwrap("2.5.29.37.0");

// Public key algorithms
pub const RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.1");
pub const ID_RSASSA_PSS: Oid = Oid::new_unwrap("1.2.840.113549.1.1.10");
pub const ID_EC_PUBLIC_KEY: Oid = Oid::new_unwrap("1.2.840.10045.2.1");

// Signature algorithms
pub const SHA1_WITH_RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA224_WITH_RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.14");
pub const SHA256_WITH_RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA_ENCRYPTION: Oid = Oid::new_unwrap("1.2.840.113549.1.1.13");
pub const ID_MGF1: Oid = Oid::new_unwrap("1.2.840.113549.1.1.8");
pub const ECDSA_WITH_SHA1: Oid = Oid::new_unwrap("1.2.840.10045.4.1");
pub const ECDSA_WITH_SHA224: Oid = Oid::new_unwrap("1.2.840.10045.4.3.1");
pub const ECDSA_WITH_SHA256: Oid = Oid::new_unwrap("1.2.840.10045.4.3.2");
pub const ECDSA_WITH_SHA384: Oid = Oid::new_unwrap("1.2.840.10045.4.3.3");
pub const ECDSA_WITH_SHA512: Oid = Oid::new_unwrap("1.2.840.10045.4.3.4");

// Digest algorithms
pub const ID_SHA1: Oid = Oid::new_unwrap("1.3.14.3.2.26");
pub const ID_SHA224: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.4");
pub const ID_SHA256: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.1");
pub const ID_SHA384: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.2");
pub const ID_SHA512: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.3");

// Named curves
pub const BRAINPOOL_P256R1: Oid = Oid::new_unwrap("1.3.36.3.3.2.8.1.1.7");
pub const BRAINPOOL_P384R1: Oid = Oid::new_unwrap("1.3.36.3.3.2.8.1.1.11");
pub const BRAINPOOL_P512R1: Oid = Oid::new_unwrap("1.3.36.3.3.2.8.1.1.13");
pub const SECP256R1: Oid = Oid::new_unwrap("1.2.840.10045.3.1.7");
pub const SECP384R1: Oid = Oid::new_unwrap("1.3.132.0.34");
pub const SECP521R1: Oid = Oid::new_unwrap("1.3.132.0.35");

// ETSI EN 319 412-5 QC statements
pub const ID_ETSI_QCS_QC_COMPLIANCE: Oid = Oid::new_unwrap("0.4.0.1862.1.1");
pub const ID_ETSI_QCS_QC_SSCD: Oid = Oid::new_unwrap("0.4.0.1862.1.4");

// gematik certificate policies
pub const OID_POLICY_GEM_OR_CP: Oid = Oid::new_unwrap("1.2.276.0.76.4.163");
pub const OID_EGK_AUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.70");
pub const OID_HBA_QES: Oid = Oid::new_unwrap("1.2.276.0.76.4.72");
pub const OID_SMC_B_AUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.77");
pub const OID_SMC_B_ENC: Oid = Oid::new_unwrap("1.2.276.0.76.4.76");
pub const OID_TSL_SIGNING: Oid = Oid::new_unwrap("1.2.276.0.76.4.176");

// Professions, Tab_PKI_402
pub const OID_ARZT: Oid = Oid::new_unwrap("1.2.276.0.76.4.30");
pub const OID_ZAHNARZT: Oid = Oid::new_unwrap("1.2.276.0.76.4.31");
pub const OID_APOTHEKER: Oid = Oid::new_unwrap("1.2.276.0.76.4.32");
pub const OID_APOTHEKERASSISTENT: Oid = Oid::new_unwrap("1.2.276.0.76.4.33");
pub const OID_PHARMAZIEINGENIEUR: Oid = Oid::new_unwrap("1.2.276.0.76.4.34");
pub const OID_PHARM_TECHN_ASSISTENT: Oid = Oid::new_unwrap("1.2.276.0.76.4.35");
pub const OID_PSYCHOTHERAPEUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.45");
pub const OID_PS_PSYCHOTHERAPEUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.46");
pub const OID_KUJ_PSYCHOTHERAPEUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.47");
pub const OID_VERSICHERTER: Oid = Oid::new_unwrap("1.2.276.0.76.4.49");
pub const OID_NOTFALLSANITAETER: Oid = Oid::new_unwrap("1.2.276.0.76.4.178");
pub const OID_PFLEGER_HPC: Oid = Oid::new_unwrap("1.2.276.0.76.4.232");
pub const OID_HEBAMME_HPC: Oid = Oid::new_unwrap("1.2.276.0.76.4.235");
pub const OID_PHYSIOTHERAPEUT_HPC: Oid = Oid::new_unwrap("1.2.276.0.76.4.236");

// Institutions, Tab_PKI_403
pub const OID_PRAXIS_ARZT: Oid = Oid::new_unwrap("1.2.276.0.76.4.50");
pub const OID_ZAHNARZTPRAXIS: Oid = Oid::new_unwrap("1.2.276.0.76.4.51");
pub const OID_PRAXIS_PSYCHOTHERAPEUT: Oid = Oid::new_unwrap("1.2.276.0.76.4.52");
pub const OID_KRANKENHAUS: Oid = Oid::new_unwrap("1.2.276.0.76.4.53");
pub const OID_OEFFENTLICHE_APOTHEKE: Oid = Oid::new_unwrap("1.2.276.0.76.4.54");
pub const OID_KRANKENHAUSAPOTHEKE: Oid = Oid::new_unwrap("1.2.276.0.76.4.55");
pub const OID_BUNDESWEHRAPOTHEKE: Oid = Oid::new_unwrap("1.2.276.0.76.4.56");
pub const OID_MOBILE_EINRICHTUNG_RETTUNGSDIENST: Oid = Oid::new_unwrap("1.2.276.0.76.4.57");
pub const OID_KOSTENTRAEGER: Oid = Oid::new_unwrap("1.2.276.0.76.4.59");

/// Professions allowed to issue a prescription.
pub const PRESCRIBING_PROFESSIONS: [Oid; 4] = [
    OID_ARZT,
    OID_ZAHNARZT,
    OID_PRAXIS_ARZT,
    OID_ZAHNARZTPRAXIS,
];

/// Institutions allowed to dispense a prescription.
pub const DISPENSING_INSTITUTIONS: [Oid; 3] = [
    OID_OEFFENTLICHE_APOTHEKE,
    OID_KRANKENHAUSAPOTHEKE,
    OID_BUNDESWEHRAPOTHEKE,
];
