//! X.509 certificates of the German healthcare PKI (Telematikinfrastruktur).
//!
//! [`Certificate`] answers the questions a service in the TI asks about a
//! single certificate: validity, key and policy constraints, who signed it,
//! and which professional identity (Telematik-ID, profession OIDs) the
//! admission extension asserts. Chain building and revocation are left to the
//! caller.

pub mod asn1;
pub mod crypto;
mod error;
pub mod oid;
pub mod x509;

pub use self::{
    crypto::{EcPublicKey, NamedCurve},
    error::{Error, KeyAlgorithm, Result},
    x509::{
        Certificate, ExtendedKeyUsage, IdentifierInformation, KeyUsage, NameKind,
        SigningAlgorithm,
    },
};
