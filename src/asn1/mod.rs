//! Pure ASN1 types, no application logic.
//!
//! Parsing is done as deeply as practical: algorithm identifiers become enums
//! of the known OIDs with a catch-all for the rest, so the application can
//! work with rich types while every valid input still parses.
//!
//! The vendor extensions ([`admission`], [`qc_statement`]) are decoded on
//! request from the raw extension value and never cached.
//!
//! Where real world data is not DER compliant or the standard is ambiguous we
//! store the details of the input so the output can be exactly reconstructed,
//! see for example the [`DigestAlgorithmIdentifier`] parameters (which have two
//! ways of encoding 'no parameters').

pub mod admission;
mod digest_algorithm_identifier;
mod directory_string;
pub mod public_key_info;
pub mod qc_statement;
mod signature_algorithm_identifier;

pub use self::{
    digest_algorithm_identifier::{
        DigestAlgorithmIdentifier, Parameters as DigestAlgorithmParameters,
    },
    directory_string::{any_to_string, DirectoryString},
    signature_algorithm_identifier::{
        MaskGenAlgorithm, RsaSsaPssParameters, SignatureAlgorithmIdentifier,
    },
};
use {
    der::{asn1::ObjectIdentifier as Oid, Any, Sequence, ValueOrd},
    x509_cert::spki::AlgorithmIdentifierOwned,
};

#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Sequence, ValueOrd)]
pub struct AnyAlgorithmIdentifier {
    pub algorithm:  Oid,
    pub parameters: Option<Any>,
}

impl From<&AlgorithmIdentifierOwned> for AnyAlgorithmIdentifier {
    fn from(value: &AlgorithmIdentifierOwned) -> Self {
        Self {
            algorithm:  value.oid,
            parameters: value.parameters.clone(),
        }
    }
}
