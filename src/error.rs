use {
    der::asn1::ObjectIdentifier as Oid,
    std::fmt::{self, Display, Formatter},
    thiserror::Error,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input is not exactly one well-formed certificate.
    #[error("certificate parse error: {0}")]
    Parse(#[source] anyhow::Error),

    /// Structurally valid input that violates an invariant, e.g. an elliptic
    /// curve point that is not on its curve.
    #[error("construction error: {0}")]
    Construction(#[source] anyhow::Error),

    /// Operation is only defined for a different key algorithm family.
    #[error("algorithm mismatch: expected {expected}, found {actual}")]
    AlgorithmMismatch {
        expected: KeyAlgorithm,
        actual:   KeyAlgorithm,
    },

    /// Elliptic curve keys on different curves can not be compared.
    #[error("elliptic curve keys are on different curves")]
    CurveMismatch,

    /// The underlying computation failed on well-formed input.
    #[error("internal failure: {0}")]
    Fail(#[source] anyhow::Error),
}

/// Public key algorithm family, as reported in [`Error::AlgorithmMismatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    EllipticCurve,
    Other(Oid),
}

impl Display for KeyAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa => write!(f, "RSA"),
            Self::EllipticCurve => write!(f, "elliptic curve"),
            Self::Other(oid) => write!(f, "{oid}"),
        }
    }
}

impl Error {
    pub(crate) fn parse(error: impl Into<anyhow::Error>) -> Self {
        Self::Parse(error.into())
    }

    pub(crate) fn construction(error: impl Into<anyhow::Error>) -> Self {
        Self::Construction(error.into())
    }
}
