//! Signature verification for X.509 signature algorithms.

use {
    super::{ecdsa::EcdsaSignature, rsa, EcPublicKey},
    crate::asn1::{public_key_info::SubjectPublicKeyInfo, SignatureAlgorithmIdentifier},
    anyhow::{bail, Result},
    der::Decode,
};

/// Verify `signature` over `message` made with `algorithm` by the holder of
/// `public_key`.
pub fn verify_signature(
    public_key: &SubjectPublicKeyInfo,
    algorithm: &SignatureAlgorithmIdentifier,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    use SignatureAlgorithmIdentifier::*;
    match (algorithm, public_key) {
        (RsaPkcs1(_) | RsaPss(_), SubjectPublicKeyInfo::Rsa(key)) => {
            rsa::verify(key, algorithm, message, signature)
        }
        (Ecdsa(digest), SubjectPublicKeyInfo::Ec(info)) => {
            let key = EcPublicKey::from_info(info)?;
            let signature = EcdsaSignature::from_der(signature)?;
            key.verify(&digest.hash_bytes(message), &signature)
        }
        (Unknown(any), _) => bail!("Unsupported signature algorithm {}", any.algorithm),
        (algorithm, key) => bail!(
            "Signature algorithm {} does not match {} key",
            algorithm.oid(),
            key.algorithm_family()
        ),
    }
}
