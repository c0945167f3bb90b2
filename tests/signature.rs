
use {
    anyhow::{anyhow, Result},
    der::{Any, Decode, Encode},
    telematik_x509::{asn1::RsaSsaPssParameters, Certificate},
};

/// Flips a bit in the last byte of the signature, which ends the DER encoding.
fn tamper(certificate: &Certificate) -> Result<Certificate> {
    let mut der = certificate.to_der().to_vec();
    *der.last_mut().unwrap() ^= 0x01;
    Ok(Certificate::from_der(&der)?)
}

fn assert_signed_by(subject: &str, issuer: &str) -> Result<()> {
    let subject = fixtures::load(subject)?;
    let issuer = fixtures::load(issuer)?;
    assert!(subject.signature_is_valid_and_was_signed_by(&issuer));
    assert!(!tamper(&subject)?.signature_is_valid_and_was_signed_by(&issuer));
    Ok(())
}

/// Rewrites the RSASSA-PSS parameters of both signature algorithm fields.
fn with_pss_parameters(
    certificate: &Certificate,
    update: impl Fn(&mut RsaSsaPssParameters),
) -> Result<Certificate> {
    let mut parsed = x509_cert::Certificate::from_der(certificate.to_der())?;
    let encoded = parsed
        .signature_algorithm
        .parameters
        .as_ref()
        .ok_or_else(|| anyhow!("missing PSS parameters"))?
        .to_der()?;
    let mut params = RsaSsaPssParameters::from_der(&encoded)?;
    update(&mut params);
    let params = Any::encode_from(&params)?;
    parsed.signature_algorithm.parameters = Some(params.clone());
    parsed.tbs_certificate.signature.parameters = Some(params);
    Ok(Certificate::from_der(&parsed.to_der()?)?)
}

#[test]
fn test_rsa_pkcs1() -> Result<()> {
    assert_signed_by("badssl_wildcard_rsa.der", "digicert_sha2_secure_server_ca.der")
}

#[test]
fn test_rsa_pss() -> Result<()> {
    assert_signed_by("ca_rsa_pss.pem", "ca_rsa_pss.pem")?;
    // EC key certified by an RSA-PSS signature.
    assert_signed_by("server_p256.pem", "ca_rsa_pss.pem")
}

#[test]
fn test_rsa_pss_malformed_parameters() -> Result<()> {
    let ca = fixtures::load("ca_rsa_pss.pem")?;
    for salt_length in [u64::MAX, u64::MAX - 31, 4096] {
        let forged = with_pss_parameters(&ca, |params| params.salt_length = Some(salt_length))?;
        assert!(!forged.signature_is_valid_and_was_signed_by(&ca));
        assert!(!forged.signature_is_valid_and_was_signed_by(&forged));
    }
    let forged = with_pss_parameters(&ca, |params| params.trailer_field = Some(2))?;
    assert!(!forged.signature_is_valid_and_was_signed_by(&ca));
    Ok(())
}

#[test]
fn test_ecdsa_brainpool() -> Result<()> {
    assert_signed_by("hba_qes_brainpool.pem", "hba_ca_brainpool.pem")?;
    assert_signed_by("hba_ca_brainpool.pem", "hba_ca_brainpool.pem")?;
    assert_signed_by("vau_handshake_brainpool.der", "vau_handshake_brainpool.der")?;
    assert_signed_by("selfsigned_brainpool_p384.pem", "selfsigned_brainpool_p384.pem")
}

#[test]
fn test_ecdsa_nist() -> Result<()> {
    assert_signed_by("selfsigned_p384.pem", "selfsigned_p384.pem")?;
    assert_signed_by("selfsigned_p256_sha384.pem", "selfsigned_p256_sha384.pem")?;
    assert_signed_by("selfsigned_p521.pem", "selfsigned_p521.pem")
}

#[test]
fn test_wrong_issuer() -> Result<()> {
    let subject = fixtures::load("hba_qes_brainpool.pem")?;
    // Same algorithm family, different key.
    let other = fixtures::load("vau_handshake_brainpool.der")?;
    assert!(!subject.signature_is_valid_and_was_signed_by(&other));
    // Different key algorithm.
    let rsa = fixtures::load("gem_tsl_ca.der")?;
    assert!(!subject.signature_is_valid_and_was_signed_by(&rsa));
    // The issuer is not signed by its subject.
    let issuer = fixtures::load("hba_ca_brainpool.pem")?;
    assert!(!issuer.signature_is_valid_and_was_signed_by(&subject));
    Ok(())
}
