//! RSA signature verification implementation
//!
//! To *not* do: Signing. This will remain verifying only. RSA a minefield
//! of pitfalls and security issues and no-one should create new signatures
//! using it. See e.g. https://blog.trailofbits.com/2019/07/08/fuck-rsa

use {
    super::mod_ring::{ModRing, RingRefExt},
    crate::asn1::{
        public_key_info::RsaPublicKeyInfo, AnyAlgorithmIdentifier, DigestAlgorithmIdentifier,
        RsaSsaPssParameters, SignatureAlgorithmIdentifier,
    },
    anyhow::{anyhow, bail, ensure, Error, Result},
    der::{
        asn1::{Null, OctetString},
        Any, Encode, Sequence,
    },
    ruint::Uint,
    subtle::ConstantTimeEq,
};

/// Largest supported modulus.
pub const MAX_MODULUS_BITS: usize = 4096;

#[derive(Clone, Debug)]
pub struct RsaPublicKey<const BITS: usize, const LIMBS: usize> {
    ring:            ModRing<Uint<BITS, LIMBS>>,
    public_exponent: u64,
}

/// PKCS#1 `DigestInfo`, the payload of a v1.5 signature.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
struct DigestInfo {
    digest_algorithm: AnyAlgorithmIdentifier,
    digest:           OctetString,
}

/// Verify `signature` over `message` with a key of any supported size.
pub fn verify(
    key: &RsaPublicKeyInfo,
    algorithm: &SignatureAlgorithmIdentifier,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    match modulus_bits(key) {
        0..=2048 => RsaPublicKey::<2048, 32>::try_from(key)?.verify(algorithm, message, signature),
        2049..=3072 => RsaPublicKey::<3072, 48>::try_from(key)?.verify(algorithm, message, signature),
        3073..=MAX_MODULUS_BITS => {
            RsaPublicKey::<4096, 64>::try_from(key)?.verify(algorithm, message, signature)
        }
        bits => bail!("RSA modulus of {bits} bits not supported"),
    }
}

/// Bit length of the modulus.
pub fn modulus_bits(key: &RsaPublicKeyInfo) -> usize {
    let bytes = key.modulus.as_bytes();
    match bytes.first() {
        Some(&first) => bytes.len() * 8 - first.leading_zeros() as usize,
        None => 0,
    }
}

impl<const BITS: usize, const LIMBS: usize> RsaPublicKey<BITS, LIMBS> {
    pub fn modulus_bits(&self) -> usize {
        self.ring.modulus().bit_len()
    }

    /// Length `k` of the modulus in bytes.
    fn modulus_len(&self) -> usize {
        self.modulus_bits().div_ceil(8)
    }

    pub fn verify(
        &self,
        algorithm: &SignatureAlgorithmIdentifier,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        match algorithm {
            SignatureAlgorithmIdentifier::RsaPkcs1(digest) => {
                self.verify_pkcs1(digest, message, signature)
            }
            SignatureAlgorithmIdentifier::RsaPss(params) => {
                self.verify_pss(message, signature, params)
            }
            other => bail!("Not an RSA signature algorithm: {}", other.oid()),
        }
    }

    /// RSAVP1: `signature^e mod n` as a `k` byte string.
    fn encoded_message(&self, signature: &[u8]) -> Result<Vec<u8>> {
        let k = self.modulus_len();
        ensure!(
            signature.len() == k,
            "Signature length {} does not match modulus length {k}",
            signature.len()
        );
        let s = Uint::<BITS, LIMBS>::try_from_be_slice(signature)
            .ok_or_else(|| anyhow!("Signature too large"))?;
        ensure!(s < self.ring.modulus(), "Signature representative out of range");
        let exponent = usize::try_from(self.public_exponent)?;
        let m = (&self.ring).from(s).pow(exponent).to_uint();
        let bytes = m.to_be_bytes_vec();
        Ok(bytes[bytes.len() - k..].to_vec())
    }

    /// Verify a RSASSA-PKCS1-v1_5 signature, per RFC 8017 8.2.2.
    ///
    /// Both encodings of the hash parameters (`NULL` and absent) are accepted.
    fn verify_pkcs1(
        &self,
        digest_algo: &DigestAlgorithmIdentifier,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        let k = self.modulus_len();
        let em = self.encoded_message(signature)?;
        let hash = OctetString::new(digest_algo.hash_bytes(message))?;

        let mut valid = 0_u8.ct_eq(&1);
        for parameters in [Some(Any::encode_from(&Null)?), None] {
            let t = DigestInfo {
                digest_algorithm: AnyAlgorithmIdentifier {
                    algorithm: digest_algo.oid(),
                    parameters,
                },
                digest:           hash.clone(),
            }
            .to_der()?;
            ensure!(k >= t.len() + 11, "Modulus too short for digest");
            let mut expected = Vec::with_capacity(k);
            expected.extend_from_slice(&[0x00, 0x01]);
            expected.resize(k - t.len() - 1, 0xff);
            expected.push(0x00);
            expected.extend_from_slice(&t);
            valid |= expected.ct_eq(&em);
        }
        ensure!(bool::from(valid), "Invalid RSA signature");
        Ok(())
    }

    /// Verify a RSA-PSS signature, per RFC 8017 9.1.2.
    fn verify_pss(
        &self,
        message: &[u8],
        signature: &[u8],
        params: &RsaSsaPssParameters,
    ) -> Result<()> {
        // Verifies h == h', where,
        // EM (expected message) = signature^e mod n
        // EM:  DB masked || h || 0xBC
        // DB (data block): padding |∣ 0x01 |∣ salt
        // DB masked = DB xor MFG(h)
        // h' = hash(padding || hash(message) || salt)

        let digest_algo = params.hash_algorithm();
        let mgf_algo = params.mask_gen_hash()?;
        let salt_len = usize::try_from(params.salt_length())
            .map_err(|_| anyhow!("Salt length {} too large", params.salt_length()))?;
        let trailer_field = params.trailer_field();
        if trailer_field != 1 {
            bail!("Unrecognized trailer field {trailer_field}. Expected value 1 (= 0xbc)");
        }

        let em_bits = self.modulus_bits() - 1;
        let em_len = em_bits.div_ceil(8);
        let hash_len = digest_algo.output_len();
        let db_len = em_len
            .checked_sub(hash_len + 1)
            .ok_or_else(|| anyhow!("Modulus too short for PSS"))?;
        // DB holds the padding, the 0x01 separator and the salt.
        let separator = db_len
            .checked_sub(salt_len)
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| anyhow!("Salt length {salt_len} too large for modulus"))?;

        let em = self.encoded_message(signature)?;
        // EM has `em_len` bytes, one less than the modulus if `em_bits` is a multiple of 8.
        let (leading, em) = em.split_at(em.len() - em_len);
        ensure!(leading.iter().all(|&b| b == 0), "Encoded message too large");

        // Check trailer (0xBC byte)
        if em.last() != Some(&0xbc) {
            bail!("Invalid PSS trailer byte");
        }

        // Split DB/H from EM
        let (masked_db, rest) = em.split_at(db_len);
        let h = &rest[..hash_len];

        let unused_bits = 8 * em_len - em_bits;
        ensure!(
            masked_db[0] & !(0xff >> unused_bits) == 0,
            "Leftmost bits of masked DB not zero"
        );

        // MGF1 unmask
        let mgf_mask = mgf1(&mgf_algo, h, db_len);
        let mut db: Vec<u8> = masked_db.iter().zip(&mgf_mask).map(|(a, b)| a ^ b).collect();
        db[0] &= 0xff >> unused_bits;

        // Verify DB format: zero padding, 0x01 and then exactly the salt.
        if db[..separator].iter().any(|&b| b != 0) {
            bail!("DB format mismatch: invalid padding");
        }
        if db[separator] != 0x01 {
            bail!("DB format mismatch: missing 0x01");
        }
        let salt = &db[separator + 1..];

        // Compute h' = hash(padding || hash(message) || salt)
        let message_hash = digest_algo.hash_bytes(message);
        let mut pre_data = vec![0u8; 8]; // 8‐byte zero prefix
        pre_data.extend_from_slice(&message_hash);
        pre_data.extend_from_slice(salt);
        let h_prime = digest_algo.hash_bytes(&pre_data);

        if !bool::from(h_prime.ct_eq(h)) {
            bail!("PSS verification: hash check failed");
        }

        Ok(())
    }
}

fn mgf1(digest_alg: &DigestAlgorithmIdentifier, seed: &[u8], out_len: usize) -> Vec<u8> {
    let mut mask = Vec::with_capacity(out_len + digest_alg.output_len());
    let mut counter: u32 = 0;
    while mask.len() < out_len {
        let mut data = Vec::with_capacity(seed.len() + 4);
        data.extend_from_slice(seed);
        data.extend_from_slice(&counter.to_be_bytes());
        mask.extend_from_slice(&digest_alg.hash_bytes(&data));
        counter += 1;
    }
    mask.truncate(out_len);
    mask
}

impl<const BITS: usize, const LIMBS: usize> TryFrom<&RsaPublicKeyInfo> for RsaPublicKey<BITS, LIMBS> {
    type Error = Error;

    fn try_from(key: &RsaPublicKeyInfo) -> Result<Self> {
        let modulus = Uint::<BITS, LIMBS>::try_from_be_slice(key.modulus.as_bytes())
            .ok_or_else(|| anyhow!("Modulus too large"))?;
        // ModRing requires an odd modulus, any real RSA modulus is odd.
        ensure!(modulus.bit(0) && modulus > Uint::from(1_u64), "Invalid RSA modulus");

        let exponent = key.public_exponent.as_bytes();
        ensure!(exponent.len() <= 8, "Public exponent too large");
        let mut be = [0_u8; 8];
        be[8 - exponent.len()..].copy_from_slice(exponent);
        let public_exponent = u64::from_be_bytes(be);
        ensure!(
            public_exponent >= 3 && public_exponent % 2 == 1,
            "Invalid public exponent"
        );

        Ok(Self {
            ring: ModRing::from_modulus(modulus),
            public_exponent,
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            asn1::{
                public_key_info::SubjectPublicKeyInfo, DigestAlgorithmParameters, MaskGenAlgorithm,
            },
            oid::ID_MGF1,
        },
        anyhow::Result,
        der::Decode,
        hex_literal::hex,
        x509_cert::spki::SubjectPublicKeyInfoOwned,
    };

    fn rsa_key(spki: &[u8]) -> Result<RsaPublicKeyInfo> {
        let spki = SubjectPublicKeyInfoOwned::from_der(spki)?;
        match SubjectPublicKeyInfo::try_from(&spki)? {
            SubjectPublicKeyInfo::Rsa(key) => Ok(key),
            _ => bail!("expected RSA key"),
        }
    }

    #[test]
    fn test_rsa_ssa_pss() -> Result<()> {
        // RSA-PSS example with MFG1/SHA256, 32 bytes salt
        let subject_public_key = hex!("30820122300d06092a864886f70d01010105000382010f003082010a0282010100a2b451a07d0aa5f96e455671513550514a8a5b462ebef717094fa1fee82224e637f9746d3f7cafd31878d80325b6ef5a1700f65903b469429e89d6eac8845097b5ab393189db92512ed8a7711a1253facd20f79c15e8247f3d3e42e46e48c98e254a2fe9765313a03eff8f17e1a029397a1fa26a8dce26f490ed81299615d9814c22da610428e09c7d9658594266f5c021d0fceca08d945a12be82de4d1ece6b4c03145b5d3495d4ed5411eb878daf05fd7afc3e09ada0f1126422f590975a1969816f48698bcbba1b4d9cae79d460d8f9f85e7975005d9bc22c4e5ac0f7c1a45d12569a62807d3b9a02e5a530e773066f453d1f5b4c2e9cf7820283f742b9d50203010001");
        let signature = hex!("68caf07e71ee654ffabf07d342fc4059deb4f7e5970746c423b1e8f668d5332275cc35eb61270aebd27855b1e80d59def47fe8882867fd33c2308c91976baa0b1df952caa78db4828ab81e79949bf145cbdfd1c4987ed036f81e8442081016f20fa4b587574884ca6f6045959ce3501ae7c02b1902ec1d241ef28dee356c0d30d28a950f1fbc683ee7d9aad26b048c13426fe3975d5638afeb5b9c1a99d162d3a5810e8b074d7a2eae2be52b577151f76e1f734b0a956ef4f22be64dc20a81ad1316e4f79dff5fc41fc08a20bc612283a88415d41595bfea66d59de7ac12e230f72244ad9905aef0ead3fa41ed70bf4218863d5f041292f2d14ce0a7271c6d36");
        let message = hex!("313233343030");
        let digest_algo = DigestAlgorithmIdentifier::Sha256(DigestAlgorithmParameters::Absent);
        let params = RsaSsaPssParameters {
            hash_algorithm:     Some(digest_algo),
            mask_gen_algorithm: Some(MaskGenAlgorithm {
                algorithm:  ID_MGF1,
                parameters: digest_algo,
            }),
            salt_length:        Some(32),
            trailer_field:      None,
        };

        let key = rsa_key(&subject_public_key)?;
        assert_eq!(modulus_bits(&key), 2048);
        let pubkey = RsaPublicKey::<2048, 32>::try_from(&key)?;
        assert_eq!(pubkey.public_exponent, 65537);

        pubkey.verify_pss(&message, &signature, &params)?;

        let algorithm = SignatureAlgorithmIdentifier::RsaPss(params.clone());
        verify(&key, &algorithm, &message, &signature)?;
        assert!(verify(&key, &algorithm, b"123401", &signature).is_err());

        let mut tampered = signature;
        tampered[255] ^= 1;
        assert!(verify(&key, &algorithm, &message, &tampered).is_err());

        let wrong_salt = RsaSsaPssParameters {
            salt_length: Some(20),
            ..params
        };
        assert!(pubkey.verify_pss(&message, &signature, &wrong_salt).is_err());
        Ok(())
    }

    #[test]
    fn test_pss_parameter_bounds() -> Result<()> {
        let subject_public_key = hex!("30820122300d06092a864886f70d01010105000382010f003082010a0282010100a2b451a07d0aa5f96e455671513550514a8a5b462ebef717094fa1fee82224e637f9746d3f7cafd31878d80325b6ef5a1700f65903b469429e89d6eac8845097b5ab393189db92512ed8a7711a1253facd20f79c15e8247f3d3e42e46e48c98e254a2fe9765313a03eff8f17e1a029397a1fa26a8dce26f490ed81299615d9814c22da610428e09c7d9658594266f5c021d0fceca08d945a12be82de4d1ece6b4c03145b5d3495d4ed5411eb878daf05fd7afc3e09ada0f1126422f590975a1969816f48698bcbba1b4d9cae79d460d8f9f85e7975005d9bc22c4e5ac0f7c1a45d12569a62807d3b9a02e5a530e773066f453d1f5b4c2e9cf7820283f742b9d50203010001");
        let key = rsa_key(&subject_public_key)?;
        let pubkey = RsaPublicKey::<2048, 32>::try_from(&key)?;
        let digest_algo = DigestAlgorithmIdentifier::Sha256(DigestAlgorithmParameters::Absent);
        let params = RsaSsaPssParameters {
            hash_algorithm: Some(digest_algo),
            mask_gen_algorithm: Some(MaskGenAlgorithm {
                algorithm:  ID_MGF1,
                parameters: digest_algo,
            }),
            ..RsaSsaPssParameters::default()
        };
        // Any 256 byte value below the modulus, the parameters are rejected first.
        let mut signature = [0x11; 256];
        signature[255] = 0xbc;

        // 256 - 32 - 2 = 222 is the largest salt a 2048 bit key can hold.
        for salt_length in [u64::MAX, u64::MAX - 32, 1 << 32, 223] {
            let params = RsaSsaPssParameters {
                salt_length: Some(salt_length),
                ..params.clone()
            };
            let error = pubkey.verify_pss(b"abc", &signature, &params).unwrap_err();
            assert!(error.to_string().contains("too large"), "{error}");
        }
        let params = RsaSsaPssParameters {
            salt_length: Some(222),
            ..params.clone()
        };
        assert!(pubkey.verify_pss(b"abc", &signature, &params).is_err());

        let trailer = RsaSsaPssParameters {
            trailer_field: Some(2),
            ..params
        };
        assert!(pubkey.verify_pss(b"abc", &signature, &trailer).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_keys() {
        let even = RsaPublicKeyInfo {
            modulus:         der::asn1::Uint::new(&[0xc5, 0xbe]).unwrap(),
            public_exponent: der::asn1::Uint::new(&[3]).unwrap(),
        };
        assert!(RsaPublicKey::<2048, 32>::try_from(&even).is_err());

        let even_exponent = RsaPublicKeyInfo {
            modulus:         der::asn1::Uint::new(&[0xc5, 0xbf]).unwrap(),
            public_exponent: der::asn1::Uint::new(&[4]).unwrap(),
        };
        assert!(RsaPublicKey::<2048, 32>::try_from(&even_exponent).is_err());
    }

    #[test]
    fn test_pkcs1_length_checks() -> Result<()> {
        // Toy 16-bit key, too short for any DigestInfo.
        let key = RsaPublicKeyInfo {
            modulus:         der::asn1::Uint::new(&[0xc5, 0xbf])?,
            public_exponent: der::asn1::Uint::new(&[3])?,
        };
        let sha256 = DigestAlgorithmIdentifier::Sha256(DigestAlgorithmParameters::Null);
        let algorithm = SignatureAlgorithmIdentifier::RsaPkcs1(sha256);
        assert!(verify(&key, &algorithm, b"abc", &[0x01, 0x02]).is_err());
        assert!(verify(&key, &algorithm, b"abc", &[0x01]).is_err());
        assert!(verify(&key, &algorithm, b"abc", &[0xff, 0xff]).is_err());
        Ok(())
    }
}
