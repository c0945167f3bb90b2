//! Key usage and extended key usage as queried by callers, plus lookup of
//! extensions by OID.

use {
    crate::oid::{
        ANY_EXTENDED_KEY_USAGE, ID_KP_CLIENT_AUTH, ID_KP_CODE_SIGNING, ID_KP_DVCS,
        ID_KP_EMAIL_PROTECTION, ID_KP_OCSP_SIGNING, ID_KP_SERVER_AUTH, ID_KP_TIME_STAMPING,
        ID_MS_SGC, ID_NS_SGC,
    },
    der::{
        asn1::{BitString, ObjectIdentifier as Oid},
        DecodeOwned,
    },
    tracing::debug,
    x509_cert::ext::Extension,
};

/// Bits of the `keyUsage` extension, RFC 5280 4.2.1.3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    DigitalSignature,
    NonRepudiation,
    KeyEncipherment,
    DataEncipherment,
    KeyAgreement,
    KeyCertSign,
    CrlSign,
    EncipherOnly,
    DecipherOnly,
}

impl KeyUsage {
    /// Bit position in the `KeyUsage` BIT STRING.
    pub const fn bit(self) -> usize {
        self as usize
    }

    pub(crate) fn is_set(self, bits: &BitString) -> bool {
        let index = self.bit();
        index < bits.bit_len()
            && bits
                .raw_bytes()
                .get(index / 8)
                .is_some_and(|byte| byte & (0x80 >> (index % 8)) != 0)
    }
}

/// Purposes of the `extKeyUsage` extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedKeyUsage {
    ServerAuth,
    ClientAuth,
    EmailProtection,
    CodeSigning,
    /// Server gated crypto, either the Microsoft or the Netscape OID.
    Sgc,
    OcspSigning,
    TimeStamping,
    Dvcs,
    Any,
}

impl ExtendedKeyUsage {
    pub fn matches(self, purpose: &Oid) -> bool {
        match self {
            Self::ServerAuth => *purpose == ID_KP_SERVER_AUTH,
            Self::ClientAuth => *purpose == ID_KP_CLIENT_AUTH,
            Self::EmailProtection => *purpose == ID_KP_EMAIL_PROTECTION,
            Self::CodeSigning => *purpose == ID_KP_CODE_SIGNING,
            Self::Sgc => *purpose == ID_MS_SGC || *purpose == ID_NS_SGC,
            Self::OcspSigning => *purpose == ID_KP_OCSP_SIGNING,
            Self::TimeStamping => *purpose == ID_KP_TIME_STAMPING,
            Self::Dvcs => *purpose == ID_KP_DVCS,
            Self::Any => *purpose == ANY_EXTENDED_KEY_USAGE,
        }
    }
}

pub(crate) fn find<'a>(extensions: &'a [Extension], oid: Oid) -> Option<&'a Extension> {
    extensions.iter().find(|extension| extension.extn_id == oid)
}

/// Decodes the value of the first extension with `oid`.
///
/// Absent and undecodable extensions are both `None`.
pub(crate) fn decode<T: DecodeOwned>(extensions: &[Extension], oid: Oid) -> Option<T> {
    let extension = find(extensions, oid)?;
    match T::from_der(extension.extn_value.as_bytes()) {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(%oid, %error, "Ignoring undecodable extension");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, der::Decode, hex_literal::hex};

    #[test]
    fn test_key_usage_bits() {
        // digitalSignature and keyEncipherment
        let bits = BitString::from_der(&hex!("03 02 05 a0")).unwrap();
        assert!(KeyUsage::DigitalSignature.is_set(&bits));
        assert!(!KeyUsage::NonRepudiation.is_set(&bits));
        assert!(KeyUsage::KeyEncipherment.is_set(&bits));
        assert!(!KeyUsage::DecipherOnly.is_set(&bits));

        // keyCertSign, cRLSign and decipherOnly
        let bits = BitString::from_der(&hex!("03 03 07 0680")).unwrap();
        assert!(KeyUsage::KeyCertSign.is_set(&bits));
        assert!(KeyUsage::CrlSign.is_set(&bits));
        assert!(KeyUsage::DecipherOnly.is_set(&bits));
        assert!(!KeyUsage::EncipherOnly.is_set(&bits));
    }

    #[test]
    fn test_extended_key_usage() {
        assert!(ExtendedKeyUsage::Sgc.matches(&ID_MS_SGC));
        assert!(ExtendedKeyUsage::Sgc.matches(&ID_NS_SGC));
        assert!(!ExtendedKeyUsage::Any.matches(&ID_KP_SERVER_AUTH));
        assert!(ExtendedKeyUsage::ServerAuth.matches(&ID_KP_SERVER_AUTH));
    }
}
