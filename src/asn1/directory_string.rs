use der::{Any, Choice, Decode, Encode, Length, Reader, Tag, Tagged, Writer};

/// X.520 `DirectoryString` and the other character string types found in
/// distinguished names and admission profession items.
///
/// The raw encoding is kept so re-encoding is exact; use [`Self::to_text`] to
/// obtain the string value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryString(Any);

impl DirectoryString {
    /// Wraps `value` as an `UTF8String`.
    pub fn utf8(value: &str) -> der::Result<Self> {
        Ok(Self(Any::new(Tag::Utf8String, value.as_bytes())?))
    }

    /// Wraps `value` as a `PrintableString`.
    pub fn printable(value: &str) -> der::Result<Self> {
        let printable = der::asn1::PrintableString::new(value)?;
        Ok(Self(Any::encode_from(&printable)?))
    }

    pub fn to_text(&self) -> Option<String> {
        any_to_string(&self.0)
    }
}

impl<'a> Decode<'a> for DirectoryString {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let any = Any::decode(reader)?;
        if !Self::can_decode(any.tag()) {
            return Err(any.tag().unexpected_error(Some(Tag::Utf8String)));
        }
        Ok(Self(any))
    }
}

impl Encode for DirectoryString {
    fn encoded_len(&self) -> der::Result<Length> {
        self.0.encoded_len()
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.0.encode(writer)
    }
}

impl Tagged for DirectoryString {
    fn tag(&self) -> Tag {
        self.0.tag()
    }
}

impl Choice<'_> for DirectoryString {
    fn can_decode(tag: Tag) -> bool {
        matches!(
            tag,
            Tag::Utf8String
                | Tag::PrintableString
                | Tag::TeletexString
                | Tag::BmpString
                | Tag::Ia5String
                | Tag::VisibleString
                | Tag::NumericString
        )
    }
}

/// Converts a character string value to text.
///
/// `TeletexString` is read as Latin-1 and `BMPString` as UTF-16BE, the way
/// deployed CAs actually fill them. Returns `None` for non-string types and
/// invalid encodings.
pub fn any_to_string(any: &Any) -> Option<String> {
    let bytes = any.value();
    match any.tag() {
        Tag::Utf8String
        | Tag::PrintableString
        | Tag::Ia5String
        | Tag::VisibleString
        | Tag::NumericString => std::str::from_utf8(bytes).ok().map(str::to_owned),
        Tag::TeletexString => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        Tag::BmpString => {
            if bytes.len() % 2 != 0 {
                return None;
            }
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units).collect::<Result<String, _>>().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    #[test]
    fn test_string_types() {
        let utf8 = Any::from_der(&hex!("0c 07 4dc3bc6c6c6572")).unwrap();
        assert_eq!(any_to_string(&utf8).as_deref(), Some("Müller"));

        let teletex = Any::from_der(&hex!("14 06 4dfc6c6c6572")).unwrap();
        assert_eq!(any_to_string(&teletex).as_deref(), Some("Müller"));

        let bmp = Any::from_der(&hex!("1e 0c 004d 00fc 006c 006c 0065 0072")).unwrap();
        assert_eq!(any_to_string(&bmp).as_deref(), Some("Müller"));

        let int = Any::from_der(&hex!("02 01 05")).unwrap();
        assert_eq!(any_to_string(&int), None);
    }

    #[test]
    fn test_directory_string_rejects_non_strings() {
        assert!(DirectoryString::from_der(&hex!("02 01 05")).is_err());
        let item = DirectoryString::from_der(&hex!("13 02 4445")).unwrap();
        assert_eq!(item.to_text().as_deref(), Some("DE"));
        assert_eq!(item.to_der().unwrap(), hex!("13 02 4445"));
    }
}
