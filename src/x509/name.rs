//! Rendering of distinguished names and extraction of attribute values.

use {
    crate::asn1::any_to_string,
    const_oid::db::DB,
    der::asn1::ObjectIdentifier as Oid,
    regex::Regex,
    std::{collections::HashMap, fmt::Write},
    tracing::debug,
    x509_cert::{attr::AttributeTypeAndValue, name::Name},
};

pub const COUNTRY_NAME: Oid = Oid::new_unwrap("2.5.4.6");
pub const COMMON_NAME: Oid = Oid::new_unwrap("2.5.4.3");
pub const SURNAME: Oid = Oid::new_unwrap("2.5.4.4");
pub const SERIAL_NUMBER: Oid = Oid::new_unwrap("2.5.4.5");
pub const ORGANIZATION_NAME: Oid = Oid::new_unwrap("2.5.4.10");
pub const ORGANIZATIONAL_UNIT_NAME: Oid = Oid::new_unwrap("2.5.4.11");
pub const GIVEN_NAME: Oid = Oid::new_unwrap("2.5.4.42");

/// OpenSSL short names of the common attribute types.
const SHORT_NAMES: [(Oid, &str); 20] = [
    (COMMON_NAME, "CN"),
    (SURNAME, "SN"),
    (SERIAL_NUMBER, "serialNumber"),
    (COUNTRY_NAME, "C"),
    (Oid::new_unwrap("2.5.4.7"), "L"),
    (Oid::new_unwrap("2.5.4.8"), "ST"),
    (Oid::new_unwrap("2.5.4.9"), "street"),
    (ORGANIZATION_NAME, "O"),
    (ORGANIZATIONAL_UNIT_NAME, "OU"),
    (Oid::new_unwrap("2.5.4.12"), "title"),
    (Oid::new_unwrap("2.5.4.17"), "postalCode"),
    (GIVEN_NAME, "GN"),
    (Oid::new_unwrap("2.5.4.43"), "initials"),
    (Oid::new_unwrap("2.5.4.44"), "generationQualifier"),
    (Oid::new_unwrap("2.5.4.46"), "dnQualifier"),
    (Oid::new_unwrap("2.5.4.65"), "pseudonym"),
    (Oid::new_unwrap("2.5.4.97"), "organizationIdentifier"),
    (Oid::new_unwrap("1.2.840.113549.1.9.1"), "emailAddress"),
    (Oid::new_unwrap("0.9.2342.19200300.100.1.25"), "DC"),
    (Oid::new_unwrap("0.9.2342.19200300.100.1.1"), "UID"),
];

/// Which name of a certificate to search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Subject,
    Issuer,
}

/// Short name of an attribute type, falling back to the dotted OID.
pub fn short_name(oid: &Oid) -> String {
    SHORT_NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| (*name).to_owned())
        .or_else(|| DB.by_oid(oid).map(str::to_owned))
        .unwrap_or_else(|| oid.to_string())
}

/// Attributes in certificate order, multi-valued RDNs flattened.
fn attributes(name: &Name) -> impl Iterator<Item = &AttributeTypeAndValue> {
    name.0.iter().flat_map(|rdn| rdn.0.iter())
}

fn value_text(attribute: &AttributeTypeAndValue) -> Option<String> {
    any_to_string(&attribute.value)
}

/// One line rendering `/C=DE/O=gematik GmbH/CN=...`.
///
/// Values that are not character strings are written as `#` and their hex
/// encoded DER value.
pub fn oneline(name: &Name) -> String {
    let mut line = String::new();
    for attribute in attributes(name) {
        let value = value_text(attribute)
            .unwrap_or_else(|| format!("#{}", hex::encode(attribute.value.value())));
        // Writing to a String is infallible.
        let _ = write!(line, "/{}={}", short_name(&attribute.oid), value);
    }
    line
}

/// First value of type `attribute` matching `pattern`, in certificate order.
///
/// The pattern has to match the whole value, not just a part of it.
pub fn find_first_matching(name: &Name, attribute: Oid, pattern: &Regex) -> Option<String> {
    let anchored = match Regex::new(&format!("^(?:{})$", pattern.as_str())) {
        Ok(anchored) => anchored,
        Err(error) => {
            debug!(pattern = pattern.as_str(), "Pattern can not be anchored: {error}");
            return None;
        }
    };
    attributes(name)
        .filter(|candidate| candidate.oid == attribute)
        .filter_map(value_text)
        .find(|value| anchored.is_match(value))
}

/// First value of type `attribute`.
pub fn first_value(name: &Name, attribute: Oid) -> Option<String> {
    attributes(name)
        .filter(|candidate| candidate.oid == attribute)
        .find_map(value_text)
}

/// Short attribute name to all its values, in certificate order.
pub fn to_map(name: &Name) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for attribute in attributes(name) {
        if let Some(value) = value_text(attribute) {
            map.entry(short_name(&attribute.oid)).or_default().push(value);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    fn name() -> Name {
        Name::from_str("CN=Dr. Müller,OU=X110410317,OU=109500969,O=Test GmbH,C=DE").unwrap()
    }

    #[test]
    fn test_oneline() {
        assert_eq!(
            oneline(&name()),
            "/C=DE/O=Test GmbH/OU=109500969/OU=X110410317/CN=Dr. Müller"
        );
    }

    #[test]
    fn test_find_first_matching() {
        let name = name();
        let kvnr = Regex::new("^[A-Z][0-9]{9}$").unwrap();
        let ik = Regex::new("^[0-9]{9}$").unwrap();
        assert_eq!(
            find_first_matching(&name, ORGANIZATIONAL_UNIT_NAME, &kvnr).as_deref(),
            Some("X110410317")
        );
        assert_eq!(
            find_first_matching(&name, ORGANIZATIONAL_UNIT_NAME, &ik).as_deref(),
            Some("109500969")
        );
        assert_eq!(find_first_matching(&name, SURNAME, &ik), None);
        assert_eq!(find_first_matching(&name, COMMON_NAME, &ik), None);
    }

    #[test]
    fn test_match_spans_whole_value() {
        // Certificate order: C, OU=X110410317, OU=109500969.
        let name = Name::from_str("OU=109500969,OU=X110410317,C=DE").unwrap();
        let nine_digits = Regex::new("[0-9]{9}").unwrap();
        assert_eq!(
            find_first_matching(&name, ORGANIZATIONAL_UNIT_NAME, &nine_digits).as_deref(),
            Some("109500969")
        );
        let alternatives = Regex::new("X1|X110410317").unwrap();
        assert_eq!(
            find_first_matching(&name, ORGANIZATIONAL_UNIT_NAME, &alternatives).as_deref(),
            Some("X110410317")
        );
        let prefix = Regex::new("X11").unwrap();
        assert_eq!(find_first_matching(&name, ORGANIZATIONAL_UNIT_NAME, &prefix), None);
    }

    #[test]
    fn test_map() {
        let map = to_map(&name());
        assert_eq!(map["OU"], ["109500969", "X110410317"]);
        assert_eq!(map["C"], ["DE"]);
        assert!(!map.contains_key("SN"));
        assert_eq!(first_value(&name(), COMMON_NAME).as_deref(), Some("Dr. Müller"));
    }

    #[test]
    fn test_short_name_fallback() {
        assert_eq!(short_name(&COUNTRY_NAME), "C");
        assert_eq!(short_name(&Oid::new_unwrap("1.2.3.4")), "1.2.3.4");
    }
}
