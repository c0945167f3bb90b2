//! Identity and role matching over decoded admissions and subject names.

use {
    super::name::{self, COMMON_NAME, GIVEN_NAME, ORGANIZATIONAL_UNIT_NAME, SURNAME},
    crate::asn1::admission::AdmissionSyntax,
    der::asn1::ObjectIdentifier as Oid,
    once_cell::sync::Lazy,
    regex::Regex,
    x509_cert::name::Name,
};

/// Krankenversichertennummer: one upper case letter and nine digits.
pub static KVNR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Z][0-9]{9}$").expect("valid KVNR pattern"));

/// Institutionskennzeichen: nine digits.
pub static IK_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[0-9]{9}$").expect("valid IK pattern"));

/// Identity of an insured person or institution as found in the subject name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierInformation {
    pub kvnr:        Option<String>,
    pub ik_number:   Option<String>,
    pub given_name:  Option<String>,
    pub surname:     Option<String>,
    pub common_name: Option<String>,
}

impl IdentifierInformation {
    pub fn from_subject(subject: &Name) -> Self {
        // Both numbers live in OU, so each pattern is tried on its own.
        Self {
            kvnr:        name::find_first_matching(subject, ORGANIZATIONAL_UNIT_NAME, &KVNR_PATTERN),
            ik_number:   name::find_first_matching(
                subject,
                ORGANIZATIONAL_UNIT_NAME,
                &IK_NUMBER_PATTERN,
            ),
            given_name:  name::first_value(subject, GIVEN_NAME),
            surname:     name::first_value(subject, SURNAME),
            common_name: name::first_value(subject, COMMON_NAME),
        }
    }
}

/// First registration number present in any profession info, searching the
/// admissions in order. An empty registration number counts as absent.
pub fn first_registration_number(syntax: &AdmissionSyntax) -> Option<String> {
    syntax.profession_infos().find_map(|info| {
        info.registration_number
            .clone()
            .filter(|number| !number.is_empty())
    })
}

/// Whether any profession info of any admission carries `registration_number`.
pub fn contains_registration_number(syntax: &AdmissionSyntax, registration_number: &str) -> bool {
    syntax
        .profession_infos()
        .any(|info| info.registration_number.as_deref() == Some(registration_number))
}

/// All profession OIDs in order, duplicates kept.
pub fn profession_oids(syntax: &AdmissionSyntax) -> Vec<Oid> {
    syntax
        .profession_infos()
        .flat_map(|info| info.profession_oids().iter().copied())
        .collect()
}

pub fn has_any_role(syntax: &AdmissionSyntax, roles: &[Oid]) -> bool {
    syntax
        .profession_infos()
        .flat_map(|info| info.profession_oids())
        .any(|oid| roles.contains(oid))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            asn1::admission::{Admissions, ProfessionInfo},
            oid::{OID_ARZT, OID_APOTHEKER, OID_VERSICHERTER, OID_ZAHNARZT},
        },
        std::str::FromStr,
    };

    fn info(registration_number: Option<&str>, oids: Option<Vec<Oid>>) -> ProfessionInfo {
        ProfessionInfo {
            registration_number: registration_number.map(str::to_owned),
            profession_oids: oids,
            ..ProfessionInfo::default()
        }
    }

    fn admissions(profession_infos: Vec<ProfessionInfo>) -> Admissions {
        Admissions {
            admission_authority: None,
            naming_authority: None,
            profession_infos,
        }
    }

    fn syntax() -> AdmissionSyntax {
        AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![
                admissions(vec![
                    info(Some("1-first"), Some(vec![OID_ARZT])),
                    info(None, Some(vec![OID_ZAHNARZT, OID_ARZT])),
                ]),
                admissions(vec![info(Some("2-second"), None)]),
            ],
        }
    }

    #[test]
    fn test_registration_numbers() {
        let syntax = syntax();
        assert_eq!(first_registration_number(&syntax).as_deref(), Some("1-first"));
        assert!(contains_registration_number(&syntax, "1-first"));
        assert!(contains_registration_number(&syntax, "2-second"));
        assert!(!contains_registration_number(&syntax, "3-third"));
    }

    #[test]
    fn test_registration_number_in_later_profession_info() {
        let syntax = AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![admissions(vec![
                info(None, Some(vec![OID_ARZT])),
                info(Some("1-20014-XYZ"), None),
            ])],
        };
        assert_eq!(first_registration_number(&syntax).as_deref(), Some("1-20014-XYZ"));

        let syntax = AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![
                admissions(vec![info(Some(""), Some(vec![OID_ARZT]))]),
                admissions(vec![]),
                admissions(vec![info(Some("2-second"), None)]),
            ],
        };
        assert_eq!(first_registration_number(&syntax).as_deref(), Some("2-second"));
    }

    #[test]
    fn test_empty_registration_number() {
        let syntax = AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![admissions(vec![info(Some(""), None)])],
        };
        assert_eq!(first_registration_number(&syntax), None);

        let empty = AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![],
        };
        assert_eq!(first_registration_number(&empty), None);
        assert!(!has_any_role(&empty, &[OID_ARZT]));
    }

    #[test]
    fn test_roles() {
        let syntax = syntax();
        assert_eq!(profession_oids(&syntax), [OID_ARZT, OID_ZAHNARZT, OID_ARZT]);
        assert!(has_any_role(&syntax, &[OID_APOTHEKER, OID_ZAHNARZT]));
        assert!(!has_any_role(&syntax, &[OID_VERSICHERTER]));
        assert!(!has_any_role(&syntax, &[]));
    }

    #[test]
    fn test_encoded_admission() {
        use der::{Decode, Encode};

        let encoded = AdmissionSyntax {
            admission_authority:    None,
            contents_of_admissions: vec![admissions(vec![info(
                Some("1234567890"),
                Some(vec![OID_APOTHEKER]),
            )])],
        }
        .to_der()
        .unwrap();
        let syntax = AdmissionSyntax::from_der(&encoded).unwrap();
        assert_eq!(first_registration_number(&syntax).as_deref(), Some("1234567890"));
        assert!(has_any_role(&syntax, &[OID_APOTHEKER]));
    }

    #[test]
    fn test_identifier_information() {
        let subject = Name::from_str(
            "CN=Erika Mustermann,2.5.4.42=Erika,SN=Mustermann,OU=109500969,OU=X110410317,O=AOK,C=DE",
        )
        .unwrap();
        let info = IdentifierInformation::from_subject(&subject);
        assert_eq!(info.kvnr.as_deref(), Some("X110410317"));
        assert_eq!(info.ik_number.as_deref(), Some("109500969"));
        assert_eq!(info.given_name.as_deref(), Some("Erika"));
        assert_eq!(info.surname.as_deref(), Some("Mustermann"));
        assert_eq!(info.common_name.as_deref(), Some("Erika Mustermann"));
    }
}
