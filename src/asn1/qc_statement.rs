//! RFC 3739 qualified certificate statements.

use der::{asn1::ObjectIdentifier as Oid, Any, Sequence};

/// `QCStatements ::= SEQUENCE OF QCStatement`
pub type QcStatements = Vec<QcStatement>;

#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct QcStatement {
    pub statement_id:   Oid,
    pub statement_info: Option<Any>,
}
