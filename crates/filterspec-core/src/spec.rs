use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// FilterSpec
///
/// One declarative filter line as it arrives on the wire: a field name, an
/// operator token, an optional literal, and the connector that joins this
/// line to the running predicate built from the lines before it. The list
/// order is significant. The operator stays a raw string so unknown tokens
/// surface as a build error rather than a decode error.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterSpec {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub connector: Connector,
}

impl FilterSpec {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            connector: Connector::And,
        }
    }

    /// Same line, joined to the running predicate with OR instead of AND.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }
}

///
/// Connector
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    #[default]
    And,
    Or,
}
