use thiserror::Error as ThisError;

///
/// BuildError
///
/// Deterministic compile-time failures. A filter list either builds into a
/// complete predicate graph or aborts with one of these; a built graph never
/// fails to evaluate.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuildError {
    #[error("unsupported filter operator '{token}'")]
    UnsupportedOperator { token: String },

    #[error("operator '{op}' is not valid for field '{field}' of kind {kind}")]
    UnsupportedOperatorForKind {
        field: String,
        op: String,
        kind: String,
    },

    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error("incompatible value for field '{field}': {reason}")]
    IncompatibleValue { field: String, reason: String },
}

impl BuildError {
    pub fn unsupported_operator(token: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            token: token.into(),
        }
    }

    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    pub fn incompatible_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IncompatibleValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
