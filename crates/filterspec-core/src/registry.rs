use crate::{
    accessor::Accessor,
    error::BuildError,
    model::FieldKind,
    predicate::{CompareOp, Predicate},
    value::{CoercionId, KindClass, Value},
};

///
/// OperatorToken
///
/// Canonical identity of every supported operator. Wire tokens and their
/// aliases resolve here; anything else is `UnsupportedOperator`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperatorToken {
    Any,
    ContainedIn,
    Contains,
    EndsWith,
    Eq,
    Gt,
    Gte,
    IsEmpty,
    IsNotEmpty,
    IsNotNull,
    IsNull,
    Like,
    Lt,
    Lte,
    Ne,
    NotContains,
    NotIn,
    StartsWith,
}

impl OperatorToken {
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = match token {
            "equals" | "=" | "is" => Self::Eq,
            "!=" | "not" => Self::Ne,
            ">" | "after" => Self::Gt,
            ">=" | "onOrAfter" => Self::Gte,
            "<" | "before" => Self::Lt,
            "<=" | "onOrBefore" => Self::Lte,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "contains" => Self::Contains,
            "notcontains" => Self::NotContains,
            "like" => Self::Like,
            "containedIn" | "in" => Self::ContainedIn,
            "notIn" => Self::NotIn,
            "any" => Self::Any,
            "isNull" => Self::IsNull,
            "isNotNull" => Self::IsNotNull,
            "isEmpty" => Self::IsEmpty,
            "isNotEmpty" => Self::IsNotEmpty,
            _ => return None,
        };

        Some(token)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::ContainedIn => "containedIn",
            Self::Contains => "contains",
            Self::EndsWith => "endsWith",
            Self::Eq => "equals",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::IsNotNull => "isNotNull",
            Self::IsNull => "isNull",
            Self::Like => "like",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Ne => "!=",
            Self::NotContains => "notcontains",
            Self::NotIn => "notIn",
            Self::StartsWith => "startsWith",
        }
    }
}

///
/// ValueArity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueArity {
    /// Operator ignores its literal entirely.
    None,
    /// One scalar literal, coerced to the field kind.
    Scalar,
    /// A candidate set; each element is coerced to the field kind.
    Many,
}

type BuildFn = fn(&Accessor, Value, CoercionId) -> Predicate;

///
/// OperatorDescriptor
///

#[derive(Clone, Copy, Debug)]
pub struct OperatorDescriptor {
    pub token: OperatorToken,
    pub supported: &'static [KindClass],
    pub arity: ValueArity,
    build: BuildFn,
}

impl OperatorDescriptor {
    #[must_use]
    pub fn supports(&self, kind: &FieldKind) -> bool {
        let class = kind.class();
        self.supported.iter().any(|candidate| *candidate == class)
    }

    /// Presence checks are the only operators exempt from the null-guard.
    #[must_use]
    pub const fn is_presence_check(&self) -> bool {
        matches!(self.token, OperatorToken::IsNull | OperatorToken::IsNotNull)
    }

    #[must_use]
    pub const fn ignores_value(&self) -> bool {
        matches!(self.arity, ValueArity::None)
    }

    pub(crate) fn build_node(&self, accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
        (self.build)(accessor, value, coercion)
    }
}

///
/// OperatorRegistry
///
/// Immutable, injected into the builder. `standard()` carries the full
/// operator set; a host that wants to forbid operators hands the builder a
/// narrower table.
///

#[derive(Clone, Copy, Debug)]
pub struct OperatorRegistry {
    table: &'static [OperatorDescriptor],
}

impl OperatorRegistry {
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            table: STANDARD_OPERATORS,
        }
    }

    #[must_use]
    pub const fn with_table(table: &'static [OperatorDescriptor]) -> Self {
        Self { table }
    }

    pub fn lookup(&self, token: &str) -> Result<&OperatorDescriptor, BuildError> {
        let canonical =
            OperatorToken::parse(token).ok_or_else(|| BuildError::unsupported_operator(token))?;

        self.table
            .iter()
            .find(|descriptor| descriptor.token == canonical)
            .ok_or_else(|| BuildError::unsupported_operator(token))
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

const SCALAR_KINDS: &[KindClass] = &[
    KindClass::Bool,
    KindClass::Numeric,
    KindClass::Temporal,
    KindClass::Textual,
];
const ORDERED_KINDS: &[KindClass] = &[KindClass::Numeric, KindClass::Temporal, KindClass::Textual];
const TEXT_KINDS: &[KindClass] = &[KindClass::Textual];
const COLLECTION_KINDS: &[KindClass] = &[KindClass::Collection];
const ALL_KINDS: &[KindClass] = &[
    KindClass::Bool,
    KindClass::Collection,
    KindClass::Numeric,
    KindClass::Temporal,
    KindClass::Textual,
];

const STANDARD_OPERATORS: &[OperatorDescriptor] = &[
    OperatorDescriptor {
        token: OperatorToken::Eq,
        supported: SCALAR_KINDS,
        arity: ValueArity::Scalar,
        build: build_eq,
    },
    OperatorDescriptor {
        token: OperatorToken::Ne,
        supported: SCALAR_KINDS,
        arity: ValueArity::Scalar,
        build: build_ne,
    },
    OperatorDescriptor {
        token: OperatorToken::Gt,
        supported: ORDERED_KINDS,
        arity: ValueArity::Scalar,
        build: build_gt,
    },
    OperatorDescriptor {
        token: OperatorToken::Gte,
        supported: ORDERED_KINDS,
        arity: ValueArity::Scalar,
        build: build_gte,
    },
    OperatorDescriptor {
        token: OperatorToken::Lt,
        supported: ORDERED_KINDS,
        arity: ValueArity::Scalar,
        build: build_lt,
    },
    OperatorDescriptor {
        token: OperatorToken::Lte,
        supported: ORDERED_KINDS,
        arity: ValueArity::Scalar,
        build: build_lte,
    },
    OperatorDescriptor {
        token: OperatorToken::StartsWith,
        supported: TEXT_KINDS,
        arity: ValueArity::Scalar,
        build: build_starts_with,
    },
    OperatorDescriptor {
        token: OperatorToken::EndsWith,
        supported: TEXT_KINDS,
        arity: ValueArity::Scalar,
        build: build_ends_with,
    },
    OperatorDescriptor {
        token: OperatorToken::Contains,
        supported: TEXT_KINDS,
        arity: ValueArity::Scalar,
        build: build_contains,
    },
    OperatorDescriptor {
        token: OperatorToken::NotContains,
        supported: TEXT_KINDS,
        arity: ValueArity::Scalar,
        build: build_not_contains,
    },
    OperatorDescriptor {
        token: OperatorToken::Like,
        supported: TEXT_KINDS,
        arity: ValueArity::Scalar,
        build: build_like,
    },
    OperatorDescriptor {
        token: OperatorToken::ContainedIn,
        supported: SCALAR_KINDS,
        arity: ValueArity::Many,
        build: build_in,
    },
    OperatorDescriptor {
        token: OperatorToken::NotIn,
        supported: SCALAR_KINDS,
        arity: ValueArity::Many,
        build: build_not_in,
    },
    OperatorDescriptor {
        token: OperatorToken::Any,
        supported: COLLECTION_KINDS,
        arity: ValueArity::Scalar,
        build: build_any,
    },
    OperatorDescriptor {
        token: OperatorToken::IsNull,
        supported: ALL_KINDS,
        arity: ValueArity::None,
        build: build_is_null,
    },
    OperatorDescriptor {
        token: OperatorToken::IsNotNull,
        supported: ALL_KINDS,
        arity: ValueArity::None,
        build: build_is_not_null,
    },
    OperatorDescriptor {
        token: OperatorToken::IsEmpty,
        supported: TEXT_KINDS,
        arity: ValueArity::None,
        build: build_is_empty,
    },
    OperatorDescriptor {
        token: OperatorToken::IsNotEmpty,
        supported: TEXT_KINDS,
        arity: ValueArity::None,
        build: build_is_not_empty,
    },
];

fn build_eq(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Eq, value, coercion)
}

fn build_ne(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Ne, value, coercion)
}

fn build_gt(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Gt, value, coercion)
}

fn build_gte(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Gte, value, coercion)
}

fn build_lt(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Lt, value, coercion)
}

fn build_lte(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Lte, value, coercion)
}

fn build_starts_with(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::StartsWith, value, coercion)
}

fn build_ends_with(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::EndsWith, value, coercion)
}

fn build_contains(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::Contains, value, coercion)
}

fn build_not_contains(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    build_contains(accessor, value, coercion).negate()
}

fn build_like(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    // Containment semantics: the literal is wrapped in wildcards up front so
    // both evaluation and push-down see the final pattern.
    let pattern = match value {
        Value::Text(text) => Value::Text(format!("%{text}%")),
        other => other,
    };

    Predicate::compare(accessor.field, CompareOp::Like, pattern, coercion)
}

fn build_in(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::In, value, coercion)
}

fn build_not_in(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    build_in(accessor, value, coercion).negate()
}

fn build_any(accessor: &Accessor, value: Value, coercion: CoercionId) -> Predicate {
    Predicate::compare(accessor.field, CompareOp::AnyEq, value, coercion)
}

fn build_is_null(accessor: &Accessor, _value: Value, _coercion: CoercionId) -> Predicate {
    Predicate::is_null(accessor.field)
}

fn build_is_not_null(accessor: &Accessor, _value: Value, _coercion: CoercionId) -> Predicate {
    Predicate::is_not_null(accessor.field)
}

fn build_is_empty(accessor: &Accessor, _value: Value, _coercion: CoercionId) -> Predicate {
    Predicate::is_empty(accessor.field)
}

fn build_is_not_empty(accessor: &Accessor, _value: Value, _coercion: CoercionId) -> Predicate {
    Predicate::is_not_empty(accessor.field)
}
