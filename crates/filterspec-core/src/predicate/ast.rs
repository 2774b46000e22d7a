use crate::value::{CoercionId, Value};
use serde::Serialize;
use std::ops::{BitAnd, BitOr, Not};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// Collection field: at least one element equals the literal.
    AnyEq,
    Contains,
    EndsWith,
    Eq,
    Gt,
    Gte,
    /// Field value is a member of the literal list.
    In,
    Like,
    Lt,
    Lte,
    Ne,
    StartsWith,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
    pub coercion: CoercionId,
}

impl ComparePredicate {
    pub fn new(
        field: impl Into<String>,
        op: CompareOp,
        value: Value,
        coercion: CoercionId,
    ) -> Self {
        Self {
            field: field.into(),
            op,
            value,
            coercion,
        }
    }
}

///
/// Predicate
///
/// Immutable node graph produced by one build. Leaves compare a single field
/// against an already-coerced literal; interior nodes combine. `True` is the
/// result of an empty filter list.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Predicate {
    True,
    False,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare(ComparePredicate),
    IsEmpty { field: String },
    IsNotEmpty { field: String },
    IsNotNull { field: String },
    IsNull { field: String },
}

impl Predicate {
    pub fn compare(
        field: impl Into<String>,
        op: CompareOp,
        value: Value,
        coercion: CoercionId,
    ) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value, coercion))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
        }
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNotNull {
            field: field.into(),
        }
    }

    pub fn is_empty(field: impl Into<String>) -> Self {
        Self::IsEmpty {
            field: field.into(),
        }
    }

    pub fn is_not_empty(field: impl Into<String>) -> Self {
        Self::IsNotEmpty {
            field: field.into(),
        }
    }

    /// Conjunction. Same-operator children flatten into one node, which
    /// preserves truth values because AND is associative.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), right) => {
                left.push(right);
                Self::And(left)
            }
            (left, Self::And(mut right)) => {
                right.insert(0, left);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Disjunction, flattening like [`Self::and`].
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), right) => {
                left.push(right);
                Self::Or(left)
            }
            (left, Self::Or(mut right)) => {
                right.insert(0, left);
                Self::Or(right)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    /// Logical negation, folding constants and double negation eagerly.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }

    /// Constant folding and flattening. Evaluation does not require it; it
    /// keeps pushed-down SQL small.
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::And(children) => {
                let mut out = Vec::with_capacity(children.len());
                for child in children {
                    match child.simplify() {
                        Self::True => {}
                        Self::False => return Self::False,
                        Self::And(nested) => out.extend(nested),
                        other => out.push(other),
                    }
                }
                match out.len() {
                    0 => Self::True,
                    1 => out.remove(0),
                    _ => Self::And(out),
                }
            }
            Self::Or(children) => {
                let mut out = Vec::with_capacity(children.len());
                for child in children {
                    match child.simplify() {
                        Self::False => {}
                        Self::True => return Self::True,
                        Self::Or(nested) => out.extend(nested),
                        other => out.push(other),
                    }
                }
                match out.len() {
                    0 => Self::False,
                    1 => out.remove(0),
                    _ => Self::Or(out),
                }
            }
            Self::Not(inner) => inner.simplify().negate(),
            // Membership in an empty candidate set never holds.
            Self::Compare(cmp)
                if cmp.op == CompareOp::In
                    && matches!(&cmp.value, Value::List(items) if items.is_empty()) =>
            {
                Self::False
            }
            leaf => leaf,
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}
