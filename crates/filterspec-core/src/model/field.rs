use crate::value::KindClass;
use std::fmt;

///
/// FieldKind
///
/// Declared type of an entity field. Nesting goes through `&'static` so
/// entity models stay const-constructible.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Float64,
    Int,
    List(&'static FieldKind),
    Option(&'static FieldKind),
    Text,
    Timestamp,
    Uint,
}

impl FieldKind {
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Option(_))
    }

    /// The kind comparisons operate on, with optionality stripped.
    #[must_use]
    pub const fn unwrap_optional(&self) -> &Self {
        let mut kind = self;
        while let Self::Option(inner) = *kind {
            kind = inner;
        }
        kind
    }

    /// Element kind of a collection field, after stripping optionality.
    #[must_use]
    pub const fn element(&self) -> Option<&'static Self> {
        match *self.unwrap_optional() {
            Self::List(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub const fn class(&self) -> KindClass {
        match self.unwrap_optional() {
            Self::Bool => KindClass::Bool,
            Self::Float64 | Self::Int | Self::Uint => KindClass::Numeric,
            Self::List(_) => KindClass::Collection,
            Self::Text => KindClass::Textual,
            Self::Timestamp => KindClass::Temporal,
            Self::Option(_) => unreachable!(),
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.unwrap_optional(), Self::Text)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("Bool"),
            Self::Float64 => f.write_str("Float64"),
            Self::Int => f.write_str("Int"),
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Option(inner) => write!(f, "Option<{inner}>"),
            Self::Text => f.write_str("Text"),
            Self::Timestamp => f.write_str("Timestamp"),
            Self::Uint => f.write_str("Uint"),
        }
    }
}

///
/// FieldModel
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub kind: FieldKind,
}
