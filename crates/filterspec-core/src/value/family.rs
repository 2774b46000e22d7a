///
/// KindClass
///
/// Coarse classification of field kinds, used by the operator registry to
/// decide which operators a field admits. Optionality is orthogonal and is
/// stripped before classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KindClass {
    Bool,
    Collection,
    Numeric,
    Temporal,
    Textual,
}

impl KindClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Collection => "collection",
            Self::Numeric => "numeric",
            Self::Temporal => "temporal",
            Self::Textual => "textual",
        }
    }
}

impl std::fmt::Display for KindClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
