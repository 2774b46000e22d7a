use crate::{
    model::EntityKind,
    predicate::{CompareOp, Predicate},
    value::{CoercionId, Value},
};

///
/// ResolvedPredicate
///
/// Predicate graph with field names replaced by slot indices, resolved once
/// per entity type at compile time. A name that does not exist on the target
/// entity resolves to no slot and evaluates as a non-match; it never panics.
///

#[derive(Clone, Debug)]
pub(crate) enum ResolvedPredicate {
    True,
    False,
    And(Vec<ResolvedPredicate>),
    Or(Vec<ResolvedPredicate>),
    Not(Box<ResolvedPredicate>),
    Compare(ResolvedCompare),
    IsEmpty { slot: Option<usize> },
    IsNotEmpty { slot: Option<usize> },
    IsNotNull { slot: Option<usize> },
    IsNull { slot: Option<usize> },
}

///
/// ResolvedCompare
///

#[derive(Clone, Debug)]
pub(crate) struct ResolvedCompare {
    pub slot: Option<usize>,
    pub op: CompareOp,
    pub value: Value,
    pub coercion: CoercionId,
}

impl ResolvedPredicate {
    pub(crate) fn resolve<E: EntityKind>(predicate: &Predicate) -> Self {
        match predicate {
            Predicate::True => Self::True,
            Predicate::False => Self::False,
            Predicate::And(children) => {
                Self::And(children.iter().map(Self::resolve::<E>).collect())
            }
            Predicate::Or(children) => Self::Or(children.iter().map(Self::resolve::<E>).collect()),
            Predicate::Not(inner) => Self::Not(Box::new(Self::resolve::<E>(inner))),
            Predicate::Compare(cmp) => Self::Compare(ResolvedCompare {
                slot: E::MODEL.field_slot(&cmp.field),
                op: cmp.op,
                value: cmp.value.clone(),
                coercion: cmp.coercion,
            }),
            Predicate::IsEmpty { field } => Self::IsEmpty {
                slot: E::MODEL.field_slot(field),
            },
            Predicate::IsNotEmpty { field } => Self::IsNotEmpty {
                slot: E::MODEL.field_slot(field),
            },
            Predicate::IsNotNull { field } => Self::IsNotNull {
                slot: E::MODEL.field_slot(field),
            },
            Predicate::IsNull { field } => Self::IsNull {
                slot: E::MODEL.field_slot(field),
            },
        }
    }
}
