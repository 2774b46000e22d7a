use crate::{
    error::BuildError,
    model::{EntityKind, FieldKind},
};
use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

///
/// Accessor
///
/// Resolved handle for one entity field: the slot the runtime reads and the
/// declared kind the builder validates against. Cheap to copy; valid for the
/// process lifetime.
///

#[derive(Clone, Copy, Debug)]
pub struct Accessor {
    pub entity: &'static str,
    pub field: &'static str,
    pub slot: usize,
    pub kind: FieldKind,
}

type FieldTable = BTreeMap<&'static str, Accessor>;

/// Append-only registry of field tables, keyed by entity path. Entries are
/// leaked on first resolution; concurrent duplicate population is harmless
/// because every builder produces an identical table.
static TABLES: RwLock<BTreeMap<&'static str, &'static FieldTable>> =
    RwLock::new(BTreeMap::new());

/// Resolves a field name against the entity's model.
pub fn resolve<E: EntityKind>(field: &str) -> Result<Accessor, BuildError> {
    table_for::<E>()
        .get(field)
        .copied()
        .ok_or_else(|| BuildError::unknown_field(E::MODEL.entity_name, field))
}

fn table_for<E: EntityKind>() -> &'static FieldTable {
    let path = E::MODEL.path;

    {
        let tables = TABLES.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(path) {
            return table;
        }
    }

    let built: FieldTable = E::MODEL
        .fields
        .iter()
        .enumerate()
        .map(|(slot, field)| {
            (
                field.name,
                Accessor {
                    entity: E::MODEL.entity_name,
                    field: field.name,
                    slot,
                    kind: field.kind,
                },
            )
        })
        .collect();

    let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
    *tables.entry(path).or_insert_with(|| Box::leak(Box::new(built)))
}
