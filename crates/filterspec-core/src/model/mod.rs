mod entity;
mod field;

pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};

use crate::value::Value;

///
/// EntityKind
///
/// Implemented by every filterable entity type. The model is a static table
/// of field names and kinds, declared once per type.
///

pub trait EntityKind {
    const MODEL: &'static EntityModel;
}

///
/// EntityValue
///
/// Runtime field access by slot index. Slots are positions in
/// `MODEL.fields`; `None` and `Some(Value::Null)` both mean the field holds
/// no value.
///

pub trait EntityValue: EntityKind {
    fn field_value(&self, slot: usize) -> Option<Value>;
}
