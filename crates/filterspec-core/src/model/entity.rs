use crate::model::FieldModel;

///
/// EntityModel
///
/// Static description of one filterable entity type. `path` is the unique
/// registration key; `entity_name` is what error messages show; field order
/// fixes the slot indices used by accessors and the evaluation runtime.
///

#[derive(Debug)]
pub struct EntityModel {
    pub path: &'static str,
    pub entity_name: &'static str,
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    #[must_use]
    pub fn field_slot(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn field(&self, slot: usize) -> Option<&FieldModel> {
        self.fields.get(slot)
    }
}
