//! Shared fixture entity for module tests.

use crate::{
    model::{EntityKind, EntityModel, EntityValue, FieldKind, FieldModel},
    value::{Float64, Timestamp, Value},
};

#[derive(Clone, Debug)]
pub(crate) struct Customer {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub age: u64,
    pub vip: bool,
    pub score: Float64,
    pub created_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub nickname: Option<String>,
    pub tags: Vec<String>,
}

static CUSTOMER_MODEL: EntityModel = EntityModel {
    path: "filterspec::test_fixtures::Customer",
    entity_name: "customer",
    fields: &[
        FieldModel {
            name: "lastName",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "firstName",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "email",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "age",
            kind: FieldKind::Uint,
        },
        FieldModel {
            name: "vip",
            kind: FieldKind::Bool,
        },
        FieldModel {
            name: "score",
            kind: FieldKind::Float64,
        },
        FieldModel {
            name: "createdAt",
            kind: FieldKind::Timestamp,
        },
        FieldModel {
            name: "deletedAt",
            kind: FieldKind::Option(&FieldKind::Timestamp),
        },
        FieldModel {
            name: "nickname",
            kind: FieldKind::Option(&FieldKind::Text),
        },
        FieldModel {
            name: "tags",
            kind: FieldKind::List(&FieldKind::Text),
        },
    ],
};

impl EntityKind for Customer {
    const MODEL: &'static EntityModel = &CUSTOMER_MODEL;
}

impl EntityValue for Customer {
    fn field_value(&self, slot: usize) -> Option<Value> {
        match slot {
            0 => Some(Value::Text(self.last_name.clone())),
            1 => Some(Value::Text(self.first_name.clone())),
            2 => Some(Value::Text(self.email.clone())),
            3 => Some(Value::Uint(self.age)),
            4 => Some(Value::Bool(self.vip)),
            5 => Some(Value::Float64(self.score)),
            6 => Some(Value::Timestamp(self.created_at)),
            7 => Some(self.deleted_at.map_or(Value::Null, Value::Timestamp)),
            8 => Some(self.nickname.clone().map_or(Value::Null, Value::Text)),
            9 => Some(Value::List(
                self.tags.iter().cloned().map(Value::Text).collect(),
            )),
            _ => None,
        }
    }
}

/// Fixture with sensible defaults; tests overwrite the fields they exercise.
pub(crate) fn customer(last_name: &str, first_name: &str, email: &str) -> Customer {
    Customer {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
        email: email.to_string(),
        age: 30,
        vip: false,
        score: Float64::try_new(0.5).unwrap(),
        created_at: Timestamp::parse_rfc3339("2024-01-15T09:00:00Z").unwrap(),
        deleted_at: None,
        nickname: None,
        tags: vec!["standard".to_string()],
    }
}
