//! filterspec: a declarative filter-to-predicate compiler.
//!
//! Hosts declare their entities once ([`model::EntityKind`] and
//! [`model::EntityValue`]), then compile incoming filter lists with
//! [`build_predicate`] and either evaluate the result in memory or render it
//! as a parameterized WHERE fragment with [`pushdown::to_sql`].

pub use filterspec_core::{accessor, error, model, predicate, pushdown, registry, spec, value};

pub use filterspec_core::{
    error::BuildError,
    predicate::{Predicate, PredicateProgram, build_predicate, matches},
    registry::OperatorRegistry,
    spec::{Connector, FilterSpec},
    value::Value,
};

pub mod prelude {
    pub use filterspec_core::prelude::*;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::VERSION;

    struct Ticket {
        title: String,
        open: bool,
    }

    static TICKET_MODEL: EntityModel = EntityModel {
        path: "filterspec::tests::Ticket",
        entity_name: "ticket",
        fields: &[
            FieldModel {
                name: "title",
                kind: FieldKind::Text,
            },
            FieldModel {
                name: "open",
                kind: FieldKind::Bool,
            },
        ],
    };

    impl EntityKind for Ticket {
        const MODEL: &'static EntityModel = &TICKET_MODEL;
    }

    impl EntityValue for Ticket {
        fn field_value(&self, slot: usize) -> Option<Value> {
            match slot {
                0 => Some(Value::Text(self.title.clone())),
                1 => Some(Value::Bool(self.open)),
                _ => None,
            }
        }
    }

    #[test]
    fn end_to_end_through_the_facade() {
        let specs: Vec<FilterSpec> = serde_json::from_str(
            r#"[
                {"field": "title", "operator": "contains", "value": "outage"},
                {"field": "open", "operator": "equals", "value": true}
            ]"#,
        )
        .unwrap();

        let predicate = build_predicate::<Ticket>(&OperatorRegistry::standard(), &specs).unwrap();

        let hit = Ticket {
            title: "Network Outage".to_string(),
            open: true,
        };
        let miss = Ticket {
            title: "Network Outage".to_string(),
            open: false,
        };
        assert!(matches(&predicate, &hit));
        assert!(!matches(&predicate, &miss));

        let (sql, params) = to_sql(&predicate);
        assert_eq!(sql, "(lower(trim(title)) LIKE ? ESCAPE '\\') AND (open = ?)");
        assert_eq!(
            params,
            vec![SqlParam::text("%outage%"), SqlParam::Bool(true)]
        );
    }

    #[test]
    fn version_is_exposed() {
        assert!(!VERSION.is_empty());
    }
}
