use crate::{
    model::{EntityKind, EntityValue},
    predicate::{
        CompareOp, Predicate,
        resolved::{ResolvedCompare, ResolvedPredicate},
    },
    value::{
        Value,
        compare::{TextOp, compare_eq, compare_order, compare_text, like_match},
    },
};
use std::cmp::Ordering;
use tracing::trace;

///
/// PredicateProgram
///
/// A predicate graph compiled against one entity type: field names are
/// resolved to slots once, then evaluation is infallible. Comparisons that
/// do not apply (absent fields, kind mismatches) evaluate to false.
///

#[derive(Clone, Debug)]
pub struct PredicateProgram {
    resolved: ResolvedPredicate,
}

impl PredicateProgram {
    #[must_use]
    pub fn compile<E: EntityKind>(predicate: &Predicate) -> Self {
        trace!(entity = E::MODEL.entity_name, "compiling predicate program");

        Self {
            resolved: ResolvedPredicate::resolve::<E>(predicate),
        }
    }

    #[must_use]
    pub fn eval<E: EntityValue>(&self, entity: &E) -> bool {
        eval_node(&self.resolved, entity)
    }
}

/// One-shot compile-and-evaluate. Prefer [`PredicateProgram`] when the same
/// predicate runs against many entities.
pub fn matches<E: EntityValue>(predicate: &Predicate, entity: &E) -> bool {
    PredicateProgram::compile::<E>(predicate).eval(entity)
}

enum FieldPresence {
    Missing,
    Present(Value),
}

fn presence<E: EntityValue>(entity: &E, slot: Option<usize>) -> FieldPresence {
    match slot.and_then(|slot| entity.field_value(slot)) {
        None | Some(Value::Null) => FieldPresence::Missing,
        Some(value) => FieldPresence::Present(value),
    }
}

fn eval_node<E: EntityValue>(node: &ResolvedPredicate, entity: &E) -> bool {
    match node {
        ResolvedPredicate::True => true,
        ResolvedPredicate::False => false,
        ResolvedPredicate::And(children) => children.iter().all(|child| eval_node(child, entity)),
        ResolvedPredicate::Or(children) => children.iter().any(|child| eval_node(child, entity)),
        ResolvedPredicate::Not(inner) => !eval_node(inner, entity),
        ResolvedPredicate::Compare(cmp) => eval_compare(cmp, entity),
        ResolvedPredicate::IsNull { slot } => {
            matches!(presence(entity, *slot), FieldPresence::Missing)
        }
        ResolvedPredicate::IsNotNull { slot } => {
            matches!(presence(entity, *slot), FieldPresence::Present(_))
        }
        ResolvedPredicate::IsEmpty { slot } => match presence(entity, *slot) {
            FieldPresence::Present(Value::Text(text)) => text.trim().is_empty(),
            _ => false,
        },
        ResolvedPredicate::IsNotEmpty { slot } => match presence(entity, *slot) {
            FieldPresence::Present(Value::Text(text)) => !text.trim().is_empty(),
            _ => false,
        },
    }
}

fn eval_compare<E: EntityValue>(cmp: &ResolvedCompare, entity: &E) -> bool {
    let FieldPresence::Present(actual) = presence(entity, cmp.slot) else {
        return false;
    };

    eval_values(&actual, cmp).unwrap_or(false)
}

fn eval_values(actual: &Value, cmp: &ResolvedCompare) -> Option<bool> {
    match cmp.op {
        CompareOp::Eq => compare_eq(actual, &cmp.value, cmp.coercion),
        CompareOp::Ne => compare_eq(actual, &cmp.value, cmp.coercion).map(|eq| !eq),
        CompareOp::Gt => ordered(actual, cmp, Ordering::is_gt),
        CompareOp::Gte => ordered(actual, cmp, Ordering::is_ge),
        CompareOp::Lt => ordered(actual, cmp, Ordering::is_lt),
        CompareOp::Lte => ordered(actual, cmp, Ordering::is_le),
        CompareOp::Contains => compare_text(actual, &cmp.value, TextOp::Contains),
        CompareOp::StartsWith => compare_text(actual, &cmp.value, TextOp::StartsWith),
        CompareOp::EndsWith => compare_text(actual, &cmp.value, TextOp::EndsWith),
        CompareOp::Like => like_match(actual, &cmp.value),
        CompareOp::In => {
            let Value::List(candidates) = &cmp.value else {
                return Some(false);
            };
            Some(
                candidates
                    .iter()
                    .any(|candidate| compare_eq(actual, candidate, cmp.coercion) == Some(true)),
            )
        }
        CompareOp::AnyEq => {
            let Value::List(items) = actual else {
                return Some(false);
            };
            Some(
                items
                    .iter()
                    .any(|item| compare_eq(item, &cmp.value, cmp.coercion) == Some(true)),
            )
        }
    }
}

fn ordered(
    actual: &Value,
    cmp: &ResolvedCompare,
    test: fn(Ordering) -> bool,
) -> Option<bool> {
    compare_order(actual, &cmp.value, cmp.coercion).map(test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        predicate::build_predicate,
        registry::OperatorRegistry,
        spec::FilterSpec,
        test_fixtures::{Customer, customer},
        value::Timestamp,
    };
    use proptest::prelude::*;

    fn matching(specs: &[FilterSpec], entity: &Customer) -> bool {
        let predicate = build_predicate::<Customer>(&OperatorRegistry::standard(), specs).unwrap();
        matches(&predicate, entity)
    }

    #[test]
    fn smith_scenario_matches_any_field() {
        let specs = [
            FilterSpec::new("lastName", "contains", "smith"),
            FilterSpec::new("firstName", "contains", "smith").or(),
            FilterSpec::new("email", "contains", "smith").or(),
        ];

        let by_last = customer("Smithers", "Anna", "anna@example.com");
        let by_first = customer("Jones", "Smith", "sj@example.com");
        let by_email = customer("Brown", "Carol", "the.smiths@example.com");
        let none = customer("Jones", "Anna", "anna.j@example.com");

        assert!(matching(&specs, &by_last));
        assert!(matching(&specs, &by_first));
        assert!(matching(&specs, &by_email));
        assert!(!matching(&specs, &none));
    }

    #[test]
    fn equals_on_text_is_trimmed_and_case_insensitive() {
        let mut entity = customer("  SMITH ", "Anna", "a@example.com");
        assert!(matching(&[FilterSpec::new("lastName", "equals", "smith")], &entity));

        entity.last_name = "Smithers".to_string();
        assert!(!matching(&[FilterSpec::new("lastName", "equals", "smith")], &entity));
    }

    #[test]
    fn empty_candidate_set_matches_nothing() {
        let entity = customer("Smith", "Anna", "a@example.com");
        let specs = [FilterSpec::new("lastName", "in", Value::List(vec![]))];
        assert!(!matching(&specs, &entity));
    }

    #[test]
    fn not_in_of_an_empty_set_matches_everything() {
        let entity = customer("Smith", "Anna", "a@example.com");
        let specs = [FilterSpec::new("lastName", "notIn", Value::List(vec![]))];
        assert!(matching(&specs, &entity));
    }

    #[test]
    fn any_over_an_empty_collection_matches_nothing() {
        let mut entity = customer("Smith", "Anna", "a@example.com");
        entity.tags.clear();
        let specs = [FilterSpec::new("tags", "any", "premium")];
        assert!(!matching(&specs, &entity));
    }

    #[test]
    fn any_matches_one_element_case_insensitively() {
        let mut entity = customer("Smith", "Anna", "a@example.com");
        entity.tags = vec!["Premium".to_string(), "beta".to_string()];
        assert!(matching(&[FilterSpec::new("tags", "any", "PREMIUM")], &entity));
        assert!(!matching(&[FilterSpec::new("tags", "any", "trial")], &entity));
    }

    #[test]
    fn absent_optional_field_never_matches_value_operators() {
        let entity = customer("Smith", "Anna", "a@example.com");
        assert!(entity.nickname.is_none());

        for operator in ["equals", "!=", "contains", "startsWith", "isEmpty", "isNotEmpty"] {
            let specs = [FilterSpec::new("nickname", operator, "ann")];
            assert!(!matching(&specs, &entity), "operator {operator} matched an absent field");
        }

        assert!(matching(&[FilterSpec::new("nickname", "isNull", Value::Null)], &entity));
        assert!(!matching(&[FilterSpec::new("nickname", "isNotNull", Value::Null)], &entity));
    }

    #[test]
    fn empty_checks_distinguish_blank_from_absent() {
        let mut entity = customer("Smith", "Anna", "a@example.com");

        entity.nickname = Some("  ".to_string());
        assert!(matching(&[FilterSpec::new("nickname", "isEmpty", Value::Null)], &entity));
        assert!(!matching(&[FilterSpec::new("nickname", "isNotEmpty", Value::Null)], &entity));

        entity.nickname = Some("Ann".to_string());
        assert!(!matching(&[FilterSpec::new("nickname", "isEmpty", Value::Null)], &entity));
        assert!(matching(&[FilterSpec::new("nickname", "isNotEmpty", Value::Null)], &entity));
    }

    #[test]
    fn numeric_ordering() {
        let mut entity = customer("Smith", "Anna", "a@example.com");
        entity.age = 42;

        assert!(matching(&[FilterSpec::new("age", ">", 40_i64)], &entity));
        assert!(matching(&[FilterSpec::new("age", "<=", 42_i64)], &entity));
        assert!(!matching(&[FilterSpec::new("age", "<", 42_i64)], &entity));
        // Text literals coerce into the field kind before comparison.
        assert!(matching(&[FilterSpec::new("age", ">=", "42")], &entity));
    }

    #[test]
    fn timestamp_ordering_with_aliases() {
        let mut entity = customer("Smith", "Anna", "a@example.com");
        entity.created_at = Timestamp::parse_rfc3339("2024-06-01T00:00:00Z").unwrap();

        let after = [FilterSpec::new("createdAt", "after", "2024-01-01T00:00:00Z")];
        let before = [FilterSpec::new("createdAt", "before", "2024-01-01T00:00:00Z")];
        assert!(matching(&after, &entity));
        assert!(!matching(&before, &entity));
    }

    #[test]
    fn like_is_containment_with_wildcards() {
        let entity = customer("Smithson", "Anna", "a@example.com");
        assert!(matching(&[FilterSpec::new("lastName", "like", "smith")], &entity));
        assert!(!matching(&[FilterSpec::new("lastName", "like", "jones")], &entity));
    }

    #[test]
    fn like_underscore_follows_sql_semantics() {
        // `_` is a single-character wildcard, exactly as the pushed-down
        // LIKE treats it.
        let entity = customer("Smith", "Anna", "a@example.com");
        assert!(matching(&[FilterSpec::new("lastName", "like", "sm_th")], &entity));
        assert!(!matching(&[FilterSpec::new("lastName", "like", "sm_h")], &entity));

        let entity = customer("Smyth", "Anna", "a@example.com");
        assert!(matching(&[FilterSpec::new("lastName", "like", "sm_th")], &entity));
    }

    #[test]
    fn notcontains_is_the_complement_on_present_text() {
        let entity = customer("Smith", "Anna", "a@example.com");
        assert!(!matching(&[FilterSpec::new("lastName", "notcontains", "mit")], &entity));
        assert!(matching(&[FilterSpec::new("lastName", "notcontains", "jones")], &entity));
    }

    #[test]
    fn compiled_program_is_reusable() {
        let predicate = build_predicate::<Customer>(
            &OperatorRegistry::standard(),
            &[FilterSpec::new("vip", "equals", true)],
        )
        .unwrap();
        let program = PredicateProgram::compile::<Customer>(&predicate);

        let mut entity = customer("Smith", "Anna", "a@example.com");
        entity.vip = true;
        assert!(program.eval(&entity));
        entity.vip = false;
        assert!(!program.eval(&entity));
    }

    proptest! {
        #[test]
        fn eq_and_ne_are_complements_on_present_values(
            last in "[A-Za-z]{1,12}",
            needle in "[A-Za-z]{1,12}",
        ) {
            let entity = customer(&last, "Anna", "a@example.com");
            let eq = matching(&[FilterSpec::new("lastName", "equals", needle.clone())], &entity);
            let ne = matching(&[FilterSpec::new("lastName", "!=", needle)], &entity);
            prop_assert_ne!(eq, ne);
        }

        #[test]
        fn is_null_and_is_not_null_are_complements(nickname in proptest::option::of("[a-z]{0,8}")) {
            let mut entity = customer("Smith", "Anna", "a@example.com");
            entity.nickname = nickname;

            let null = matching(&[FilterSpec::new("nickname", "isNull", Value::Null)], &entity);
            let not_null = matching(&[FilterSpec::new("nickname", "isNotNull", Value::Null)], &entity);
            prop_assert_ne!(null, not_null);
        }

        #[test]
        fn contained_in_matches_exactly_set_membership(
            age in 0_u64..100,
            candidates in proptest::collection::vec(0_i64..100, 0..6),
        ) {
            let mut entity = customer("Smith", "Anna", "a@example.com");
            entity.age = age;

            let expected = candidates.iter().any(|c| u64::try_from(*c) == Ok(age));
            let raw: Value = candidates.into();
            let got = matching(&[FilterSpec::new("age", "containedIn", raw)], &entity);
            prop_assert_eq!(got, expected);
        }
    }
}
