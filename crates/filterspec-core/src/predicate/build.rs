use crate::{
    accessor::resolve,
    coercion::coerce_literal,
    error::BuildError,
    model::EntityKind,
    predicate::Predicate,
    registry::OperatorRegistry,
    spec::{Connector, FilterSpec},
};
use tracing::trace;

/// Compiles an ordered filter list into one predicate graph.
///
/// Lines fold strictly left to right: the running predicate starts at the
/// first line, and each later line joins through its own connector. There is
/// no grouping construct and no precedence between AND and OR. An empty list
/// matches everything. Any failure aborts the whole build.
pub fn build_predicate<E: EntityKind>(
    registry: &OperatorRegistry,
    specs: &[FilterSpec],
) -> Result<Predicate, BuildError> {
    trace!(
        entity = E::MODEL.entity_name,
        lines = specs.len(),
        "building filter predicate"
    );

    let mut lines = specs.iter();
    let Some(first) = lines.next() else {
        return Ok(Predicate::True);
    };

    let mut combined = build_line::<E>(registry, first)?;
    for spec in lines {
        let leaf = build_line::<E>(registry, spec)?;
        combined = match spec.connector {
            Connector::And => combined.and(leaf),
            Connector::Or => combined.or(leaf),
        };
    }

    Ok(combined)
}

fn build_line<E: EntityKind>(
    registry: &OperatorRegistry,
    spec: &FilterSpec,
) -> Result<Predicate, BuildError> {
    let accessor = resolve::<E>(&spec.field)?;
    let descriptor = registry.lookup(&spec.operator)?;

    if !descriptor.supports(&accessor.kind) {
        return Err(BuildError::UnsupportedOperatorForKind {
            field: spec.field.clone(),
            op: spec.operator.clone(),
            kind: accessor.kind.to_string(),
        });
    }

    let (value, coercion) = coerce_literal(&accessor, descriptor, &spec.value)?;
    let leaf = descriptor.build_node(&accessor, value, coercion);

    // Comparisons on optional fields must not match absent values, so every
    // operator except the presence checks gets an explicit guard node.
    if accessor.kind.is_optional() && !descriptor.is_presence_check() {
        Ok(Predicate::is_not_null(accessor.field).and(leaf))
    } else {
        Ok(leaf)
    }
}
