use crate::{
    accessor::Accessor,
    error::BuildError,
    model::FieldKind,
    registry::{OperatorDescriptor, OperatorToken, ValueArity},
    value::{CoercionId, Float64, Timestamp, Value, compare::casefold},
};

/// Coerces a raw filter literal into the accessor's field kind and picks the
/// comparison policy the resulting node carries. Failure is a hard error;
/// there are no default values.
pub(crate) fn coerce_literal(
    accessor: &Accessor,
    descriptor: &OperatorDescriptor,
    raw: &Value,
) -> Result<(Value, CoercionId), BuildError> {
    if descriptor.ignores_value() {
        return Ok((Value::Unit, CoercionId::Strict));
    }

    let kind = accessor.kind.unwrap_optional();

    if descriptor.token == OperatorToken::Any {
        let element = kind.element().ok_or_else(|| {
            BuildError::incompatible_value(accessor.field, "field is not a collection")
        })?;
        let coerced = coerce_scalar(accessor, element, raw)?;
        return Ok((coerced, policy_for(element)));
    }

    match descriptor.arity {
        ValueArity::Many => {
            // Membership candidates. A bare scalar is accepted as a
            // single-element set.
            let raw_items = match raw {
                Value::List(items) => items.clone(),
                Value::Null => {
                    return Err(BuildError::incompatible_value(
                        accessor.field,
                        "membership operator requires a candidate list",
                    ));
                }
                scalar => vec![scalar.clone()],
            };

            let mut items = Vec::with_capacity(raw_items.len());
            for item in &raw_items {
                items.push(coerce_scalar(accessor, kind, item)?);
            }

            Ok((Value::List(items), policy_for(kind)))
        }
        ValueArity::Scalar => {
            let coerced = coerce_scalar(accessor, kind, raw)?;
            Ok((coerced, policy_for(kind)))
        }
        ValueArity::None => Ok((Value::Unit, CoercionId::Strict)),
    }
}

const fn policy_for(kind: &FieldKind) -> CoercionId {
    if kind.is_text() {
        CoercionId::TextCasefold
    } else {
        CoercionId::Strict
    }
}

fn coerce_scalar(
    accessor: &Accessor,
    kind: &FieldKind,
    raw: &Value,
) -> Result<Value, BuildError> {
    match kind {
        FieldKind::Option(inner) => coerce_scalar(accessor, inner, raw),

        FieldKind::Text => match raw {
            Value::Text(text) => Ok(Value::Text(casefold(text))),
            other => Err(mismatch(accessor, "text", other)),
        },

        FieldKind::Int => match raw {
            Value::Int(v) => Ok(Value::Int(*v)),
            Value::Uint(v) => i64::try_from(*v)
                .map(Value::Int)
                .map_err(|_| out_of_range(accessor, "a signed 64-bit integer")),
            Value::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| unparsable(accessor, text, "an integer")),
            other => Err(mismatch(accessor, "an integer", other)),
        },

        FieldKind::Uint => match raw {
            Value::Uint(v) => Ok(Value::Uint(*v)),
            Value::Int(v) => u64::try_from(*v)
                .map(Value::Uint)
                .map_err(|_| out_of_range(accessor, "an unsigned integer")),
            Value::Text(text) => text
                .trim()
                .parse::<u64>()
                .map(Value::Uint)
                .map_err(|_| unparsable(accessor, text, "an unsigned integer")),
            other => Err(mismatch(accessor, "an unsigned integer", other)),
        },

        FieldKind::Float64 => match raw {
            Value::Float64(v) => Ok(Value::Float64(*v)),
            Value::Int(v) => float_value(accessor, *v as f64),
            Value::Uint(v) => float_value(accessor, *v as f64),
            Value::Text(text) => {
                let parsed = text
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| unparsable(accessor, text, "a number"))?;
                float_value(accessor, parsed)
            }
            other => Err(mismatch(accessor, "a number", other)),
        },

        FieldKind::Bool => match raw {
            Value::Bool(v) => Ok(Value::Bool(*v)),
            Value::Text(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(unparsable(accessor, text, "a boolean"))
                }
            }
            other => Err(mismatch(accessor, "a boolean", other)),
        },

        FieldKind::Timestamp => match raw {
            Value::Timestamp(v) => Ok(Value::Timestamp(*v)),
            Value::Text(text) => Timestamp::parse_rfc3339(text.trim())
                .map(Value::Timestamp)
                .ok_or_else(|| unparsable(accessor, text, "an RFC 3339 timestamp")),
            Value::Int(secs) => unix_timestamp(accessor, *secs),
            Value::Uint(secs) => {
                let secs = i64::try_from(*secs)
                    .map_err(|_| out_of_range(accessor, "a Unix timestamp"))?;
                unix_timestamp(accessor, secs)
            }
            other => Err(mismatch(accessor, "a timestamp", other)),
        },

        FieldKind::List(_) => Err(BuildError::incompatible_value(
            accessor.field,
            "collection fields only admit the 'any' operator",
        )),
    }
}

fn float_value(accessor: &Accessor, value: f64) -> Result<Value, BuildError> {
    Float64::try_new(value)
        .map(Value::Float64)
        .map_err(|err| BuildError::incompatible_value(accessor.field, err.to_string()))
}

fn unix_timestamp(accessor: &Accessor, secs: i64) -> Result<Value, BuildError> {
    Timestamp::from_unix_seconds(secs)
        .map(Value::Timestamp)
        .ok_or_else(|| out_of_range(accessor, "a Unix timestamp"))
}

fn mismatch(accessor: &Accessor, expected: &str, got: &Value) -> BuildError {
    BuildError::incompatible_value(
        accessor.field,
        format!("expected {expected}, got {}", got.kind_name()),
    )
}

fn unparsable(accessor: &Accessor, text: &str, expected: &str) -> BuildError {
    BuildError::incompatible_value(
        accessor.field,
        format!("cannot parse '{}' as {expected}", text.trim()),
    )
}

fn out_of_range(accessor: &Accessor, expected: &str) -> BuildError {
    BuildError::incompatible_value(accessor.field, format!("value does not fit {expected}"))
}
