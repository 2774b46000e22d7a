use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate},
    value::{CoercionId, Value},
};
use serde::Serialize;
use tracing::trace;

///
/// SqlParam
///
/// Typed bind parameter. Values keep their kind all the way to the driver
/// instead of flattening to strings and leaning on backend casts.
/// Timestamps travel as RFC 3339 text.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlParam {
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
    Uint(u64),
}

impl SqlParam {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Renders a predicate graph as a SQL WHERE fragment with `?` placeholders
/// and the parameter list in placeholder order. Field names come from the
/// entity model, never from user input; literal values always travel as
/// parameters.
pub fn to_sql(predicate: &Predicate) -> (String, Vec<SqlParam>) {
    let mut params = Vec::new();
    let sql = render(predicate, &mut params);

    trace!(params = params.len(), "rendered predicate to sql");

    (sql, params)
}

fn render(predicate: &Predicate, params: &mut Vec<SqlParam>) -> String {
    match predicate {
        Predicate::True => "1=1".to_string(),
        Predicate::False => "1=0".to_string(),
        Predicate::And(children) => join(children, " AND ", "1=1", params),
        Predicate::Or(children) => join(children, " OR ", "1=0", params),
        Predicate::Not(inner) => format!("NOT ({})", render(inner, params)),
        Predicate::Compare(cmp) => render_compare(cmp, params),
        Predicate::IsNull { field } => format!("{field} IS NULL"),
        Predicate::IsNotNull { field } => format!("{field} IS NOT NULL"),
        Predicate::IsEmpty { field } => format!("trim({field}) = ''"),
        Predicate::IsNotEmpty { field } => format!("trim({field}) <> ''"),
    }
}

fn join(
    children: &[Predicate],
    separator: &str,
    neutral: &str,
    params: &mut Vec<SqlParam>,
) -> String {
    if children.is_empty() {
        return neutral.to_string();
    }

    children
        .iter()
        .map(|child| format!("({})", render(child, params)))
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_compare(cmp: &ComparePredicate, params: &mut Vec<SqlParam>) -> String {
    let column = column_expr(&cmp.field, cmp.coercion);

    match cmp.op {
        CompareOp::Eq => binary(&column, "=", &cmp.value, params),
        CompareOp::Ne => binary(&column, "<>", &cmp.value, params),
        CompareOp::Gt => binary(&column, ">", &cmp.value, params),
        CompareOp::Gte => binary(&column, ">=", &cmp.value, params),
        CompareOp::Lt => binary(&column, "<", &cmp.value, params),
        CompareOp::Lte => binary(&column, "<=", &cmp.value, params),
        CompareOp::Contains => like(&column, &cmp.value, "%", "%", params),
        CompareOp::StartsWith => like(&column, &cmp.value, "", "%", params),
        CompareOp::EndsWith => like(&column, &cmp.value, "%", "", params),
        CompareOp::Like => {
            // The pattern already carries its wildcards; they must survive.
            params.push(param_value(&cmp.value));
            format!("{column} LIKE ?")
        }
        CompareOp::In => {
            let Value::List(candidates) = &cmp.value else {
                return "1=0".to_string();
            };
            if candidates.is_empty() {
                return "1=0".to_string();
            }

            let placeholders = vec!["?"; candidates.len()].join(", ");
            for candidate in candidates {
                params.push(param_value(candidate));
            }
            format!("{column} IN ({placeholders})")
        }
        CompareOp::AnyEq => {
            params.push(param_value(&cmp.value));
            match cmp.coercion {
                CoercionId::TextCasefold => format!(
                    "list_contains(list_transform({}, x -> lower(trim(x))), ?)",
                    cmp.field
                ),
                CoercionId::Strict => format!("list_contains({}, ?)", cmp.field),
            }
        }
    }
}

fn column_expr(field: &str, coercion: CoercionId) -> String {
    match coercion {
        CoercionId::TextCasefold => format!("lower(trim({field}))"),
        CoercionId::Strict => field.to_string(),
    }
}

fn binary(column: &str, op: &str, value: &Value, params: &mut Vec<SqlParam>) -> String {
    params.push(param_value(value));
    format!("{column} {op} ?")
}

fn like(
    column: &str,
    value: &Value,
    prefix: &str,
    suffix: &str,
    params: &mut Vec<SqlParam>,
) -> String {
    let literal = match value {
        Value::Text(text) => text.as_str(),
        _ => "",
    };
    let escaped = escape_like_pattern(literal);
    params.push(SqlParam::Text(format!("{prefix}{escaped}{suffix}")));
    format!("{column} LIKE ? ESCAPE '\\'")
}

/// Escapes LIKE metacharacters so a positional text test stays literal.
fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn param_value(value: &Value) -> SqlParam {
    match value {
        Value::Bool(v) => SqlParam::Bool(*v),
        Value::Float64(v) => SqlParam::Float(v.get()),
        Value::Int(v) => SqlParam::Int(*v),
        Value::Text(v) => SqlParam::Text(v.clone()),
        Value::Timestamp(v) => SqlParam::Text(v.to_rfc3339()),
        Value::Uint(v) => SqlParam::Uint(*v),
        Value::List(_) | Value::Null | Value::Unit => SqlParam::Text(String::new()),
    }
}
