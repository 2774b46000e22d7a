use crate::value::Value;
use serde::Serialize;
use std::cmp::Ordering;

///
/// CoercionId
///
/// Comparison policy carried by every compare node. Literals are already
/// coerced into the field's kind at build time, so evaluation only has to
/// choose between exact comparison and symmetric text folding.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionId {
    Strict,
    TextCasefold,
}

///
/// TextOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TextOp {
    Contains,
    EndsWith,
    StartsWith,
}

/// Canonical text form for case-insensitive comparison: trim, then lowercase.
/// Applied to both sides of a comparison, never one.
pub(crate) fn casefold(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Equality under the given policy. `None` means the pair is not comparable;
/// the runtime maps that to a non-match.
pub(crate) fn compare_eq(left: &Value, right: &Value, coercion: CoercionId) -> Option<bool> {
    match coercion {
        CoercionId::TextCasefold => match (left, right) {
            (Value::Text(a), Value::Text(b)) => Some(casefold(a) == casefold(b)),
            _ => None,
        },
        CoercionId::Strict => strict_eq(left, right),
    }
}

fn strict_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::Float64(a), Value::Float64(b)) => Some(a == b),
        (Value::Int(a), Value::Int(b)) => Some(a == b),
        (Value::Text(a), Value::Text(b)) => Some(a == b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a == b),
        (Value::Uint(a), Value::Uint(b)) => Some(a == b),
        // Signed/unsigned splits happen when positive JSON integers land in
        // a signed field or vice versa.
        (Value::Int(a), Value::Uint(b)) => Some(u64::try_from(*a).is_ok_and(|a| a == *b)),
        (Value::Uint(a), Value::Int(b)) => Some(u64::try_from(*b).is_ok_and(|b| b == *a)),
        _ => None,
    }
}

/// Ordered comparison under the given policy. Same-kind values only; bools
/// and collections do not order.
pub(crate) fn compare_order(
    left: &Value,
    right: &Value,
    coercion: CoercionId,
) -> Option<Ordering> {
    match coercion {
        CoercionId::TextCasefold => match (left, right) {
            (Value::Text(a), Value::Text(b)) => Some(casefold(a).cmp(&casefold(b))),
            _ => None,
        },
        CoercionId::Strict => strict_order_cmp(left, right),
    }
}

pub(crate) fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => match u64::try_from(*a) {
            Ok(a) => Some(a.cmp(b)),
            Err(_) => Some(Ordering::Less),
        },
        (Value::Uint(a), Value::Int(b)) => match u64::try_from(*b) {
            Ok(b) => Some(a.cmp(&b)),
            Err(_) => Some(Ordering::Greater),
        },
        _ => None,
    }
}

/// Case-insensitive positional text test. Both sides fold.
pub(crate) fn compare_text(left: &Value, right: &Value, op: TextOp) -> Option<bool> {
    let (Value::Text(actual), Value::Text(needle)) = (left, right) else {
        return None;
    };
    let actual = casefold(actual);
    let needle = casefold(needle);

    Some(match op {
        TextOp::Contains => actual.contains(&needle),
        TextOp::EndsWith => actual.ends_with(&needle),
        TextOp::StartsWith => actual.starts_with(&needle),
    })
}

/// Wildcard containment with SQL LIKE semantics: `%` matches any run of
/// characters, `_` matches exactly one, everything else is literal. Both
/// sides fold before matching, and push-down renders the same pattern into
/// backend LIKE, so both executors agree.
pub(crate) fn like_match(left: &Value, pattern: &Value) -> Option<bool> {
    let (Value::Text(actual), Value::Text(pattern)) = (left, pattern) else {
        return None;
    };

    Some(wildcard_match(&casefold(actual), &casefold(pattern)))
}

fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // Greedy walk with backtracking to the most recent `%`.
    let mut t = 0;
    let mut p = 0;
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            t += 1;
            p += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            resume = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = resume {
            p = star_p + 1;
            t = star_t + 1;
            resume = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '%' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casefold_eq_ignores_case_and_padding() {
        let a = Value::text("  Smith ");
        let b = Value::text("sMITH");
        assert_eq!(compare_eq(&a, &b, CoercionId::TextCasefold), Some(true));
        assert_eq!(compare_eq(&a, &b, CoercionId::Strict), Some(false));
    }

    #[test]
    fn strict_eq_is_same_kind_only() {
        assert_eq!(
            compare_eq(&Value::Int(1), &Value::Bool(true), CoercionId::Strict),
            None
        );
        assert_eq!(
            compare_eq(&Value::Int(5), &Value::Uint(5), CoercionId::Strict),
            Some(true)
        );
        assert_eq!(
            compare_eq(&Value::Int(-5), &Value::Uint(5), CoercionId::Strict),
            Some(false)
        );
    }

    #[test]
    fn order_spans_signedness() {
        assert_eq!(
            strict_order_cmp(&Value::Int(-1), &Value::Uint(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            strict_order_cmp(&Value::Uint(10), &Value::Int(3)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn text_ops_fold_both_sides() {
        let actual = Value::text("Anna SMITH");
        assert_eq!(
            compare_text(&actual, &Value::text("smith"), TextOp::EndsWith),
            Some(true)
        );
        assert_eq!(
            compare_text(&actual, &Value::text("ANNA"), TextOp::StartsWith),
            Some(true)
        );
        assert_eq!(
            compare_text(&actual, &Value::text("na sm"), TextOp::Contains),
            Some(true)
        );
        assert_eq!(
            compare_text(&actual, &Value::text("jones"), TextOp::Contains),
            Some(false)
        );
    }

    #[test]
    fn text_ops_require_text() {
        assert_eq!(
            compare_text(&Value::Int(1), &Value::text("1"), TextOp::Contains),
            None
        );
    }

    #[test]
    fn wildcard_matching() {
        assert!(wildcard_match("anna smith", "%smith%"));
        assert!(wildcard_match("anna smith", "anna%"));
        assert!(wildcard_match("anna smith", "%smith"));
        assert!(wildcard_match("anna smith", "a%a%h"));
        assert!(!wildcard_match("anna smith", "%jones%"));
        assert!(!wildcard_match("anna smith", "smith%"));
        assert!(wildcard_match("exact", "exact"));
        assert!(!wildcard_match("exact", "exac"));
    }

    #[test]
    fn underscore_matches_exactly_one_character() {
        assert!(wildcard_match("smith", "sm_th"));
        assert!(wildcard_match("smith", "%sm_th%"));
        assert!(!wildcard_match("smth", "sm_th"));
        assert!(!wildcard_match("smiith", "sm_th"));
        assert!(wildcard_match("smiith", "sm__th"));
        assert!(wildcard_match("smith", "_____"));
        assert!(!wildcard_match("smith", "____"));
        assert!(wildcard_match("anna smith", "%_mith"));
    }
}
