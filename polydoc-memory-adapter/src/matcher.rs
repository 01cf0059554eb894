//! Condition evaluation against in-memory entities.

use polydoc::document::{DocumentEntity, Value};
use polydoc::errors::{ErrorKind, PolydocError, PolydocResult};
use polydoc::query::{Comparator, Condition};
use regex::Regex;
use std::cmp::Ordering;

/// Checks whether an entity satisfies a condition tree.
///
/// `And`/`Or` short-circuit; the first failing sub-condition aborts the
/// whole evaluation with its error.
pub(crate) fn matches(condition: &Condition, entity: &DocumentEntity) -> PolydocResult<bool> {
    match condition {
        Condition::Leaf {
            field,
            comparator,
            value,
        } => match_leaf(entity, field, *comparator, value),
        Condition::And(subs) => {
            for sub in subs {
                if !matches(sub, entity)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Condition::Or(subs) => {
            for sub in subs {
                if matches(sub, entity)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Condition::Not(sub) => Ok(!matches(sub, entity)?),
    }
}

/// Resolves a top-level or dotted nested field path within an entity.
///
/// Dotted segments descend through nested documents; within an array,
/// the first document carrying the segment name is followed.
pub(crate) fn resolve<'a>(entity: &'a DocumentEntity, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        None => entity.value_of(path),
        Some((head, rest)) => resolve_in_value(entity.value_of(head)?, rest),
    }
}

fn resolve_in_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let (head, rest) = match path.split_once('.') {
        None => (path, None),
        Some((head, rest)) => (head, Some(rest)),
    };

    let next = match value {
        Value::Document(doc) if doc.name() == head => doc.value(),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::Document(doc) if doc.name() == head => Some(doc.value()),
            _ => None,
        })?,
        _ => return None,
    };

    match rest {
        None => Some(next),
        Some(rest) => resolve_in_value(next, rest),
    }
}

fn match_leaf(
    entity: &DocumentEntity,
    field: &str,
    comparator: Comparator,
    operand: &Value,
) -> PolydocResult<bool> {
    let resolved = resolve(entity, field);

    match comparator {
        // A Null operand tests for a present field holding null; an
        // absent field never matches.
        Comparator::Equals => Ok(resolved == Some(operand)),
        Comparator::Greater => Ok(compare(resolved, operand) == Some(Ordering::Greater)),
        Comparator::GreaterEqual => Ok(matches!(
            compare(resolved, operand),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )),
        Comparator::Lesser => Ok(compare(resolved, operand) == Some(Ordering::Less)),
        Comparator::LesserEqual => Ok(matches!(
            compare(resolved, operand),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )),
        Comparator::In => match operand.as_array() {
            Some(candidates) => Ok(resolved
                .map(|value| candidates.contains(value))
                .unwrap_or(false)),
            None => {
                log::error!("IN condition on {} requires a sequence operand", field);
                Err(PolydocError::new(
                    "IN condition requires a sequence operand",
                    ErrorKind::Validation,
                ))
            }
        },
        Comparator::Like => match_like(field, resolved, operand),
        Comparator::Between => match_between(field, resolved, operand),
    }
}

fn compare(resolved: Option<&Value>, operand: &Value) -> Option<Ordering> {
    let value = resolved?;
    if value.is_comparable_with(operand) {
        Some(value.cmp(operand))
    } else {
        None
    }
}

fn match_like(field: &str, resolved: Option<&Value>, operand: &Value) -> PolydocResult<bool> {
    let pattern = match operand.as_string() {
        Some(pattern) => pattern,
        None => {
            log::error!("LIKE condition on {} requires a string operand", field);
            return Err(PolydocError::new(
                "LIKE condition requires a string operand",
                ErrorKind::Validation,
            ));
        }
    };

    let candidate = match resolved.and_then(|value| value.as_string()) {
        Some(candidate) => candidate,
        None => return Ok(false),
    };

    Ok(like_regex(pattern)?.is_match(candidate))
}

/// Compiles an SQL-style pattern (`%` any run, `_` exactly one) into an
/// anchored regex.
fn like_regex(pattern: &str) -> PolydocResult<Regex> {
    let mut translated = String::with_capacity(pattern.len() + 2);
    translated.push('^');
    for ch in pattern.chars() {
        match ch {
            '%' => translated.push_str(".*"),
            '_' => translated.push('.'),
            other => translated.push_str(&regex::escape(&other.to_string())),
        }
    }
    translated.push('$');

    Regex::new(&translated).map_err(|e| {
        log::error!("Failed to compile LIKE pattern {}: {}", pattern, e);
        PolydocError::new(
            &format!("Failed to compile LIKE pattern {}", pattern),
            ErrorKind::Internal,
        )
    })
}

fn match_between(field: &str, resolved: Option<&Value>, operand: &Value) -> PolydocResult<bool> {
    let bounds = match operand.as_array() {
        Some(bounds) if bounds.len() == 2 => bounds,
        _ => {
            log::error!("BETWEEN condition on {} requires two bounds", field);
            return Err(PolydocError::new(
                "BETWEEN condition requires two bounds",
                ErrorKind::Validation,
            ));
        }
    };

    // Both bounds inclusive.
    let lower = compare(resolved, &bounds[0]);
    let upper = compare(resolved, &bounds[1]);
    Ok(matches!(lower, Some(Ordering::Greater) | Some(Ordering::Equal))
        && matches!(upper, Some(Ordering::Less) | Some(Ordering::Equal)))
}
