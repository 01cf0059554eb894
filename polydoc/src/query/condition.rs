use crate::document::Value;
use std::fmt::{Debug, Display, Formatter};

/// The comparison operator of a leaf [Condition].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    /// Field equals the operand. An operand of [Value::Null] is preserved
    /// literally so that adapters can translate it to a native "is null"
    /// test instead of an impossible equality.
    Equals,
    /// Field is strictly greater than the operand.
    Greater,
    /// Field is greater than or equal to the operand.
    GreaterEqual,
    /// Field is strictly less than the operand.
    Lesser,
    /// Field is less than or equal to the operand.
    LesserEqual,
    /// Field is a member of the operand sequence.
    In,
    /// Field matches an SQL-style pattern (`%` and `_` wildcards).
    Like,
    /// Field lies within the operand's two bounds, both inclusive.
    Between,
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparator::Equals => write!(f, "="),
            Comparator::Greater => write!(f, ">"),
            Comparator::GreaterEqual => write!(f, ">="),
            Comparator::Lesser => write!(f, "<"),
            Comparator::LesserEqual => write!(f, "<="),
            Comparator::In => write!(f, "IN"),
            Comparator::Like => write!(f, "LIKE"),
            Comparator::Between => write!(f, "BETWEEN"),
        }
    }
}

/// A node of a boolean expression tree over field comparisons.
///
/// # Purpose
/// Represents a query predicate in backend-neutral form. Adapters walk the
/// tree exhaustively and translate it into native query text or native API
/// calls; the core never interprets it.
///
/// # Shape
/// A condition is either a leaf (field, comparator, operand), a
/// conjunction/disjunction over sub-conditions, or a negation. Leaf field
/// names may reference top-level or dotted nested field paths. The tree is
/// immutable once attached to a query.
///
/// # Composition
///
/// ```rust,ignore
/// use polydoc::query::field;
///
/// let condition = field("city").eq("Salvador")
///     .and(field("age").gte(18))
///     .or(field("vip").eq(true));
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// A single field comparison.
    Leaf {
        /// Top-level or dotted nested field path.
        field: String,
        /// The comparison operator.
        comparator: Comparator,
        /// The operand; `In` and `Between` carry a [Value::Array].
        value: Value,
    },
    /// All sub-conditions must match.
    And(Vec<Condition>),
    /// At least one sub-condition must match.
    Or(Vec<Condition>),
    /// The sub-condition must not match.
    Not(Box<Condition>),
}

impl Condition {
    /// Combines this condition with another using logical AND.
    ///
    /// An existing conjunction is extended in place rather than nested, so
    /// `a.and(b).and(c)` yields one three-way AND.
    pub fn and(self, other: Condition) -> Condition {
        match self {
            Condition::And(mut subs) => {
                subs.push(other);
                Condition::And(subs)
            }
            first => Condition::And(vec![first, other]),
        }
    }

    /// Combines this condition with another using logical OR.
    ///
    /// An existing disjunction is extended in place rather than nested.
    pub fn or(self, other: Condition) -> Condition {
        match self {
            Condition::Or(mut subs) => {
                subs.push(other);
                Condition::Or(subs)
            }
            first => Condition::Or(vec![first, other]),
        }
    }

    /// Negates this condition.
    pub fn negate(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Leaf {
                field,
                comparator,
                value,
            } => write!(f, "{} {} {}", field, comparator, value),
            Condition::And(subs) => {
                let parts: Vec<String> = subs.iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(" AND "))
            }
            Condition::Or(subs) => {
                let parts: Vec<String> = subs.iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(" OR "))
            }
            Condition::Not(sub) => write!(f, "NOT {}", sub),
        }
    }
}

impl Debug for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Creates a fluent condition builder for the specified field name.
///
/// The returned [FieldCondition] requires exactly one terminal comparator
/// call (`eq`, `gt`, ...) to produce a [Condition]; there is no other way
/// out of it.
pub fn field(field_name: &str) -> FieldCondition {
    FieldCondition {
        field_name: field_name.to_string(),
    }
}

/// A one-shot builder for a leaf [Condition] on a specific field.
///
/// Each method consumes the builder and returns the finished condition,
/// which can then be composed with `and`/`or`/`negate` or attached to a
/// query builder.
pub struct FieldCondition {
    field_name: String,
}

impl FieldCondition {
    fn leaf(self, comparator: Comparator, value: Value) -> Condition {
        Condition::Leaf {
            field: self.field_name,
            comparator,
            value,
        }
    }

    /// Field equals the value. A [Value::Null] operand expresses a native
    /// "is null" test.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Condition {
        self.leaf(Comparator::Equals, value.into())
    }

    /// Field is strictly greater than the value.
    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Condition {
        self.leaf(Comparator::Greater, value.into())
    }

    /// Field is greater than or equal to the value.
    #[inline]
    pub fn gte<T: Into<Value>>(self, value: T) -> Condition {
        self.leaf(Comparator::GreaterEqual, value.into())
    }

    /// Field is strictly less than the value.
    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Condition {
        self.leaf(Comparator::Lesser, value.into())
    }

    /// Field is less than or equal to the value.
    #[inline]
    pub fn lte<T: Into<Value>>(self, value: T) -> Condition {
        self.leaf(Comparator::LesserEqual, value.into())
    }

    /// Field matches an SQL-style pattern; `%` matches any run of
    /// characters, `_` matches exactly one.
    #[inline]
    pub fn like(self, pattern: &str) -> Condition {
        self.leaf(Comparator::Like, Value::String(pattern.to_string()))
    }

    /// Field is a member of the given values.
    pub fn in_values<T: Into<Value>>(self, values: Vec<T>) -> Condition {
        self.leaf(
            Comparator::In,
            Value::Array(values.into_iter().map(|v| v.into()).collect()),
        )
    }

    /// Field lies between the two bounds, both inclusive.
    ///
    /// The bounds travel as a two-element [Value::Array] operand.
    pub fn between<T: Into<Value>>(self, lower: T, upper: T) -> Condition {
        self.leaf(
            Comparator::Between,
            Value::Array(vec![lower.into(), upper.into()]),
        )
    }
}
