use crate::document::Document;
use std::fmt::{Debug, Display, Formatter};

/// Compare two integers for equality after widening to a common type.
#[inline]
fn num_eq_int(a: i64, b: i64) -> bool {
    a == b
}

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Compare two floats with total ordering; NaN sorts greater than all
/// other values.
#[inline]
fn num_cmp_float(a: f64, b: f64) -> std::cmp::Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
    }
}

/// Represents a storable field value. It can be a simple value like
/// [Value::I64] or [Value::String], or a structured value like
/// [Value::Document] or [Value::Array].
///
/// # Purpose
/// Provides one representation for every value a backend can store,
/// regardless of the backend's native type system. Adapters are
/// responsible for flattening these variants into native records and
/// reconstituting them on the way back.
///
/// # Variants
/// - `Null`: an explicitly present null, distinct from "field absent"
/// - `Bool(bool)`: boolean true/false
/// - `I32`/`I64`: signed integers
/// - `F64`: 64-bit floating point
/// - `String(String)`: text value
/// - `Bytes(Vec<u8>)`: binary data
/// - `Document(Box<Document>)`: a nested named field
/// - `Array(Vec<Value>)`: ordered sequence of values
/// - `SubDocuments(Vec<Vec<Document>>)`: ordered sequence of document
///   sequences, used for multi-valued sub-collections
///
/// # Characteristics
/// - **Immutable**: a value is never mutated once constructed
/// - **Deep equality**: structural comparison at arbitrary depth
/// - **Comparable**: implements `Ord` with cross-width numeric comparison
/// - **Default**: defaults to `Null`
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents a byte array value. Used for binary data.
    Bytes(Vec<u8>),
    /// Represents a nested document value.
    Document(Box<Document>),
    /// Represents an ordered sequence of values.
    Array(Vec<Value>),
    /// Represents an ordered sequence of document sequences.
    SubDocuments(Vec<Vec<Document>>),
}

impl Value {
    /// Checks if this value is an integer of any width.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::I32(_) | Value::I64(_))
    }

    /// Checks if this value is a floating point number.
    #[inline]
    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::F64(_))
    }

    /// Checks if this value is any kind of number.
    #[inline]
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_decimal()
    }

    /// Checks if this value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value widened to `i64` if it is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::I32(v) => Some(*v as i64),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is any kind of number.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::I32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a bool if it is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a byte slice if it is binary data.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested document if this value holds one.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value sequence if this value holds one.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the document sequences if this value holds them.
    pub fn as_sub_documents(&self) -> Option<&[Vec<Document>]> {
        match self {
            Value::SubDocuments(v) => Some(v),
            _ => None,
        }
    }

    /// Checks whether two values belong to comparable type families.
    ///
    /// Numbers are comparable across widths; everything else compares only
    /// within the same variant.
    pub fn is_comparable_with(&self, other: &Value) -> bool {
        if self.is_number() && other.is_number() {
            return true;
        }
        matches!(
            (self, other),
            (Value::Null, Value::Null)
                | (Value::Bool(_), Value::Bool(_))
                | (Value::String(_), Value::String(_))
                | (Value::Bytes(_), Value::Bytes(_))
                | (Value::Document(_), Value::Document(_))
                | (Value::Array(_), Value::Array(_))
                | (Value::SubDocuments(_), Value::SubDocuments(_))
        )
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::I32(_) | Value::I64(_) | Value::F64(_) => 2,
            Value::String(_) => 3,
            Value::Bytes(_) => 4,
            Value::Document(_) => 5,
            Value::Array(_) => 6,
            Value::SubDocuments(_) => 7,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_integer() && other.is_integer() {
            if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
                return num_eq_int(a, b);
            }
        }

        if self.is_number() && other.is_number() {
            if let (Some(a), Some(b)) = (self.as_decimal(), other.as_decimal()) {
                return num_eq_float(a, b);
            }
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => *a == *b,
            (Value::String(a), Value::String(b)) => *a == *b,
            (Value::Bytes(a), Value::Bytes(b)) => *a == *b,
            (Value::Document(a), Value::Document(b)) => *a == *b,
            (Value::Array(a), Value::Array(b)) => *a == *b,
            (Value::SubDocuments(a), Value::SubDocuments(b)) => *a == *b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.is_integer() && other.is_integer() {
            if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
                return a.cmp(&b);
            }
        }

        if self.is_number() && other.is_number() {
            if let (Some(a), Some(b)) = (self.as_decimal(), other.as_decimal()) {
                return num_cmp_float(a, b);
            }
        }

        match (self, other) {
            (Value::Null, Value::Null) => std::cmp::Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Document(a), Value::Document(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::SubDocuments(a), Value::SubDocuments(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Document(v) => write!(f, "{}", v),
            Value::Array(v) => {
                let items: Vec<String> = v.iter().map(|it| it.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::SubDocuments(v) => {
                let items: Vec<String> = v
                    .iter()
                    .map(|docs| {
                        let inner: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
                        format!("[{}]", inner.join(", "))
                    })
                    .collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Document(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Vec<Vec<Document>>> for Value {
    fn from(v: Vec<Vec<Document>>) -> Self {
        Value::SubDocuments(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
