use crate::document::Value;
use crate::errors::{ErrorKind, PolydocError, PolydocResult};
use std::fmt::{Debug, Display, Formatter};

/// A single named field: the atomic unit a [DocumentEntity] is made of.
///
/// # Purpose
/// Pairs a non-empty field name with a [Value]. A `Document` is constructed
/// either by the caller before an insert, or by a backend adapter when it
/// deserializes a native record. It is never mutated in place; "updating" a
/// field means constructing a new `Document`.
///
/// # Equality
/// Two documents are equal iff both name and value are equal.
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::document::Document;
///
/// let field = Document::of("city", "Salvador")?;
/// assert_eq!(field.name(), "city");
/// ```
///
/// [DocumentEntity]: crate::document::DocumentEntity
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    name: String,
    value: Value,
}

impl Document {
    /// Creates a new document from a field name and any value convertible
    /// into [Value].
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::Validation] if the name is empty.
    pub fn of<T: Into<Value>>(name: &str, value: T) -> PolydocResult<Document> {
        if name.is_empty() {
            log::error!("Document does not support an empty name");
            return Err(PolydocError::new(
                "Document does not support an empty name",
                ErrorKind::Validation,
            ));
        }

        Ok(Document {
            name: name.to_string(),
            value: value.into(),
        })
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the field value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the document and returns its value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Checks if the field value is [Value::Null].
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_creates_document() {
        let doc = Document::of("name", "Ada").unwrap();
        assert_eq!(doc.name(), "name");
        assert_eq!(doc.value(), &Value::String("Ada".to_string()));
    }

    #[test]
    fn test_of_rejects_empty_name() {
        let result = Document::of("", 42);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Validation);
    }

    #[test]
    fn test_equality_requires_name_and_value() {
        let a = Document::of("age", 36).unwrap();
        let b = Document::of("age", 36).unwrap();
        let c = Document::of("age", 37).unwrap();
        let d = Document::of("years", 36).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_null_value_is_representable() {
        let doc = Document::of("name", Value::Null).unwrap();
        assert!(doc.is_null());
        assert_eq!(doc.value(), &Value::Null);
    }

    #[test]
    fn test_nested_document_value() {
        let inner = Document::of("zip", "40301-110").unwrap();
        let outer = Document::of("address", inner.clone()).unwrap();
        assert_eq!(outer.value().as_document(), Some(&inner));
    }

    #[test]
    fn test_into_value() {
        let doc = Document::of("age", 36).unwrap();
        assert_eq!(doc.into_value(), Value::I32(36));
    }

    #[test]
    fn test_display() {
        let doc = Document::of("city", "Lisbon").unwrap();
        assert_eq!(format!("{}", doc), "city: \"Lisbon\"");
    }
}
