use crate::document::{Document, Value};
use crate::errors::{ErrorKind, PolydocError, PolydocResult};
use indexmap::IndexMap;
use std::fmt::{Debug, Display, Formatter};

/// The unit of persistence: an ordered, name-addressable collection of
/// [Document] fields bound to a collection name.
///
/// # Purpose
/// `DocumentEntity` is a pure transfer object. It is created by the caller
/// before `insert`/`update`, returned by `insert` (possibly augmented with
/// an adapter-generated identity field), and reconstituted by `select` from
/// native backend records. It holds no backend state of its own.
///
/// # Field semantics
/// Field names are unique within an entity. Adding a field whose name is
/// already present replaces the prior field (last-write-wins) while keeping
/// its original position; it never duplicates. Iteration follows insertion
/// order, lookup by name is O(1).
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::document::{Document, DocumentEntity};
///
/// let mut entity = DocumentEntity::new("people")?;
/// entity.add(Document::of("name", "Ada")?);
/// entity.add(Document::of("age", 36)?);
/// assert_eq!(entity.len(), 2);
/// assert!(entity.find("name").is_some());
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentEntity {
    collection_name: String,
    fields: IndexMap<String, Document>,
}

impl DocumentEntity {
    /// Creates an empty entity bound to the given collection.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::Validation] if the collection name is empty.
    pub fn new(collection_name: &str) -> PolydocResult<DocumentEntity> {
        if collection_name.is_empty() {
            log::error!("DocumentEntity does not support an empty collection name");
            return Err(PolydocError::new(
                "DocumentEntity does not support an empty collection name",
                ErrorKind::Validation,
            ));
        }

        Ok(DocumentEntity {
            collection_name: collection_name.to_string(),
            fields: IndexMap::new(),
        })
    }

    /// Returns the collection this entity belongs to.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Adds a field to the entity.
    ///
    /// If a field with the same name already exists it is replaced in place
    /// (last-write-wins) and the displaced field is returned.
    pub fn add(&mut self, document: Document) -> Option<Document> {
        self.fields.insert(document.name().to_string(), document)
    }

    /// Returns the field with the given name, if present.
    ///
    /// Absence is not an error; it is represented by `None`.
    pub fn find(&self, name: &str) -> Option<&Document> {
        self.fields.get(name)
    }

    /// Removes and returns the field with the given name, if present.
    ///
    /// Removal preserves the relative order of the remaining fields.
    pub fn remove(&mut self, name: &str) -> Option<Document> {
        self.fields.shift_remove(name)
    }

    /// Returns the fields in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.fields.values()
    }

    /// Checks if the entity has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the value of the named field, if the field is present.
    ///
    /// A present field holding [Value::Null] yields `Some(&Value::Null)`,
    /// which is distinct from the `None` of an absent field.
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).map(|doc| doc.value())
    }
}

impl Display for DocumentEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<String> = self.documents().map(|doc| doc.to_string()).collect();
        write!(f, "{} {{{}}}", self.collection_name, fields.join(", "))
    }
}

impl Debug for DocumentEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Creates a [DocumentEntity] from a collection name and field literals.
///
/// Expands to a `PolydocResult`; an empty collection or field name
/// surfaces as the same validation error the underlying constructors
/// raise.
///
/// # Examples
///
/// ```rust,ignore
/// let entity = entity!("people", {
///     "name" => "Ada",
///     "age" => 36,
/// })?;
/// ```
#[macro_export]
macro_rules! entity {
    ($collection:expr, { $($name:expr => $value:expr),* $(,)? }) => {{
        (|| -> $crate::errors::PolydocResult<$crate::document::DocumentEntity> {
            let mut entity = $crate::document::DocumentEntity::new($collection)?;
            $(
                entity.add($crate::document::Document::of($name, $value)?);
            )*
            Ok(entity)
        })()
    }};
}
