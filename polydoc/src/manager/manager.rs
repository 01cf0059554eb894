use crate::document::DocumentEntity;
use crate::errors::{ErrorKind, PolydocError, PolydocResult};
use crate::query::{DeleteQuery, Query};
use crate::stream::EntityStream;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// The per-backend CRUD port. Everything a backend must be able to do is
/// expressed here; the core contains no per-backend branching.
///
/// # Contract
/// - `insert` may inject a generated identity field into the returned
///   entity; the input entity is otherwise persisted as given, null field
///   values included.
/// - `update` requires the identity field and fails with
///   [ErrorKind::Validation] when it is absent.
/// - `delete` with no condition clears the whole collection; deleting
///   zero matches is success, not an error.
/// - `select` honors AND/OR/NOT precedence exactly, applies sorts
///   lexicographically left-to-right, then skip, then limit.
pub trait ManagerProvider {
    /// Returns the bound database name.
    fn name(&self) -> String;

    /// Persists a new entity, returning it with any generated identity.
    fn insert(&self, entity: DocumentEntity) -> PolydocResult<DocumentEntity>;

    /// Replaces the stored entity carrying the same identity.
    fn update(&self, entity: DocumentEntity) -> PolydocResult<DocumentEntity>;

    /// Removes every entity the query matches.
    fn delete(&self, query: DeleteQuery) -> PolydocResult<()>;

    /// Executes a select query, producing a lazy stream of matches.
    fn select(&self, query: Query) -> PolydocResult<EntityStream>;

    /// Counts the entities in a collection.
    fn count(&self, collection_name: &str) -> PolydocResult<u64>;
}

/// A cloneable handle over a [ManagerProvider] implementation, extended
/// with convenience operations that are backend-independent.
#[derive(Clone)]
pub struct Manager {
    inner: Arc<dyn ManagerProvider>,
}

impl Manager {
    /// Creates a new `Manager` from a provider implementation.
    pub fn new<T: ManagerProvider + 'static>(inner: T) -> Self {
        Manager {
            inner: Arc::new(inner),
        }
    }

    /// Executes a select query expected to match at most one entity.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::NonUniqueResult] if the query matches more
    /// than one entity. Zero matches yields `Ok(None)`.
    pub fn single_result(&self, query: Query) -> PolydocResult<Option<DocumentEntity>> {
        let mut stream = self.inner.select(query)?;
        let first = match stream.next() {
            None => return Ok(None),
            Some(entity) => entity?,
        };

        if stream.next().is_some() {
            log::error!(
                "The query returned more than one entity from {}",
                first.collection_name()
            );
            return Err(PolydocError::new(
                "The query returned more than one entity",
                ErrorKind::NonUniqueResult,
            ));
        }
        Ok(Some(first))
    }
}

impl Deref for Manager {
    type Target = Arc<dyn ManagerProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for Manager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("name", &self.inner.name())
            .finish_non_exhaustive()
    }
}
