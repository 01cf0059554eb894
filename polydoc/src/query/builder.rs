use crate::errors::{ErrorKind, PolydocError, PolydocResult};
use crate::query::{Condition, DeleteQuery, Query, Sort, SortOrder};
use parking_lot::Mutex;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Starts building a select [Query] against the given collection.
///
/// The collection comes first by construction: it is the only way to obtain
/// a builder, so no condition, sort or pagination can precede it.
///
/// # Errors
///
/// Fails with [ErrorKind::Validation] if the collection name is empty.
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::query::{select, field, SortOrder};
///
/// let query = select("people")?
///     .filter(field("city").eq("Salvador"))?
///     .order_by("name", SortOrder::Ascending)?
///     .limit(10)?
///     .build()?;
/// ```
pub fn select(collection_name: &str) -> PolydocResult<QueryBuilder> {
    if collection_name.is_empty() {
        log::error!("Query does not support an empty collection name");
        return Err(PolydocError::new(
            "Query does not support an empty collection name",
            ErrorKind::Validation,
        ));
    }

    Ok(QueryBuilder {
        inner: Arc::new(QueryBuilderInner {
            collection_name: collection_name.to_string(),
            built: AtomicBool::new(false),
            state: Mutex::new(QueryState::default()),
        }),
    })
}

/// Starts building a [DeleteQuery] against the given collection.
///
/// # Errors
///
/// Fails with [ErrorKind::Validation] if the collection name is empty.
pub fn delete(collection_name: &str) -> PolydocResult<DeleteQueryBuilder> {
    if collection_name.is_empty() {
        log::error!("DeleteQuery does not support an empty collection name");
        return Err(PolydocError::new(
            "DeleteQuery does not support an empty collection name",
            ErrorKind::Validation,
        ));
    }

    Ok(DeleteQueryBuilder {
        inner: Arc::new(DeleteQueryBuilderInner {
            collection_name: collection_name.to_string(),
            built: AtomicBool::new(false),
            condition: Mutex::new(None),
        }),
    })
}

#[derive(Default)]
struct QueryState {
    condition: Option<Condition>,
    sorts: Vec<Sort>,
    limit: Option<u64>,
    skip: Option<u64>,
}

struct QueryBuilderInner {
    collection_name: String,
    /// Terminal flag; once set by `build`, every builder method fails.
    built: AtomicBool,
    state: Mutex<QueryState>,
}

/// Builder for [Query].
///
/// # State machine
/// Obtained from [select] (collection first, always), mutated by the fluent
/// methods, finished by `build`. `build` is terminal: the builder cannot be
/// reused afterwards, and any method invoked on it (including a second
/// `build`) fails with [ErrorKind::Validation].
///
/// Clones share the same underlying state, so a clone kept after `build`
/// is just as terminal as the original.
#[derive(Clone)]
pub struct QueryBuilder {
    inner: Arc<QueryBuilderInner>,
}

impl QueryBuilder {
    fn ensure_not_built(&self, operation: &str) -> PolydocResult<()> {
        if self.inner.built.load(Ordering::Acquire) {
            log::error!("Query builder cannot be reused after build: {}", operation);
            return Err(PolydocError::new(
                "Query builder cannot be reused after build",
                ErrorKind::Validation,
            ));
        }
        Ok(())
    }

    /// Attaches a condition. A second call combines with the existing tree
    /// via implicit AND.
    pub fn filter(&self, condition: Condition) -> PolydocResult<QueryBuilder> {
        self.ensure_not_built("filter")?;
        let mut state = self.inner.state.lock();
        state.condition = match state.condition.take() {
            Some(existing) => Some(existing.and(condition)),
            None => Some(condition),
        };
        drop(state);
        Ok(self.clone())
    }

    /// Combines the existing condition with another via explicit AND.
    ///
    /// Equivalent to [QueryBuilder::filter] when no condition is attached
    /// yet.
    pub fn and(&self, condition: Condition) -> PolydocResult<QueryBuilder> {
        self.filter(condition)
    }

    /// Combines the existing condition with another via explicit OR.
    pub fn or(&self, condition: Condition) -> PolydocResult<QueryBuilder> {
        self.ensure_not_built("or")?;
        let mut state = self.inner.state.lock();
        state.condition = match state.condition.take() {
            Some(existing) => Some(existing.or(condition)),
            None => Some(condition),
        };
        drop(state);
        Ok(self.clone())
    }

    /// Appends a sort specification; earlier calls take precedence during
    /// ordering.
    pub fn order_by(&self, field: &str, order: SortOrder) -> PolydocResult<QueryBuilder> {
        self.ensure_not_built("order_by")?;
        if field.is_empty() {
            log::error!("Sort does not support an empty field name");
            return Err(PolydocError::new(
                "Sort does not support an empty field name",
                ErrorKind::Validation,
            ));
        }
        self.inner.state.lock().sorts.push(Sort::new(field, order));
        Ok(self.clone())
    }

    /// Sets the number of leading results to skip after ordering.
    pub fn skip(&self, skip: u64) -> PolydocResult<QueryBuilder> {
        self.ensure_not_built("skip")?;
        self.inner.state.lock().skip = Some(skip);
        Ok(self.clone())
    }

    /// Bounds the number of results returned after ordering and skip.
    pub fn limit(&self, limit: u64) -> PolydocResult<QueryBuilder> {
        self.ensure_not_built("limit")?;
        self.inner.state.lock().limit = Some(limit);
        Ok(self.clone())
    }

    /// Finishes the builder and produces the immutable [Query].
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::Validation] if the builder was already built.
    pub fn build(&self) -> PolydocResult<Query> {
        if self.inner.built.swap(true, Ordering::AcqRel) {
            log::error!("Query builder cannot be reused after build");
            return Err(PolydocError::new(
                "Query builder cannot be reused after build",
                ErrorKind::Validation,
            ));
        }

        let state = self.inner.state.lock();
        Ok(Query {
            collection_name: self.inner.collection_name.clone(),
            condition: state.condition.clone(),
            sorts: state.sorts.clone(),
            limit: state.limit,
            skip: state.skip,
        })
    }
}

impl Debug for QueryBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("collection_name", &self.inner.collection_name)
            .field("built", &self.inner.built.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

struct DeleteQueryBuilderInner {
    collection_name: String,
    built: AtomicBool,
    condition: Mutex<Option<Condition>>,
}

/// Builder for [DeleteQuery]; same terminal-state contract as
/// [QueryBuilder], without sorts or pagination.
#[derive(Clone)]
pub struct DeleteQueryBuilder {
    inner: Arc<DeleteQueryBuilderInner>,
}

impl DeleteQueryBuilder {
    fn ensure_not_built(&self, operation: &str) -> PolydocResult<()> {
        if self.inner.built.load(Ordering::Acquire) {
            log::error!(
                "DeleteQuery builder cannot be reused after build: {}",
                operation
            );
            return Err(PolydocError::new(
                "DeleteQuery builder cannot be reused after build",
                ErrorKind::Validation,
            ));
        }
        Ok(())
    }

    /// Attaches a condition; a second call combines via implicit AND.
    pub fn filter(&self, condition: Condition) -> PolydocResult<DeleteQueryBuilder> {
        self.ensure_not_built("filter")?;
        let mut current = self.inner.condition.lock();
        *current = match current.take() {
            Some(existing) => Some(existing.and(condition)),
            None => Some(condition),
        };
        drop(current);
        Ok(self.clone())
    }

    /// Combines the existing condition with another via explicit AND.
    pub fn and(&self, condition: Condition) -> PolydocResult<DeleteQueryBuilder> {
        self.filter(condition)
    }

    /// Combines the existing condition with another via explicit OR.
    pub fn or(&self, condition: Condition) -> PolydocResult<DeleteQueryBuilder> {
        self.ensure_not_built("or")?;
        let mut current = self.inner.condition.lock();
        *current = match current.take() {
            Some(existing) => Some(existing.or(condition)),
            None => Some(condition),
        };
        drop(current);
        Ok(self.clone())
    }

    /// Finishes the builder and produces the immutable [DeleteQuery].
    pub fn build(&self) -> PolydocResult<DeleteQuery> {
        if self.inner.built.swap(true, Ordering::AcqRel) {
            log::error!("DeleteQuery builder cannot be reused after build");
            return Err(PolydocError::new(
                "DeleteQuery builder cannot be reused after build",
                ErrorKind::Validation,
            ));
        }

        Ok(DeleteQuery {
            collection_name: self.inner.collection_name.clone(),
            condition: self.inner.condition.lock().clone(),
        })
    }
}

impl Debug for DeleteQueryBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteQueryBuilder")
            .field("collection_name", &self.inner.collection_name)
            .field("built", &self.inner.built.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}
