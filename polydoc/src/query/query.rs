use crate::query::{Condition, Sort};
use std::fmt::{Debug, Display, Formatter};

/// An immutable select query: collection, optional condition tree, sort
/// specification and pagination.
///
/// # Purpose
/// The backend-neutral description of a read. Adapters translate it into
/// native query text or native API calls; the ordering guarantees are part
/// of the contract: sorts apply lexicographically left-to-right, and
/// `skip`/`limit` apply after ordering.
///
/// Built exclusively through [select]; see the builder for the state
/// machine it enforces.
///
/// [select]: crate::query::select
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub(crate) collection_name: String,
    pub(crate) condition: Option<Condition>,
    pub(crate) sorts: Vec<Sort>,
    pub(crate) limit: Option<u64>,
    pub(crate) skip: Option<u64>,
}

impl Query {
    /// Returns the collection this query reads from.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Returns the condition tree, if any. Absence means "match all".
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Returns the sort specification in application order.
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    /// Returns the maximum number of results, if bounded.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the number of leading results to skip, if any.
    pub fn skip(&self) -> Option<u64> {
        self.skip
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SELECT FROM {}", self.collection_name)?;
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {}", condition)?;
        }
        if !self.sorts.is_empty() {
            let sorts: Vec<String> = self.sorts.iter().map(|s| s.to_string()).collect();
            write!(f, " ORDER BY {}", sorts.join(", "))?;
        }
        if let Some(skip) = self.skip {
            write!(f, " SKIP {}", skip)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}

impl Debug for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// An immutable delete query: collection plus optional condition tree.
///
/// Unlike [Query] it carries no sorts and no pagination. An absent
/// condition means the whole collection is deleted. Built exclusively
/// through [delete].
///
/// [delete]: crate::query::delete
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteQuery {
    pub(crate) collection_name: String,
    pub(crate) condition: Option<Condition>,
}

impl DeleteQuery {
    /// Returns the collection this query deletes from.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Returns the condition tree, if any. Absence means "delete all".
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

impl Display for DeleteQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DELETE FROM {}", self.collection_name)?;
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {}", condition)?;
        }
        Ok(())
    }
}

impl Debug for DeleteQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
