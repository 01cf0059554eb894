//! Backend-neutral query representation and fluent builders.
//!
//! A query is assembled in three layers: [field] starts a leaf condition,
//! [Condition] composes leaves into a boolean tree, and [select] / [delete]
//! wrap the tree in an immutable [Query] or [DeleteQuery] together with
//! sorts and pagination. Adapters receive only the finished immutable
//! forms.

mod builder;
mod condition;
mod query;
mod sort_order;

pub use builder::{delete, select, DeleteQueryBuilder, QueryBuilder};
pub use condition::{field, Comparator, Condition, FieldCondition};
pub use query::{DeleteQuery, Query};
pub use sort_order::{Sort, SortOrder};
