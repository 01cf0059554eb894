use std::fmt::{Display, Formatter};

/// The direction of a sort specification.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Sort from the smallest value to the largest.
    #[default]
    Ascending,
    /// Sort from the largest value to the smallest.
    Descending,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ASC"),
            SortOrder::Descending => write!(f, "DESC"),
        }
    }
}

/// One element of a query's sort specification: a field and a direction.
///
/// A query carries an ordered sequence of these; results are ordered
/// lexicographically left-to-right across the sequence.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sort {
    field: String,
    order: SortOrder,
}

impl Sort {
    /// Creates a sort specification for a field.
    pub fn new(field: &str, order: SortOrder) -> Sort {
        Sort {
            field: field.to_string(),
            order,
        }
    }

    /// Returns the field to sort by.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}
