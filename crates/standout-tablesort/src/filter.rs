//! Built-in row filters.
//!
//! - [`ColumnFilter`]: one column, one operator, one compare value.
//! - [`ValueSetFilter`]: the filter behind interactive column pickers; an
//!   optional operator test plus an allow-set of individual cell values.
//! - [`FnFilter`]: wraps a closure.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::op::Operator;
use crate::row::Row;
use crate::traits::{Descriptor, RowFilter};
use crate::value::{should_include, ColumnType};

/// Default column predicate.
///
/// Reads the trimmed cell text and keeps the row when [`should_include`]
/// accepts it.
///
/// # Example
///
/// ```
/// use standout_tablesort::{ColumnFilter, RowFilter};
///
/// let filter = ColumnFilter::parse(1, "<=", "10").unwrap();
/// assert!(filter.include(&["apples", " 9 "]));
/// assert!(!filter.include(&["pears", "12"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    column: usize,
    op: Operator,
    value: String,
    column_type: ColumnType,
}

impl ColumnFilter {
    /// Creates a filter on an inferred-type column.
    pub fn new(column: usize, op: Operator, value: impl Into<String>) -> Self {
        ColumnFilter {
            column,
            op,
            value: value.into(),
            column_type: ColumnType::Infer,
        }
    }

    /// Creates a filter from an operation token (`=`, `!=`, `<`, `>`, `<=`,
    /// `>=`, `~`, `~~`).
    pub fn parse(column: usize, token: &str, value: impl Into<String>) -> Result<Self> {
        Ok(ColumnFilter::new(column, Operator::from_token(token)?, value))
    }

    /// Sets the column type.
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Returns the operator.
    pub fn op(&self) -> Operator {
        self.op
    }

    /// Returns the compare value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Descriptor for ColumnFilter {
    fn column(&self) -> Option<usize> {
        Some(self.column)
    }
}

impl<R: Row + ?Sized> RowFilter<R> for ColumnFilter {
    fn include(&self, row: &R) -> bool {
        should_include(row.trimmed(self.column), self.op, &self.value, self.column_type)
    }
}

/// Multi-value column predicate.
///
/// A row passes when both hold:
/// - the cell's trimmed text passes the operator test, if one is set;
/// - at least one of the cell's individual values is in the allow-set, if
///   one is set.
///
/// A filter with neither part set accepts every row. An empty allow-set
/// rejects every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSetFilter {
    column: usize,
    criterion: Option<(Operator, String)>,
    column_type: ColumnType,
    allowed: Option<BTreeSet<String>>,
}

impl ValueSetFilter {
    /// Creates an unconstrained filter on `column`.
    pub fn new(column: usize) -> Self {
        ValueSetFilter {
            column,
            ..Default::default()
        }
    }

    /// Adds the operator test against a compare value.
    pub fn matching(mut self, op: Operator, value: impl Into<String>) -> Self {
        self.criterion = Some((op, value.into()));
        self
    }

    /// Restricts the row to cells holding one of `values`.
    pub fn allow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the column type used by the operator test.
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Returns `true` if neither an operator test nor an allow-set is set.
    pub fn is_unconstrained(&self) -> bool {
        self.criterion.is_none() && self.allowed.is_none()
    }
}

impl Descriptor for ValueSetFilter {
    fn column(&self) -> Option<usize> {
        Some(self.column)
    }
}

impl<R: Row + ?Sized> RowFilter<R> for ValueSetFilter {
    fn include(&self, row: &R) -> bool {
        if let Some((op, value)) = &self.criterion {
            if !should_include(row.trimmed(self.column), *op, value, self.column_type) {
                return false;
            }
        }
        match &self.allowed {
            Some(allowed) => row
                .cell_values(self.column)
                .iter()
                .any(|value| allowed.contains(*value)),
            None => true,
        }
    }
}

/// Filter backed by a closure.
///
/// ```
/// use standout_tablesort::{FnFilter, Row, RowFilter};
///
/// let short_rows = FnFilter::new(|row: &Vec<String>| row.cell_count() < 3);
/// assert!(short_rows.include(&vec!["a".to_string()]));
/// ```
pub struct FnFilter<F> {
    column: Option<usize>,
    f: F,
}

impl<F> FnFilter<F> {
    /// Creates a whole-row filter.
    pub fn new(f: F) -> Self {
        FnFilter { column: None, f }
    }

    /// Binds the filter to a column, so the engine checks the index.
    pub fn on_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter")
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<F> Descriptor for FnFilter<F> {
    fn column(&self) -> Option<usize> {
        self.column
    }
}

impl<R: ?Sized, F> RowFilter<R> for FnFilter<F>
where
    F: Fn(&R) -> bool,
{
    fn include(&self, row: &R) -> bool {
        (self.f)(row)
    }
}
