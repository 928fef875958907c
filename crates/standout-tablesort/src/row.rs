//! Row access.
//!
//! The engine never owns a data model of its own: it reads cells straight
//! from whatever the host renders, through the [`Row`] trait.

use std::fmt;

/// Stable identity of a row: its position in the order captured at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl RowId {
    /// Returns the position of the row in the initial order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rendered table row with indexable cells.
///
/// # Example
///
/// ```
/// use standout_tablesort::Row;
///
/// struct Line {
///     cells: Vec<String>,
/// }
///
/// impl Row for Line {
///     fn cell_count(&self) -> usize {
///         self.cells.len()
///     }
///
///     fn cell_text(&self, column: usize) -> Option<&str> {
///         self.cells.get(column).map(String::as_str)
///     }
/// }
/// ```
pub trait Row {
    /// Number of cells in this row.
    fn cell_count(&self) -> usize;

    /// Raw text of the cell at `column`, or `None` if the row is shorter.
    fn cell_text(&self, column: usize) -> Option<&str>;

    /// The individual values held by a cell.
    ///
    /// Most cells hold a single value. A cell rendering a list holds one
    /// value per list item; override this to expose them. Values are trimmed.
    fn cell_values(&self, column: usize) -> Vec<&str> {
        self.cell_text(column).map(str::trim).into_iter().collect()
    }

    /// Trimmed text of the cell at `column`; a missing cell reads as empty.
    fn trimmed(&self, column: usize) -> &str {
        self.cell_text(column).map(str::trim).unwrap_or("")
    }
}

impl Row for Vec<String> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell_text(&self, column: usize) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl Row for Vec<&str> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn cell_text(&self, column: usize) -> Option<&str> {
        self.get(column).copied()
    }
}

impl<const N: usize> Row for [&str; N] {
    fn cell_count(&self) -> usize {
        N
    }

    fn cell_text(&self, column: usize) -> Option<&str> {
        self.get(column).copied()
    }
}
