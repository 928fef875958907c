//! Tablesort - sort and filter engine for rendered tables.
//!
//! Tablesort reorders and hides the rows of a table that is already on
//! screen. The rendered rows are the only source of truth: the engine reads
//! cell text through the [`Row`] trait, keeps the order the rows had when it
//! attached, and computes two things a view layer applies:
//!
//! - the current row order, as a list of [`RowId`]s;
//! - a filtered flag per row. Rows are never removed.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_tablesort::{ColumnFilter, ColumnSort, Operator, Table};
//!
//! let mut table = Table::new(vec![
//!     vec!["Write docs", "3"],
//!     vec!["Fix bug", "5"],
//!     vec!["Old task", "1"],
//! ]);
//!
//! table.filter(&[ColumnFilter::new(1, Operator::GREATER_OR_EQUAL, "3")])?;
//! table.sort(&[ColumnSort::desc(1)])?;
//!
//! let rows = table.get_rows(false);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0][0], "Fix bug");
//! # Ok::<(), standout_tablesort::TableError>(())
//! ```
//!
//! # Semantics
//!
//! ```text
//! visible(row) = every filter includes row
//! order        = stable sort by the first comparator that does not tie
//! ```
//!
//! - Filtering twice with the same filters gives the same flags.
//! - `clear_sort` always restores the attach-time order.
//! - A descriptor naming a column outside the table is rejected before any
//!   row changes.
//!
//! # Column Types
//!
//! | Type | Filtering | Sorting |
//! |------|-----------|---------|
//! | `Infer` | each side parsed as a number when it looks like one | numbers first, numerically; other cells after them, as text |
//! | `Text` | string comparison | string comparison |
//!
//! # Interactive Columns
//!
//! [`Attachment`] pairs a table with one [`ColumnControl`] per column and
//! reapplies everything on [`Attachment::reconcile`]. Sort keys are
//! prioritised by [`SortOrderMemory`] in the order columns were switched on.

mod config;
mod error;
mod filter;
mod memory;
mod op;
mod row;
mod session;
mod sort;
mod table;
mod traits;
mod value;

// Re-export public API
pub use config::{ColumnConfig, TableConfig};
pub use error::{Result, TableError};
pub use filter::{ColumnFilter, FnFilter, ValueSetFilter};
pub use memory::{SortKey, SortOrderMemory};
pub use op::Operator;
pub use row::{Row, RowId};
pub use session::{Attachment, ColumnControl};
pub use sort::{ColumnSort, Dir, FnSort};
pub use table::Table;
pub use traits::{compare_cascade, Descriptor, RowFilter, RowSort};
pub use value::{parse_number, should_include, CellValue, ColumnType};
