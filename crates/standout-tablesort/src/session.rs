//! Column sessions and reconciliation.
//!
//! A [`ColumnControl`] holds the interactive state of one column: its sort
//! direction, an optional operator test and an optional set of allowed
//! values. How that state is edited (menus, checkboxes, dialogs) is up to the
//! host. On every reconciliation each control contributes at most one filter
//! and one sort descriptor.
//!
//! An [`Attachment`] ties the controls to a [`Table`]. It owns the table and,
//! from the first sort on, a [`SortOrderMemory`]; dropping or detaching it
//! discards both.

use std::collections::BTreeSet;

use log::debug;

use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::filter::ValueSetFilter;
use crate::memory::SortOrderMemory;
use crate::op::Operator;
use crate::row::Row;
use crate::sort::{ColumnSort, Dir};
use crate::table::Table;
use crate::value::ColumnType;

/// Interactive sort and filter state of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnControl {
    column: usize,
    column_type: ColumnType,
    sortable: bool,
    filterable: bool,
    sort: Option<Dir>,
    criterion: Option<(Operator, String)>,
    allowed: Option<BTreeSet<String>>,
}

impl ColumnControl {
    /// Creates an idle, sortable and filterable control.
    pub fn new(column: usize, column_type: ColumnType) -> Self {
        ColumnControl {
            column,
            column_type,
            sortable: true,
            filterable: true,
            sort: None,
            criterion: None,
            allowed: None,
        }
    }

    /// The column this control drives.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The column type used by this control's descriptors.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Current sort direction, if sorting is on.
    pub fn sort(&self) -> Option<Dir> {
        self.sort
    }

    /// Turns sorting on in the given direction, or off.
    pub fn set_sort(&mut self, dir: Option<Dir>) {
        self.sort = dir;
    }

    /// Steps through ascending, descending and off.
    pub fn cycle_sort(&mut self) -> Option<Dir> {
        self.sort = match self.sort {
            None => Some(Dir::Asc),
            Some(Dir::Asc) => Some(Dir::Desc),
            Some(Dir::Desc) => None,
        };
        self.sort
    }

    /// Sets the operator test. An empty compare value clears it.
    pub fn set_criterion(&mut self, op: Operator, value: impl Into<String>) {
        let value = value.into();
        self.criterion = if value.is_empty() {
            None
        } else {
            Some((op, value))
        };
    }

    /// Sets the operator test from an operation token.
    pub fn set_criterion_token(&mut self, token: &str, value: impl Into<String>) -> Result<()> {
        let op = Operator::from_token(token)?;
        self.set_criterion(op, value);
        Ok(())
    }

    /// Removes the operator test.
    pub fn clear_criterion(&mut self) {
        self.criterion = None;
    }

    /// Restricts the column to the given values.
    pub fn set_allowed<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
    }

    /// Allows every value again.
    pub fn clear_allowed(&mut self) {
        self.allowed = None;
    }

    /// Returns `true` if this control currently filters its column.
    pub fn is_filtering(&self) -> bool {
        self.filterable && (self.criterion.is_some() || self.allowed.is_some())
    }

    /// The sort descriptor this control contributes, if any.
    pub fn sort_descriptor(&self) -> Option<ColumnSort> {
        let dir = self.sort.filter(|_| self.sortable)?;
        Some(ColumnSort::new(self.column, dir).column_type(self.column_type))
    }

    /// The filter descriptor this control contributes, if any.
    pub fn filter_descriptor(&self) -> Option<ValueSetFilter> {
        if !self.is_filtering() {
            return None;
        }
        let mut filter = ValueSetFilter::new(self.column).column_type(self.column_type);
        if let Some((op, value)) = &self.criterion {
            filter = filter.matching(*op, value.clone());
        }
        if let Some(allowed) = &self.allowed {
            filter = filter.allow(allowed.iter().cloned());
        }
        Some(filter)
    }
}

/// A table together with its column controls.
///
/// # Example
///
/// ```
/// use standout_tablesort::{Attachment, Dir};
///
/// let mut attachment = Attachment::attach(vec![
///     vec!["pear", "3"],
///     vec!["apple", "12"],
///     vec!["fig", "n/a"],
/// ]);
///
/// attachment.control_mut(1).unwrap().set_sort(Some(Dir::Desc));
/// attachment.control_mut(0).unwrap().set_criterion_token("!=", "pear").unwrap();
/// attachment.reconcile().unwrap();
///
/// let names: Vec<&str> = attachment
///     .table()
///     .get_rows(false)
///     .iter()
///     .map(|row| row[0])
///     .collect();
/// assert_eq!(names, vec!["apple", "fig"]);
/// ```
#[derive(Debug)]
pub struct Attachment<R> {
    table: Table<R>,
    controls: Vec<ColumnControl>,
    memory: Option<SortOrderMemory>,
}

impl<R: Row> Attachment<R> {
    /// Attaches to `rows` with one inferred-type control per column.
    pub fn attach(rows: impl IntoIterator<Item = R>) -> Self {
        Attachment::with_config(rows, &TableConfig::default())
    }

    /// Attaches to `rows`, typing and switching controls from `config`.
    pub fn with_config(rows: impl IntoIterator<Item = R>, config: &TableConfig) -> Self {
        let table = Table::with_column_count(rows, config.columns.len());
        let controls = (0..table.column_count())
            .map(|column| {
                let settings = config.column(column);
                let mut control = ColumnControl::new(column, config.column_type(column));
                control.sortable = settings.sortable;
                control.filterable = settings.filterable;
                control
            })
            .collect();
        Attachment {
            table,
            controls,
            memory: None,
        }
    }

    /// The underlying table.
    pub fn table(&self) -> &Table<R> {
        &self.table
    }

    /// All column controls, by column index.
    pub fn controls(&self) -> &[ColumnControl] {
        &self.controls
    }

    /// The control of one column.
    pub fn control(&self, column: usize) -> Result<&ColumnControl> {
        let columns = self.controls.len();
        self.controls
            .get(column)
            .ok_or(TableError::ColumnOutOfRange { column, columns })
    }

    /// Mutable access to the control of one column.
    pub fn control_mut(&mut self, column: usize) -> Result<&mut ColumnControl> {
        let columns = self.controls.len();
        self.controls
            .get_mut(column)
            .ok_or(TableError::ColumnOutOfRange { column, columns })
    }

    /// Sort-order memory, once a sort has happened.
    pub fn memory(&self) -> Option<&SortOrderMemory> {
        self.memory.as_ref()
    }

    /// Runs one reconciliation pass.
    ///
    /// Gathers every control's descriptors, applies the filters, then orders
    /// the sort descriptors through sort-order memory and applies them.
    pub fn reconcile(&mut self) -> Result<()> {
        let filters: Vec<ValueSetFilter> = self
            .controls
            .iter()
            .filter_map(ColumnControl::filter_descriptor)
            .collect();
        let sorts: Vec<ColumnSort> = self
            .controls
            .iter()
            .filter_map(ColumnControl::sort_descriptor)
            .collect();
        debug!(
            "reconciling: {} filters, {} sorts",
            filters.len(),
            sorts.len()
        );

        self.table.filter(&filters)?;

        if sorts.is_empty() && self.memory.is_none() {
            self.table.clear_sort();
            return Ok(());
        }
        let sorts = self
            .memory
            .get_or_insert_with(SortOrderMemory::new)
            .arrange(sorts);
        self.table.sort(&sorts)
    }

    /// Detaches, discarding sort-order memory and returning the rows in
    /// their current order.
    pub fn detach(self) -> Vec<R> {
        debug!("detaching table of {} rows", self.table.len());
        self.table.into_rows()
    }
}
