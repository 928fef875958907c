//! The table engine.
//!
//! A [`Table`] holds the rows in the order they had when it was attached,
//! plus two independent pieces of state per row: its position in the current
//! order and its filtered flag. Filtering flags rows and never removes them;
//! sorting permutes them and never consults the flags.
//!
//! The engine does not render anything. A view adapter reads
//! [`Table::order`] and [`Table::is_filtered`] and applies them to the
//! concrete presentation.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{Result, TableError};
use crate::row::{Row, RowId};
use crate::traits::{compare_cascade, Descriptor, RowFilter, RowSort};

/// Rows under sort and filter control.
///
/// # Example
///
/// ```
/// use standout_tablesort::{ColumnFilter, ColumnSort, Operator, Table};
///
/// let mut table = Table::new(vec![
///     vec!["b", "2"],
///     vec!["a", "3"],
///     vec!["b", "1"],
/// ]);
///
/// table.sort(&[ColumnSort::asc(0), ColumnSort::asc(1)]).unwrap();
/// table.filter(&[ColumnFilter::new(1, Operator::LESS_THAN, "3")]).unwrap();
///
/// let visible: Vec<_> = table.get_rows(false).into_iter().cloned().collect();
/// assert_eq!(visible, vec![vec!["b", "1"], vec!["b", "2"]]);
///
/// table.clear_sort();
/// table.clear_filter();
/// assert_eq!(table.get_rows(false)[0], &vec!["b", "2"]);
/// ```
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
    order: Vec<RowId>,
    filtered: Vec<bool>,
    columns: usize,
}

impl<R: Row> Table<R> {
    /// Attaches to `rows`, capturing their order as the initial order.
    ///
    /// The column range is the widest row's cell count.
    pub fn new(rows: impl IntoIterator<Item = R>) -> Self {
        Table::with_column_count(rows, 0)
    }

    /// Attaches to `rows` with a known column count, such as a header's.
    ///
    /// Rows wider than `columns` still widen the range.
    pub fn with_column_count(rows: impl IntoIterator<Item = R>, columns: usize) -> Self {
        let rows: Vec<R> = rows.into_iter().collect();
        let columns = rows.iter().map(Row::cell_count).fold(columns, usize::max);
        let len = rows.len();
        debug!("attached table: {} rows, {} columns", len, columns);
        Table {
            rows,
            order: (0..len).map(RowId).collect(),
            filtered: vec![false; len],
            columns,
        }
    }

    /// Number of rows, filtered or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of addressable columns.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of rows not flagged as filtered.
    pub fn visible_count(&self) -> usize {
        self.filtered.iter().filter(|flag| !**flag).count()
    }

    /// Returns the row with the given id.
    pub fn row(&self, id: RowId) -> Option<&R> {
        self.rows.get(id.0)
    }

    /// Current order as row ids. Includes filtered rows.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// Returns whether a row is flagged as filtered.
    pub fn is_filtered(&self, id: RowId) -> Result<bool> {
        self.filtered
            .get(id.0)
            .copied()
            .ok_or(TableError::UnknownRow(id))
    }

    /// Row ids in current order, skipping filtered rows unless asked.
    pub fn row_ids(&self, include_filtered: bool) -> Vec<RowId> {
        self.order
            .iter()
            .copied()
            .filter(|id| include_filtered || !self.filtered[id.0])
            .collect()
    }

    /// Rows in current order, skipping filtered rows unless asked.
    pub fn get_rows(&self, include_filtered: bool) -> Vec<&R> {
        self.row_ids(include_filtered)
            .into_iter()
            .map(|id| &self.rows[id.0])
            .collect()
    }

    /// Flags every row rejected by any descriptor.
    ///
    /// A row stays visible only when all descriptors include it. An empty
    /// list clears the filter. Descriptors are validated before any flag
    /// changes.
    pub fn filter<D: RowFilter<R>>(&mut self, descriptors: &[D]) -> Result<()> {
        if descriptors.is_empty() {
            self.clear_filter();
            return Ok(());
        }
        self.validate(descriptors)?;

        self.filtered = self
            .rows
            .iter()
            .map(|row| descriptors.iter().any(|d| !d.include(row)))
            .collect();

        debug!(
            "filtered with {} descriptors: {} of {} rows visible",
            descriptors.len(),
            self.visible_count(),
            self.rows.len()
        );
        Ok(())
    }

    /// Clears the filtered flag on every row.
    pub fn clear_filter(&mut self) {
        self.filtered.iter_mut().for_each(|flag| *flag = false);
        debug!("cleared filter on {} rows", self.rows.len());
    }

    /// Stable-sorts the current order by cascading the descriptors.
    ///
    /// The first descriptor decides; ties fall through to the next. Rows
    /// that compare equal under all of them keep their current relative
    /// order. An empty list restores the initial order.
    pub fn sort<D: RowSort<R>>(&mut self, descriptors: &[D]) -> Result<()> {
        if descriptors.is_empty() {
            self.clear_sort();
            return Ok(());
        }
        self.validate(descriptors)?;

        let rows = &self.rows;
        let mut order = self.order.clone();
        order.sort_by(|a, b| compare_cascade(descriptors, &rows[a.0], &rows[b.0]));
        self.order = order;

        debug!(
            "sorted {} rows by {} descriptors",
            self.rows.len(),
            descriptors.len()
        );
        Ok(())
    }

    /// Restores the initial order.
    pub fn clear_sort(&mut self) {
        self.order = (0..self.rows.len()).map(RowId).collect();
        debug!("restored initial order of {} rows", self.rows.len());
    }

    /// Sorted distinct values found in a column, for value pickers.
    ///
    /// Multi-value cells contribute each of their values.
    pub fn column_values(&self, column: usize, include_filtered: bool) -> Result<Vec<String>> {
        self.check_column(column)?;
        let values: BTreeSet<&str> = self
            .get_rows(include_filtered)
            .into_iter()
            .flat_map(|row| row.cell_values(column))
            .collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    /// Consumes the table, returning the rows in their current order.
    pub fn into_rows(self) -> Vec<R> {
        let mut slots: Vec<Option<R>> = self.rows.into_iter().map(Some).collect();
        self.order
            .iter()
            .filter_map(|id| slots[id.0].take())
            .collect()
    }

    fn validate<D: Descriptor>(&self, descriptors: &[D]) -> Result<()> {
        descriptors
            .iter()
            .filter_map(Descriptor::column)
            .try_for_each(|column| self.check_column(column))
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column < self.columns {
            Ok(())
        } else {
            Err(TableError::ColumnOutOfRange {
                column,
                columns: self.columns,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ColumnFilter, FnFilter};
    use crate::op::Operator;
    use crate::sort::{ColumnSort, Dir};

    fn rows() -> Vec<Vec<String>> {
        [["b", "2"], ["a", "3"], ["b", "1"], ["c", "x"]]
            .iter()
            .map(|cells| cells.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn first_cells(table: &Table<Vec<String>>, include_filtered: bool) -> Vec<String> {
        table
            .get_rows(include_filtered)
            .iter()
            .map(|row| format!("{}{}", row[0], row[1]))
            .collect()
    }

    #[test]
    fn attach_captures_initial_order() {
        let table = Table::new(rows());
        assert_eq!(table.len(), 4);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.order(), &[RowId(0), RowId(1), RowId(2), RowId(3)]);
        assert_eq!(table.visible_count(), 4);
    }

    #[test]
    fn cascading_sort() {
        let mut table = Table::new(rows());
        table
            .sort(&[ColumnSort::asc(0), ColumnSort::asc(1)])
            .unwrap();
        assert_eq!(first_cells(&table, true), vec!["a3", "b1", "b2", "cx"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut table = Table::new(rows());
        table.sort(&[ColumnSort::asc(0)]).unwrap();
        // b2 came before b1 originally
        assert_eq!(first_cells(&table, true), vec!["a3", "b2", "b1", "cx"]);
    }

    #[test]
    fn sort_keeps_filtered_rows_in_place() {
        let mut table = Table::new(rows());
        table
            .filter(&[ColumnFilter::new(0, Operator::EQUALS, "b")])
            .unwrap();
        table.sort(&[ColumnSort::new(1, Dir::Desc)]).unwrap();
        // "x" is not a number, so it stays last under Desc too
        assert_eq!(first_cells(&table, true), vec!["a3", "b2", "b1", "cx"]);
        assert_eq!(first_cells(&table, false), vec!["b2", "b1"]);
    }

    #[test]
    fn empty_sort_restores_initial_order() {
        let mut table = Table::new(rows());
        table.sort(&[ColumnSort::desc(1)]).unwrap();
        table.sort::<ColumnSort>(&[]).unwrap();
        assert_eq!(first_cells(&table, true), vec!["b2", "a3", "b1", "cx"]);
    }

    #[test]
    fn filter_flags_without_removing() {
        let mut table = Table::new(rows());
        table
            .filter(&[ColumnFilter::new(1, Operator::GREATER_THAN, "1")])
            .unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.visible_count(), 2);
        assert!(table.is_filtered(RowId(2)).unwrap());
        assert!(table.is_filtered(RowId(3)).unwrap());
        assert!(!table.is_filtered(RowId(0)).unwrap());
        assert_eq!(table.row_ids(false), vec![RowId(0), RowId(1)]);
    }

    #[test]
    fn empty_filter_clears_flags() {
        let mut table = Table::new(rows());
        table
            .filter(&[ColumnFilter::new(0, Operator::EQUALS, "a")])
            .unwrap();
        table.filter::<ColumnFilter>(&[]).unwrap();
        assert_eq!(table.visible_count(), 4);
    }

    #[test]
    fn out_of_range_column_is_rejected_without_mutation() {
        let mut table = Table::new(rows());
        table
            .filter(&[ColumnFilter::new(0, Operator::EQUALS, "a")])
            .unwrap();
        table.sort(&[ColumnSort::desc(0)]).unwrap();
        let order = table.order().to_vec();

        let err = table
            .filter(&[
                ColumnFilter::new(0, Operator::EQUALS, "b"),
                ColumnFilter::new(5, Operator::EQUALS, "b"),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnOutOfRange {
                column: 5,
                columns: 2
            }
        );
        assert_eq!(table.visible_count(), 1);

        assert!(table
            .sort(&[ColumnSort::asc(0), ColumnSort::asc(2)])
            .is_err());
        assert_eq!(table.order(), order.as_slice());
    }

    #[test]
    fn whole_row_descriptors_skip_column_check() {
        let mut table = Table::new(rows());
        let filter = FnFilter::new(|row: &Vec<String>| row[1] != "x");
        table.filter(&[filter]).unwrap();
        assert_eq!(table.visible_count(), 3);
    }

    #[test]
    fn unknown_row_is_an_error() {
        let table = Table::new(rows());
        assert_eq!(
            table.is_filtered(RowId(9)),
            Err(TableError::UnknownRow(RowId(9)))
        );
        assert!(table.row(RowId(9)).is_none());
    }

    #[test]
    fn column_values_are_distinct_and_sorted() {
        let mut table = Table::new(rows());
        assert_eq!(table.column_values(0, false).unwrap(), vec!["a", "b", "c"]);
        table
            .filter(&[ColumnFilter::new(0, Operator::NOT_EQUAL, "b")])
            .unwrap();
        assert_eq!(table.column_values(0, false).unwrap(), vec!["a", "c"]);
        assert_eq!(table.column_values(0, true).unwrap(), vec!["a", "b", "c"]);
        assert!(table.column_values(2, true).is_err());
    }

    #[test]
    fn header_widens_column_range() {
        let table = Table::with_column_count(rows(), 4);
        assert_eq!(table.column_count(), 4);
        assert!(Table::<Vec<String>>::new(Vec::new()).is_empty());
    }

    #[test]
    fn into_rows_follows_current_order() {
        let mut table = Table::new(rows());
        table.sort(&[ColumnSort::asc(1)]).unwrap();
        let rows = table.into_rows();
        let keys: Vec<&str> = rows.iter().map(|row| row[1].as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "3", "x"]);
    }
}
