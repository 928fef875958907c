//! Built-in row comparators.
//!
//! Provides [`Dir`] for sort direction, [`ColumnSort`] for the default
//! per-column comparator and [`FnSort`] for closures.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::row::Row;
use crate::traits::{Descriptor, RowSort};
use crate::value::{parse_number, ColumnType};

/// Direction of a column sort.
///
/// Direction reverses how two cells of the same kind compare. It never moves
/// non-numeric cells of an inferred column ahead of the numeric ones: those
/// stay at the bottom whichever way the column is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Lowest number or earliest text at the top.
    #[default]
    Asc,
    /// Highest number or latest text at the top.
    Desc,
}

impl Dir {
    /// Reverses `ordering` for [`Dir::Desc`].
    ///
    /// Callers apply it after any placement rule that must hold in both
    /// directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Name used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default column comparator.
///
/// Under [`ColumnType::Infer`] both trimmed cells go through a strict numeric
/// parse:
///
/// - both numbers: numeric order;
/// - neither a number: lexicographic order;
/// - only one a number: the other cell sorts after it, whatever the
///   direction.
///
/// Under [`ColumnType::Text`] cells always compare lexicographically.
/// `Dir::Desc` reverses every outcome except the non-numeric-last rule.
///
/// ```
/// use std::cmp::Ordering;
/// use standout_tablesort::{ColumnSort, Dir, RowSort};
///
/// let desc = ColumnSort::new(0, Dir::Desc);
/// assert_eq!(desc.compare(&["2"], &["10"]), Ordering::Greater);
/// assert_eq!(desc.compare(&["abc"], &["12"]), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSort {
    column: usize,
    dir: Dir,
    column_type: ColumnType,
}

impl ColumnSort {
    /// Creates a comparator on an inferred-type column.
    pub fn new(column: usize, dir: Dir) -> Self {
        ColumnSort {
            column,
            dir,
            column_type: ColumnType::Infer,
        }
    }

    /// Ascending comparator.
    pub fn asc(column: usize) -> Self {
        ColumnSort::new(column, Dir::Asc)
    }

    /// Descending comparator.
    pub fn desc(column: usize) -> Self {
        ColumnSort::new(column, Dir::Desc)
    }

    /// Sets the column type.
    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Returns the sort direction.
    pub fn dir(&self) -> Dir {
        self.dir
    }
}

impl Descriptor for ColumnSort {
    fn column(&self) -> Option<usize> {
        Some(self.column)
    }
}

impl<R: Row + ?Sized> RowSort<R> for ColumnSort {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        let (text_a, text_b) = (a.trimmed(self.column), b.trimmed(self.column));
        let ordering = match self.column_type {
            ColumnType::Text => text_a.cmp(text_b),
            ColumnType::Infer => match (parse_number(text_a), parse_number(text_b)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (None, None) => text_a.cmp(text_b),
                // decided before the direction is applied
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
            },
        };
        self.dir.apply(ordering)
    }
}

/// Comparator backed by a closure.
pub struct FnSort<F> {
    column: Option<usize>,
    f: F,
}

impl<F> FnSort<F> {
    /// Creates a whole-row comparator.
    pub fn new(f: F) -> Self {
        FnSort { column: None, f }
    }

    /// Binds the comparator to a column, so the engine checks the index and
    /// sort-order memory tracks it by column.
    pub fn on_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl<F> fmt::Debug for FnSort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSort")
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<F> Descriptor for FnSort<F> {
    fn column(&self) -> Option<usize> {
        self.column
    }
}

impl<R: ?Sized, F> RowSort<R> for FnSort<F>
where
    F: Fn(&R, &R) -> Ordering,
{
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (self.f)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Asc.flip(), Dir::Desc);
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!(Dir::default(), Dir::Asc);
    }

    #[test]
    fn infer_sorts_numerically() {
        let asc = ColumnSort::asc(0);
        assert_eq!(asc.compare(&["9"], &["10"]), Ordering::Less);
        assert_eq!(asc.compare(&["-3.5"], &["1e1"]), Ordering::Less);
        assert_eq!(asc.compare(&[" 10 "], &["10.0"]), Ordering::Equal);
    }

    #[test]
    fn non_numeric_sorts_last_in_both_directions() {
        for sort in [ColumnSort::asc(0), ColumnSort::desc(0)] {
            assert_eq!(sort.compare(&["12"], &["abc"]), Ordering::Less);
            assert_eq!(sort.compare(&["abc"], &["12"]), Ordering::Greater);
        }
    }

    #[test]
    fn both_non_numeric_fall_back_to_text() {
        let asc = ColumnSort::asc(0);
        assert_eq!(asc.compare(&["abc"], &["abc"]), Ordering::Equal);
        assert_eq!(asc.compare(&["abc"], &["abd"]), Ordering::Less);
        assert_eq!(ColumnSort::desc(0).compare(&["abc"], &["abd"]), Ordering::Greater);
    }

    #[test]
    fn empty_cell_is_not_a_number() {
        let asc = ColumnSort::asc(0);
        assert_eq!(asc.compare(&[""], &["0"]), Ordering::Greater);
    }

    #[test]
    fn text_sorts_lexicographically() {
        let text = ColumnSort::asc(0).column_type(ColumnType::Text);
        assert_eq!(text.compare(&["9"], &["10"]), Ordering::Greater);
        assert_eq!(text.compare(&["abc"], &["12"]), Ordering::Greater);
        let desc = ColumnSort::desc(0).column_type(ColumnType::Text);
        // no numeric-last rule for text columns
        assert_eq!(desc.compare(&["abc"], &["12"]), Ordering::Less);
    }

    #[test]
    fn fn_sort_compares_with_closure() {
        let by_len = FnSort::new(|a: &Vec<String>, b: &Vec<String>| a.len().cmp(&b.len()));
        assert_eq!(by_len.column(), None);
        let short = vec!["a".to_string()];
        let long = vec!["a".to_string(), "b".to_string()];
        assert_eq!(by_len.compare(&short, &long), Ordering::Less);
    }
}
