//! Descriptor traits consumed by the table engine.
//!
//! Column sessions hand the engine two kinds of descriptors on every
//! reconciliation: [`RowFilter`] decides whether a row stays visible, and
//! [`RowSort`] orders two rows. Both may be bound to a column (reported by
//! [`Descriptor::column`]) or look at the whole row.

use std::cmp::Ordering;

/// Common part of filter and sort descriptors.
pub trait Descriptor {
    /// The column this descriptor reads, or `None` for a whole-row descriptor.
    ///
    /// The engine rejects a call whose descriptors name a column outside the
    /// table before it touches any row.
    fn column(&self) -> Option<usize> {
        None
    }
}

/// Predicate deciding row visibility.
///
/// # Example
///
/// ```
/// use standout_tablesort::{Descriptor, Row, RowFilter};
///
/// /// Hides rows whose first cell is empty.
/// struct NonBlank;
///
/// impl Descriptor for NonBlank {
///     fn column(&self) -> Option<usize> {
///         Some(0)
///     }
/// }
///
/// impl<R: Row> RowFilter<R> for NonBlank {
///     fn include(&self, row: &R) -> bool {
///         !row.trimmed(0).is_empty()
///     }
/// }
///
/// assert!(NonBlank.include(&vec!["x".to_string()]));
/// assert!(!NonBlank.include(&vec![" ".to_string()]));
/// ```
pub trait RowFilter<R: ?Sized>: Descriptor {
    /// Returns `true` if the row should stay visible.
    fn include(&self, row: &R) -> bool;
}

/// Comparator ordering two rows.
pub trait RowSort<R: ?Sized>: Descriptor {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

impl<T: Descriptor + ?Sized> Descriptor for &T {
    fn column(&self) -> Option<usize> {
        (**self).column()
    }
}

impl<T: Descriptor + ?Sized> Descriptor for Box<T> {
    fn column(&self) -> Option<usize> {
        (**self).column()
    }
}

impl<R: ?Sized, T: RowFilter<R> + ?Sized> RowFilter<R> for &T {
    fn include(&self, row: &R) -> bool {
        (**self).include(row)
    }
}

impl<R: ?Sized, T: RowFilter<R> + ?Sized> RowFilter<R> for Box<T> {
    fn include(&self, row: &R) -> bool {
        (**self).include(row)
    }
}

impl<R: ?Sized, T: RowSort<R> + ?Sized> RowSort<R> for &T {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<R: ?Sized, T: RowSort<R> + ?Sized> RowSort<R> for Box<T> {
    fn compare(&self, a: &R, b: &R) -> Ordering {
        (**self).compare(a, b)
    }
}

/// Cascades a list of comparators.
///
/// The first comparator to report a non-equal ordering decides; ties fall
/// through to the next one. If every comparator ties, returns `Equal`.
pub fn compare_cascade<R: ?Sized, D: RowSort<R>>(descriptors: &[D], a: &R, b: &R) -> Ordering {
    descriptors
        .iter()
        .map(|descriptor| descriptor.compare(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
