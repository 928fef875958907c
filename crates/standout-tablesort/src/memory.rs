//! Sort-order memory.
//!
//! Column sessions each contribute their own sort descriptor on every
//! reconciliation, without knowing about each other. [`SortOrderMemory`]
//! remembers the order in which sort keys became active so their relative
//! priority survives toggling columns on and off:
//!
//! - a key active now but not remembered is appended (lowest priority);
//! - a remembered key no longer active is forgotten, so reactivating it
//!   appends it again;
//! - descriptors are then ordered by their key's remembered position.
//!
//! ```
//! use standout_tablesort::{ColumnSort, SortKey, SortOrderMemory};
//!
//! let mut memory = SortOrderMemory::new();
//! memory.arrange(vec![ColumnSort::asc(1), ColumnSort::asc(2), ColumnSort::asc(3)]);
//! memory.arrange(vec![ColumnSort::asc(2), ColumnSort::asc(3)]);
//! let ordered = memory.arrange(vec![ColumnSort::asc(1), ColumnSort::asc(2), ColumnSort::asc(3)]);
//!
//! assert_eq!(
//!     memory.priority(),
//!     &[SortKey::Column(2), SortKey::Column(3), SortKey::Column(1)]
//! );
//! assert_eq!(ordered[0], ColumnSort::asc(2));
//! ```

use std::fmt;

use log::trace;

use crate::traits::Descriptor;

/// Identifies a sort descriptor across reconciliations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    /// A descriptor bound to a column.
    Column(usize),
    /// A whole-row descriptor. All of them share this key.
    Row,
}

impl SortKey {
    /// The key of a descriptor.
    pub fn of<D: Descriptor + ?Sized>(descriptor: &D) -> SortKey {
        SortKey::from(descriptor.column())
    }
}

impl From<Option<usize>> for SortKey {
    fn from(column: Option<usize>) -> Self {
        column.map_or(SortKey::Row, SortKey::Column)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Column(column) => write!(f, "column {}", column),
            SortKey::Row => f.write_str("row"),
        }
    }
}

/// Ordered list of active sort keys, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrderMemory {
    keys: Vec<SortKey>,
}

impl SortOrderMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        SortOrderMemory::default()
    }

    /// Current priority, highest first.
    pub fn priority(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns `true` if no key is remembered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of a key in the priority list.
    pub fn position(&self, key: SortKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    /// Records the keys active in this round.
    ///
    /// New keys are appended in the order given; keys absent from `active`
    /// are forgotten.
    pub fn remember(&mut self, active: &[SortKey]) {
        for key in active {
            if !self.keys.contains(key) {
                trace!("sort key {} activated", key);
                self.keys.push(*key);
            }
        }
        self.keys.retain(|key| {
            let keep = active.contains(key);
            if !keep {
                trace!("sort key {} deactivated", key);
            }
            keep
        });
    }

    /// Records this round's descriptors and returns them in priority order.
    ///
    /// Descriptors sharing a key keep their relative order.
    pub fn arrange<D: Descriptor>(&mut self, descriptors: Vec<D>) -> Vec<D> {
        let active: Vec<SortKey> = descriptors.iter().map(SortKey::of).collect();
        self.remember(&active);

        let mut ranked: Vec<(usize, D)> = active
            .into_iter()
            .zip(descriptors)
            .map(|(key, descriptor)| (self.position(key).unwrap_or(usize::MAX), descriptor))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, descriptor)| descriptor).collect()
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
