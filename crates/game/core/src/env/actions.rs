//! Action pool oracle.
//!
//! Provides the load-time-populated pool of decoded action records that every
//! [`ActionTable`] indexes into.

use crate::action::{ActionRecord, ActionTable, RecordIndex};

/// Oracle providing decoded action records.
pub trait ActionOracle: Send + Sync {
    /// Returns the records covered by `table`, in order.
    ///
    /// `None` when the table reaches past the end of the pool.
    fn records(&self, table: ActionTable) -> Option<&[ActionRecord]>;

    /// Returns the record at `index`.
    fn record(&self, index: RecordIndex) -> Option<&ActionRecord>;
}

/// In-memory action pool backed by a vector of decoded records.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPool {
    records: Vec<ActionRecord>,
}

impl ActionPool {
    pub fn new(records: Vec<ActionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if every index of `table` lies inside the pool.
    pub fn covers(&self, table: ActionTable) -> bool {
        table.end as usize <= self.records.len()
    }

    pub fn as_slice(&self) -> &[ActionRecord] {
        &self.records
    }
}

impl ActionOracle for ActionPool {
    fn records(&self, table: ActionTable) -> Option<&[ActionRecord]> {
        self.records.get(table.begin as usize..table.end as usize)
    }

    fn record(&self, index: RecordIndex) -> Option<&ActionRecord> {
        self.records.get(index.0 as usize)
    }
}
