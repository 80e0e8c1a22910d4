//! Bounded record of completed orders for informational queries

use tracing::debug;
use crate::types::OrderExecuted;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionHistory {
    records: Vec<OrderExecuted>,
    capacity: u64,
}

impl ExecutionHistory {
    pub fn new(capacity: u64) -> Self {
        Self { records: Vec::new(), capacity }
    }

    /// Restores exported records, keeping only the newest `capacity`
    pub fn from_records(mut records: Vec<OrderExecuted>, capacity: u64) -> Self {
        let keep = usize::try_from(capacity).unwrap_or(usize::MAX);
        let excess = records.len().saturating_sub(keep);
        records.drain(..excess);
        Self { records, capacity }
    }

    /// Keeps only the last `capacity` records
    pub fn record(&mut self, entry: OrderExecuted) {
        if self.capacity == 0 {
            return;
        }
        self.records.push(entry);
        if self.records.len() as u64 > self.capacity {
            self.records.remove(0);
            debug!("Execution history full, dropped oldest record");
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OrderExecuted] {
        &self.records
    }

    /// Oldest-first page and the total number of records held
    pub fn paginated(&self, offset: u64, limit: u64) -> (Vec<OrderExecuted>, u64) {
        let total = self.records.len() as u64;

        let start = offset.min(total) as usize;
        let end = offset.saturating_add(limit).min(total) as usize;

        (self.records[start..end].to_vec(), total)
    }
}
