//! Append-only operations ledger.
//!
//! Replaces the informal growing list of log rows with an explicit log
//! abstraction: append and full read-back, no removal or mutation of past
//! entries. Entry order equals execution order, which equals chronological
//! order because the driver replays observations strictly by date.

use chrono::NaiveDate;

/// One executed action with its period and rationale.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub date: NaiveDate,
    pub action: String,
    /// Valuation percentile at the time of the action.
    pub percentile: f64,
    /// Cash amount involved, where applicable.
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Operation>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, op: Operation) {
        self.entries.push(op);
    }

    pub fn entries(&self) -> &[Operation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
