//! Prediction History Ledger - append-only evaluation records
//!
//! Every evaluation appends a record, duplicates included. The deduplicated
//! view is a read-side projection: one record per distinct input tuple, the
//! most recently inserted, ordered by that record's position.
//!
//! ```text
//! storage: A(1.0) B(2.0) A(3.0)
//! view:          B(2.0) A(3.0)
//! ```

use crate::inputs::ClimateInputs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One evaluation: inputs and the predicted Brix
///
/// Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    sequence: u64,
    inputs: ClimateInputs,
    predicted_brix: f64,
    recorded_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Insertion index within the session (survives resets)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn inputs(&self) -> &ClimateInputs {
        &self.inputs
    }

    pub fn predicted_brix(&self) -> f64 {
        self.predicted_brix
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Append-only ledger of prediction records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionHistoryLedger {
    /// Records (oldest first)
    records: Vec<PredictionRecord>,

    /// Sequence number for the next record
    next_sequence: u64,
}

impl PredictionHistoryLedger {
    /// Create empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; no uniqueness check
    pub fn record(&mut self, inputs: ClimateInputs, predicted_brix: f64) -> &PredictionRecord {
        let record = PredictionRecord {
            sequence: self.next_sequence,
            inputs,
            predicted_brix,
            recorded_at: Utc::now(),
        };
        self.next_sequence += 1;

        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }

    /// Latest record per distinct inputs, in insertion order of the survivors
    pub fn deduplicated_view(&self) -> Vec<&PredictionRecord> {
        let mut seen: HashSet<&ClimateInputs> = HashSet::with_capacity(self.records.len());

        let mut view = Vec::new();
        for record in self.records.iter().rev() {
            if seen.insert(&record.inputs) {
                view.push(record);
            }
        }

        view.reverse();
        view
    }

    /// Number of distinct input tuples
    pub fn distinct_len(&self) -> usize {
        self.records
            .iter()
            .map(|record| &record.inputs)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Clear all records
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Raw append-only sequence (oldest first)
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&PredictionRecord> {
        self.records.last()
    }

    /// Most recent record for specific inputs
    pub fn latest_for(&self, inputs: &ClimateInputs) -> Option<&PredictionRecord> {
        self.records.iter().rev().find(|record| &record.inputs == inputs)
    }

    /// Count stored records (duplicates included)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
