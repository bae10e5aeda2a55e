//! Export - renderer-facing projections of a session
//!
//! Table rows for the history display, a summary of the current inputs, and
//! a JSON snapshot of the deduplicated history. The snapshot is a one-way
//! artifact; sessions are never restored from it.

use crate::error::Result;
use crate::inputs::ClimateInputs;
use crate::ledger::PredictionRecord;
use crate::predictor::Predictor;
use crate::session::ExplorerSession;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One history table row, formatted for display
///
/// Column order: avg, max, min, daylight, brix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
    pub daylight_hours: String,
    pub predicted_brix: String,
}

impl HistoryRow {
    pub fn from_record(record: &PredictionRecord) -> Self {
        let inputs = record.inputs();
        Self {
            avg_temp: format!("{:.2}°C", inputs.avg_temp),
            max_temp: format!("{:.2}°C", inputs.max_temp),
            min_temp: format!("{:.2}°C", inputs.min_temp),
            daylight_hours: format!("{:.2}h", inputs.daylight_hours),
            predicted_brix: format!("{:.2}°Bx", record.predicted_brix()),
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> [&str; 5] {
        [
            self.avg_temp.as_str(),
            self.max_temp.as_str(),
            self.min_temp.as_str(),
            self.daylight_hours.as_str(),
            self.predicted_brix.as_str(),
        ]
    }
}

/// Current inputs for the summary widgets (one decimal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
    pub daylight_hours: String,

    /// Latest prediction as `"{:.2}°Bx"`, absent before the first evaluation
    /// (a history reset keeps it)
    pub predicted_brix: Option<String>,
}

/// Exported deduplicated history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub session_id: String,

    /// Settled inputs at export time
    pub current: ClimateInputs,

    /// Deduplicated history (oldest survivor first)
    pub entries: Vec<PredictionRecord>,

    pub metadata: HistoryExportMetadata,
}

/// Metadata for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExportMetadata {
    pub exported_at: String,
    pub session_started_at: String,
    pub total_evaluations: usize,
    pub stored_records: usize,
    pub distinct_records: usize,
    pub resets: usize,
}

impl<P: Predictor> ExplorerSession<P> {
    /// History table rows from the deduplicated view
    pub fn history_table(&self) -> Vec<HistoryRow> {
        self.history().into_iter().map(HistoryRow::from_record).collect()
    }

    pub fn summary(&self) -> InputSummary {
        let inputs = self.current_inputs();
        InputSummary {
            avg_temp: format!("{:.1}°C", inputs.avg_temp),
            max_temp: format!("{:.1}°C", inputs.max_temp),
            min_temp: format!("{:.1}°C", inputs.min_temp),
            daylight_hours: format!("{:.1}h", inputs.daylight_hours),
            predicted_brix: self.current_prediction().map(|brix| format!("{:.2}°Bx", brix)),
        }
    }

    pub fn export_history_data(&self) -> HistoryExport {
        let stats = self.stats();

        HistoryExport {
            session_id: stats.session_id,
            current: self.current_inputs(),
            entries: self.history().into_iter().cloned().collect(),
            metadata: HistoryExportMetadata {
                exported_at: chrono::Utc::now().to_rfc3339(),
                session_started_at: stats.started_at.to_rfc3339(),
                total_evaluations: stats.evaluations,
                stored_records: stats.stored_records,
                distinct_records: stats.distinct_records,
                resets: stats.resets,
            },
        }
    }

    /// Export to JSON file
    pub fn export_to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let export = self.export_history_data();

        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)?;

        Ok(())
    }
}
