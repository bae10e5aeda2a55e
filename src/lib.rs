//! # Brixscope
//!
//! Interactive parameter exploration for a pre-fitted citrus sugar (Brix)
//! regressor over four climate features: mean, maximum and minimum
//! temperature, and daylight hours.
//!
//! ## Core Concept
//!
//! A host UI redraws on every interaction. Two pieces keep what it shows
//! sane:
//!
//! - **Constrained sliders** - min, avg and max temperature stay ordered
//!   (`min <= avg <= max`). Raising one pushes the later fields up; nothing is
//!   ever rejected, only clamped.
//! - **History ledger** - every evaluation appends a record, duplicates and
//!   all. Display reads a latest-wins view with one row per input tuple.
//!
//! ## Evaluation Cycle
//!
//! ```text
//! slider change → controller settles → predictor → ledger append → render
//! ```
//!
//! One synchronous cycle per accepted change. State lives in one
//! [`ExplorerSession`], never in globals.
//!
//! ## Example
//!
//! ```rust,no_run
//! use brixscope::{ExplorerConfig, ExplorerSession};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! // Fails fast if brix_model.json is missing or malformed
//! let mut session = ExplorerSession::open(ExplorerConfig::default())?;
//!
//! session.evaluate();
//! session.set_min_temp(22.0); // avg is pushed up to 22.0
//! session.set_daylight_hours(13.2);
//!
//! for row in session.history_table() {
//!     println!("{}", row.cells().join(" | "));
//! }
//!
//! session.export_to_json("brix_history.json")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod inputs;
pub mod ledger;
pub mod predictor;
pub mod range;
pub mod session;

// Re-exports
pub use crate::config::{ExplorerConfig, SliderBounds};
pub use crate::error::{Error, Result};
pub use crate::export::{HistoryExport, HistoryExportMetadata, HistoryRow, InputSummary};
pub use crate::inputs::{ClimateInputs, FEATURE_COUNT};
pub use crate::ledger::{PredictionHistoryLedger, PredictionRecord};
pub use crate::predictor::{LinearBrixModel, Predictor};
pub use crate::range::{ConstrainedRangeController, TemperatureBounds, TemperatureField};
pub use crate::session::{ExplorerSession, SessionMetadata, SessionStats};
