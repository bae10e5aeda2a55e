//! Explorer Session - one interactive exploration
//!
//! Owns the temperature controller, the daylight value, the history ledger
//! and the predictor. Every accepted input change runs exactly one
//! synchronous evaluation cycle:
//!
//! ```text
//! set_* → controller settles → predictor → ledger append
//! ```
//!
//! Renderers read [`ExplorerSession::current_inputs`] and
//! [`ExplorerSession::history`] between cycles.

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::inputs::ClimateInputs;
use crate::ledger::{PredictionHistoryLedger, PredictionRecord};
use crate::predictor::{LinearBrixModel, Predictor};
use crate::range::{ConstrainedRangeController, TemperatureBounds, TemperatureField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session-scoped explorer state
#[derive(Debug, Clone)]
pub struct ExplorerSession<P = LinearBrixModel> {
    id: String,
    config: ExplorerConfig,
    controller: ConstrainedRangeController,
    daylight_hours: f64,
    ledger: PredictionHistoryLedger,
    predictor: P,
    last_prediction: Option<f64>,
    metadata: SessionMetadata,
}

/// Lifetime counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Predictor calls made
    pub evaluations: usize,

    /// Evaluations skipped by the identical-input debounce
    pub debounced: usize,

    /// History resets
    pub resets: usize,
}

/// Session statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub evaluations: usize,
    pub debounced: usize,
    pub stored_records: usize,
    pub distinct_records: usize,
    pub resets: usize,
}

impl ExplorerSession<LinearBrixModel> {
    /// Open a session, loading the model artifact named by `config`
    ///
    /// A missing or unusable artifact is fatal.
    pub fn open(config: ExplorerConfig) -> Result<Self> {
        let model = LinearBrixModel::load(&config.model_path)?;
        Self::new(config, model)
    }
}

impl<P: Predictor> ExplorerSession<P> {
    /// Create a session around an already-loaded predictor
    pub fn new(config: ExplorerConfig, predictor: P) -> Result<Self> {
        config.validate()?;

        let controller = ConstrainedRangeController::new(TemperatureBounds::from(&config))?;
        let daylight_hours = config.daylight.clamp(config.daylight.default);
        let id = uuid::Uuid::new_v4().to_string();

        info!(session_id = %id, "explorer session started");

        Ok(Self {
            id,
            config,
            controller,
            daylight_hours,
            ledger: PredictionHistoryLedger::new(),
            predictor,
            last_prediction: None,
            metadata: SessionMetadata {
                started_at: Utc::now(),
                evaluations: 0,
                debounced: 0,
                resets: 0,
            },
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn controller(&self) -> &ConstrainedRangeController {
        &self.controller
    }

    pub fn ledger(&self) -> &PredictionHistoryLedger {
        &self.ledger
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Current settled tuple
    pub fn current_inputs(&self) -> ClimateInputs {
        let (min, avg, max) = self.controller.values();
        ClimateInputs::new(min, avg, max, self.daylight_hours)
    }

    /// Most recent prediction, absent only before the first evaluation
    ///
    /// Kept apart from the ledger, so a history reset does not blank it.
    pub fn current_prediction(&self) -> Option<f64> {
        self.last_prediction
    }

    pub fn set_min_temp(&mut self, value: f64) -> PredictionRecord {
        self.set_temperature(TemperatureField::Min, value)
    }

    pub fn set_avg_temp(&mut self, value: f64) -> PredictionRecord {
        self.set_temperature(TemperatureField::Avg, value)
    }

    pub fn set_max_temp(&mut self, value: f64) -> PredictionRecord {
        self.set_temperature(TemperatureField::Max, value)
    }

    /// Apply one temperature update and evaluate the settled state
    pub fn set_temperature(&mut self, field: TemperatureField, value: f64) -> PredictionRecord {
        self.controller.set(field, value);
        self.evaluate()
    }

    /// Set daylight hours (independent of temperatures) and evaluate
    pub fn set_daylight_hours(&mut self, value: f64) -> PredictionRecord {
        let daylight = &self.config.daylight;
        self.daylight_hours = daylight.settle("daylight_hours", value, daylight.floor);
        self.evaluate()
    }

    /// Run one evaluation cycle on the current tuple
    ///
    /// With `debounce_identical`, inputs equal to the most recent record's are
    /// not re-predicted and that record is returned instead.
    pub fn evaluate(&mut self) -> PredictionRecord {
        let inputs = self.current_inputs();

        if self.config.debounce_identical {
            if let Some(latest) = self.ledger.latest() {
                if latest.inputs() == &inputs {
                    self.metadata.debounced += 1;
                    debug!(sequence = latest.sequence(), "identical inputs, evaluation debounced");
                    return latest.clone();
                }
            }
        }

        let predicted_brix = self.predictor.predict(&inputs);
        self.metadata.evaluations += 1;
        self.last_prediction = Some(predicted_brix);

        let record = self.ledger.record(inputs, predicted_brix);
        debug!(
            sequence = record.sequence(),
            min_temp = inputs.min_temp,
            avg_temp = inputs.avg_temp,
            max_temp = inputs.max_temp,
            daylight_hours = inputs.daylight_hours,
            predicted_brix,
            "evaluation recorded"
        );
        record.clone()
    }

    /// Re-run the cycle with unchanged inputs (a host rerun)
    ///
    /// Appends a duplicate record unless debouncing is enabled.
    pub fn refresh(&mut self) -> PredictionRecord {
        self.evaluate()
    }

    /// Deduplicated history for display
    pub fn history(&self) -> Vec<&PredictionRecord> {
        self.ledger.deduplicated_view()
    }

    /// Clear the history ledger
    pub fn reset_history(&mut self) {
        let cleared = self.ledger.len();
        self.ledger.reset();
        self.metadata.resets += 1;
        info!(session_id = %self.id, cleared, "prediction history reset");
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.id.clone(),
            started_at: self.metadata.started_at,
            evaluations: self.metadata.evaluations,
            debounced: self.metadata.debounced,
            stored_records: self.ledger.len(),
            distinct_records: self.ledger.distinct_len(),
            resets: self.metadata.resets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sum_predictor(inputs: &ClimateInputs) -> f64 {
        inputs.features().iter().sum::<f64>() / 10.0
    }

    fn session() -> ExplorerSession<fn(&ClimateInputs) -> f64> {
        ExplorerSession::new(ExplorerConfig::default(), sum_predictor as fn(&ClimateInputs) -> f64)
            .unwrap()
    }

    #[test]
    fn test_starts_empty_at_defaults() {
        let session = session();

        assert_eq!(session.current_inputs(), ClimateInputs::new(15.0, 20.0, 25.0, 12.0));
        assert!(session.ledger().is_empty());
        assert!(session.current_prediction().is_none());
    }

    #[test]
    fn test_each_change_records_once() {
        let mut session = session();

        session.set_min_temp(22.0);
        session.set_daylight_hours(13.0);

        assert_eq!(session.ledger().len(), 2);
        assert_eq!(
            session.ledger().latest().unwrap().inputs(),
            &ClimateInputs::new(22.0, 22.0, 25.0, 13.0)
        );
    }

    #[test]
    fn test_refresh_appends_duplicate() {
        let mut session = session();

        session.evaluate();
        session.refresh();

        assert_eq!(session.ledger().len(), 2);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_debounce_skips_predictor() {
        let calls = Cell::new(0);
        let predictor = |_: &ClimateInputs| {
            calls.set(calls.get() + 1);
            9.0
        };
        let mut session = ExplorerSession::new(ExplorerConfig::debounced(), predictor).unwrap();

        session.evaluate();
        session.refresh();
        session.set_max_temp(25.0);

        assert_eq!(calls.get(), 1);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.stats().debounced, 2);
    }

    #[test]
    fn test_daylight_clamped() {
        let mut session = session();

        let record = session.set_daylight_hours(20.0);
        assert_eq!(record.inputs().daylight_hours, 14.4);

        let record = session.set_daylight_hours(1.0);
        assert_eq!(record.inputs().daylight_hours, 9.9);
    }

    #[test]
    fn test_reset_history() {
        let mut session = session();
        session.evaluate();
        session.set_avg_temp(21.0);

        session.reset_history();

        let stats = session.stats();
        assert_eq!(stats.stored_records, 0);
        assert_eq!(stats.resets, 1);
        assert_eq!(stats.evaluations, 2);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_prediction_survives_history_reset() {
        let mut session = session();
        let record = session.set_min_temp(18.0);

        session.reset_history();

        assert!(session.history().is_empty());
        assert_eq!(session.current_prediction(), Some(record.predicted_brix()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExplorerConfig::default();
        config.daylight.floor = 20.0;

        assert!(ExplorerSession::new(config, sum_predictor as fn(&ClimateInputs) -> f64).is_err());
    }
}
