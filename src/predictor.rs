//! Predictor - maps settled climate inputs to a Brix value
//!
//! The explorer treats the predictor as a pure synchronous function. Any
//! `Fn(&ClimateInputs) -> f64` qualifies; [`LinearBrixModel`] is the
//! pre-fitted artifact loaded at session start.

use crate::error::{Error, Result};
use crate::inputs::{ClimateInputs, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Black-box Brix regressor
pub trait Predictor {
    /// Predicted Brix for `inputs`
    fn predict(&self, inputs: &ClimateInputs) -> f64;
}

impl<F> Predictor for F
where
    F: Fn(&ClimateInputs) -> f64,
{
    fn predict(&self, inputs: &ClimateInputs) -> f64 {
        self(inputs)
    }
}

/// Pre-fitted linear regressor over `[avg, max, min, daylight]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearBrixModel {
    /// Artifact name
    #[serde(default)]
    pub name: String,

    /// Weights in feature order
    pub coefficients: [f64; FEATURE_COUNT],

    /// Bias term
    pub intercept: f64,
}

impl LinearBrixModel {
    pub fn new(name: impl Into<String>, coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            name: name.into(),
            coefficients,
            intercept,
        }
    }

    /// Load artifact from disk
    ///
    /// Missing file is [`Error::ModelNotFound`]; anything else that prevents
    /// use is [`Error::ModelLoad`]. Both are fatal for the session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "model artifact missing");
            return Err(Error::ModelNotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "model artifact unreadable");
            Error::ModelLoad(format!("{}: {}", path.display(), e))
        })?;

        let model: LinearBrixModel = serde_json::from_str(&json).map_err(|e| {
            warn!(path = %path.display(), error = %e, "model artifact malformed");
            Error::ModelLoad(format!("{}: {}", path.display(), e))
        })?;

        model.validate()?;

        info!(path = %path.display(), name = %model.name, "model artifact loaded");
        Ok(model)
    }

    /// Save artifact to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let finite = self.coefficients.iter().all(|c| c.is_finite()) && self.intercept.is_finite();
        if !finite {
            return Err(Error::ModelLoad(format!(
                "model '{}' has non-finite parameters",
                self.name
            )));
        }
        Ok(())
    }
}

impl Predictor for LinearBrixModel {
    fn predict(&self, inputs: &ClimateInputs) -> f64 {
        self.coefficients
            .iter()
            .zip(inputs.features())
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}
