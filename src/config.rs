//! Explorer configuration
//!
//! Slider geometry, the predictor artifact location, and the call-site
//! debounce switch. Stored as JSON.

use crate::error::{Error, Result};
use crate::range::TemperatureBounds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Geometry of one slider
///
/// `floor` is the absolute lower bound. For the dependent sliders (avg, max)
/// the effective floor is raised to the current value of the field before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds {
    /// Absolute lower bound
    pub floor: f64,

    /// Upper bound, independent of the other fields
    pub ceiling: f64,

    /// Step granularity shown to the user
    pub step: f64,

    /// Initial value at session start
    pub default: f64,
}

impl SliderBounds {
    pub const fn new(floor: f64, ceiling: f64, step: f64, default: f64) -> Self {
        Self {
            floor,
            ceiling,
            step,
            default,
        }
    }

    /// Clamp `value` into `[lo, self.ceiling]`, where `lo` is the effective floor
    ///
    /// NaN resolves to `lo`.
    pub fn clamp_with_floor(&self, value: f64, lo: f64) -> f64 {
        let lo = lo.max(self.floor).min(self.ceiling);
        // A NaN ceiling leaves only the floor usable
        if value.is_nan() || !(lo <= self.ceiling) {
            lo
        } else {
            value.clamp(lo, self.ceiling)
        }
    }

    /// Clamp like [`Self::clamp_with_floor`], logging when the value moved
    pub fn settle(&self, field: &'static str, value: f64, lo: f64) -> f64 {
        let settled = self.clamp_with_floor(value, lo);
        if settled.to_bits() != value.to_bits() {
            debug!(
                field,
                requested = value,
                settled,
                "slider value outside valid range, clamped"
            );
        }
        settled
    }

    /// Clamp `value` into `[self.floor, self.ceiling]`
    pub fn clamp(&self, value: f64) -> f64 {
        self.clamp_with_floor(value, self.floor)
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        let finite = [self.floor, self.ceiling, self.step, self.default]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::Config(format!("{} bounds must be finite", name)));
        }
        if self.floor > self.ceiling {
            return Err(Error::Config(format!(
                "{} floor {} exceeds ceiling {}",
                name, self.floor, self.ceiling
            )));
        }
        if self.step <= 0.0 {
            return Err(Error::Config(format!("{} step must be positive", name)));
        }
        if self.default < self.floor || self.default > self.ceiling {
            return Err(Error::Config(format!(
                "{} default {} outside [{}, {}]",
                name, self.default, self.floor, self.ceiling
            )));
        }
        Ok(())
    }
}

/// Configuration for an explorer session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Minimum temperature slider (primary)
    pub min_temp: SliderBounds,

    /// Average temperature slider (floor tracks current min)
    pub avg_temp: SliderBounds,

    /// Maximum temperature slider (floor tracks current avg)
    pub max_temp: SliderBounds,

    /// Daylight hours slider (independent)
    pub daylight: SliderBounds,

    /// Pre-fitted predictor artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Skip an evaluation whose inputs equal the most recent record's
    #[serde(default)]
    pub debounce_identical: bool,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("brix_model.json")
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            min_temp: SliderBounds::new(0.0, 30.0, 0.5, 15.0),
            avg_temp: SliderBounds::new(0.0, 35.0, 0.5, 20.0),
            max_temp: SliderBounds::new(0.0, 40.0, 0.5, 25.0),
            daylight: SliderBounds::new(9.9, 14.4, 0.1, 12.0),
            model_path: default_model_path(),
            debounce_identical: false,
        }
    }
}

impl ExplorerConfig {
    /// Default geometry with a specific model artifact
    pub fn with_model_path(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Self::default()
        }
    }

    /// Default geometry with call-site debouncing of identical evaluations
    pub fn debounced() -> Self {
        Self {
            debounce_identical: true,
            ..Self::default()
        }
    }

    /// Check slider geometry
    pub fn validate(&self) -> Result<()> {
        TemperatureBounds::from(self).validate()?;
        self.daylight.validate("daylight")
    }

    /// Save to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    /// Load from disk and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: ExplorerConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
