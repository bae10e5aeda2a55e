//! Constrained Range Controller - min/avg/max temperature sliders
//!
//! Three interdependent values kept under `min <= avg <= max` with a fixed
//! update priority:
//!
//! ```text
//! min (primary) → avg (floor = min) → max (floor = avg)
//! ```
//!
//! Raising a field pushes the fields after it up to meet it. Lowering a field
//! never drags the others down. Values outside the currently valid range are
//! clamped, never rejected.

use crate::config::{ExplorerConfig, SliderBounds};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Slider geometry for the three temperature fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBounds {
    pub min: SliderBounds,
    pub avg: SliderBounds,
    pub max: SliderBounds,
}

impl TemperatureBounds {
    /// Check each slider and the ceiling order
    ///
    /// Ceilings must be non-decreasing along min → avg → max, otherwise a
    /// legal min could force avg above its own ceiling.
    pub fn validate(&self) -> Result<()> {
        self.min.validate("min_temp")?;
        self.avg.validate("avg_temp")?;
        self.max.validate("max_temp")?;

        if self.min.ceiling > self.avg.ceiling || self.avg.ceiling > self.max.ceiling {
            return Err(Error::Config(
                "temperature ceilings must satisfy min <= avg <= max".to_string(),
            ));
        }

        Ok(())
    }
}

impl From<&ExplorerConfig> for TemperatureBounds {
    fn from(config: &ExplorerConfig) -> Self {
        Self {
            min: config.min_temp,
            avg: config.avg_temp,
            max: config.max_temp,
        }
    }
}

/// Which temperature field an update targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureField {
    Min,
    Avg,
    Max,
}

impl TemperatureField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Min => "min_temp",
            Self::Avg => "avg_temp",
            Self::Max => "max_temp",
        }
    }
}

/// Keeps min, avg and max consistent under a total order
///
/// Deserialized state is re-settled through the setters, so a stored
/// unordered tuple comes back ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredController")]
pub struct ConstrainedRangeController {
    min: f64,
    avg: f64,
    max: f64,
    bounds: TemperatureBounds,
}

/// Wire shape of a controller before re-settling
#[derive(Deserialize)]
struct StoredController {
    min: f64,
    avg: f64,
    max: f64,
    bounds: TemperatureBounds,
}

impl TryFrom<StoredController> for ConstrainedRangeController {
    type Error = Error;

    fn try_from(stored: StoredController) -> Result<Self> {
        let mut ctl = Self::new(stored.bounds)?;
        ctl.set_min(stored.min);
        ctl.set_avg(stored.avg);
        ctl.set_max(stored.max);
        Ok(ctl)
    }
}

impl Default for ConstrainedRangeController {
    fn default() -> Self {
        // Built-in geometry is known valid
        Self::settled(TemperatureBounds::from(&ExplorerConfig::default()))
    }
}

impl ConstrainedRangeController {
    /// Create at the default position for `bounds`
    ///
    /// avg starts at its default when that is reachable from min, otherwise
    /// at min. max starts at the larger of its default and avg. Invalid
    /// geometry is [`Error::Config`].
    pub fn new(bounds: TemperatureBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self::settled(bounds))
    }

    fn settled(bounds: TemperatureBounds) -> Self {
        let min = bounds.min.clamp(bounds.min.default);

        let avg = if min <= bounds.avg.default {
            bounds.avg.default.min(bounds.avg.ceiling)
        } else {
            min
        };
        let avg = bounds.avg.clamp_with_floor(avg, min);

        let max = bounds.max.clamp_with_floor(bounds.max.default.max(avg), avg);

        Self {
            min,
            avg,
            max,
            bounds,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn avg(&self) -> f64 {
        self.avg
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn bounds(&self) -> &TemperatureBounds {
        &self.bounds
    }

    /// Settled `(min, avg, max)`
    pub fn values(&self) -> (f64, f64, f64) {
        (self.min, self.avg, self.max)
    }

    /// Valid range for the min slider
    pub fn min_range(&self) -> RangeInclusive<f64> {
        self.bounds.min.floor..=self.bounds.min.ceiling
    }

    /// Valid range for the avg slider, a function of current min
    pub fn avg_range(&self) -> RangeInclusive<f64> {
        self.min.max(self.bounds.avg.floor)..=self.bounds.avg.ceiling
    }

    /// Valid range for the max slider, a function of current avg
    pub fn max_range(&self) -> RangeInclusive<f64> {
        self.avg.max(self.bounds.max.floor)..=self.bounds.max.ceiling
    }

    /// Set min, pushing avg and then max up if they fall below it
    ///
    /// Returns whether the settled tuple changed.
    pub fn set_min(&mut self, value: f64) -> bool {
        let before = self.values();
        let value = self.bounds.min.settle(TemperatureField::Min.name(), value, self.bounds.min.floor);

        self.min = value;
        if self.avg < self.min {
            self.avg = self.min;
        }
        if self.max < self.avg {
            self.max = self.avg;
        }

        self.changed_since(before)
    }

    /// Set avg within `[min, ceiling]`, pushing max up if it falls below
    pub fn set_avg(&mut self, value: f64) -> bool {
        let before = self.values();
        let value = self.bounds.avg.settle(TemperatureField::Avg.name(), value, self.min);

        self.avg = value;
        if self.max < self.avg {
            self.max = self.avg;
        }

        self.changed_since(before)
    }

    /// Set max within `[avg, ceiling]`
    pub fn set_max(&mut self, value: f64) -> bool {
        let before = self.values();
        self.max = self.bounds.max.settle(TemperatureField::Max.name(), value, self.avg);

        self.changed_since(before)
    }

    /// Dispatch an update by field
    pub fn set(&mut self, field: TemperatureField, value: f64) -> bool {
        match field {
            TemperatureField::Min => self.set_min(value),
            TemperatureField::Avg => self.set_avg(value),
            TemperatureField::Max => self.set_max(value),
        }
    }

    /// Whether `0 <= min <= avg <= max` and every field is under its ceiling
    pub fn is_consistent(&self) -> bool {
        self.bounds.min.floor <= self.min
            && self.min <= self.avg
            && self.avg <= self.max
            && self.min <= self.bounds.min.ceiling
            && self.avg <= self.bounds.avg.ceiling
            && self.max <= self.bounds.max.ceiling
    }

    fn changed_since(&self, before: (f64, f64, f64)) -> bool {
        let (min, avg, max) = before;
        min.to_bits() != self.min.to_bits()
            || avg.to_bits() != self.avg.to_bits()
            || max.to_bits() != self.max.to_bits()
    }
}
