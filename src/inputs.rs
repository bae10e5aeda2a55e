//! Climate inputs - the settled tuple handed to the predictor
//!
//! Equality and hashing are bit-exact over all four fields. Two tuples are
//! "the same" only if every field has identical `f64` bits, which is what the
//! history ledger keys on.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Number of features the predictor consumes
pub const FEATURE_COUNT: usize = 4;

/// Settled climate inputs for one evaluation
///
/// `new` does not check ordering. Values produced by an explorer session come
/// from the controller, so `min_temp <= avg_temp <= max_temp` holds for those.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClimateInputs {
    /// Daily minimum temperature (°C)
    pub min_temp: f64,

    /// Daily mean temperature (°C)
    pub avg_temp: f64,

    /// Daily maximum temperature (°C)
    pub max_temp: f64,

    /// Daylight hours
    pub daylight_hours: f64,
}

impl ClimateInputs {
    pub fn new(min_temp: f64, avg_temp: f64, max_temp: f64, daylight_hours: f64) -> Self {
        Self {
            min_temp,
            avg_temp,
            max_temp,
            daylight_hours,
        }
    }

    /// Feature vector in model column order: avg, max, min, daylight
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.avg_temp, self.max_temp, self.min_temp, self.daylight_hours]
    }

    /// Whether the temperature ordering holds
    pub fn is_ordered(&self) -> bool {
        self.min_temp <= self.avg_temp && self.avg_temp <= self.max_temp
    }

    fn key_bits(&self) -> [u64; FEATURE_COUNT] {
        [
            self.min_temp.to_bits(),
            self.avg_temp.to_bits(),
            self.max_temp.to_bits(),
            self.daylight_hours.to_bits(),
        ]
    }
}

// Bit-exact: 0.0 and -0.0 differ, NaN equals a NaN with the same payload.
impl PartialEq for ClimateInputs {
    fn eq(&self, other: &Self) -> bool {
        self.key_bits() == other.key_bits()
    }
}

impl Eq for ClimateInputs {}

impl Hash for ClimateInputs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_bits().hash(state);
    }
}
