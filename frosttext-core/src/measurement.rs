//! Forecast measurements
//!
//! Global invariants enforced:
//! - A measurement is immutable once created
//! - Missing values are explicit, never encoded as magic floats

use serde::{Deserialize, Serialize};

/// A single aggregated forecast indicator, usually a percentage in 0-100.
///
/// Produced once per evaluation by the upstream numeric layer (mean/min/max
/// reductions over the gridded forecast) and consumed by the classifier.
/// The `uncertainty` is carried through the pipeline but does not affect
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// The value, or `None` when the upstream source had no data.
    pub value: Option<f64>,
    /// Standard error of the value as reported upstream.
    #[serde(default)]
    pub uncertainty: f64,
}

impl Measurement {
    /// Create a measurement with a known value
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Measurement {
            value: Some(value),
            uncertainty,
        }
    }

    /// Create a missing measurement
    pub fn missing() -> Self {
        Measurement {
            value: None,
            uncertainty: 0.0,
        }
    }

    /// True when the upstream source had no data
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Measurement::new(value, 0.0)
    }
}
