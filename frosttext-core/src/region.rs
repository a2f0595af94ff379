//! Sub-region inputs and per-region outcomes

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::measurement::Measurement;

/// Sub-region identifier. The combiner pairs exactly one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionId {
    Coast,
    Inland,
}

impl RegionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionId::Coast => "coast",
            RegionId::Inland => "inland",
        }
    }

    /// The region-name phrase key used to qualify a sentence
    pub fn phrase_key(&self) -> &'static str {
        match self {
            RegionId::Coast => "rannikolla",
            RegionId::Inland => "sisämaassa",
        }
    }
}

impl FromStr for RegionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "coast" | "coastal" => Ok(RegionId::Coast),
            "inland" => Ok(RegionId::Inland),
            other => Err(anyhow!("unrecognized region identifier: {}", other)),
        }
    }
}

/// The four measurements supplied per sub-region by the upstream
/// aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInput {
    pub region: RegionId,
    pub season_coverage: Measurement,
    pub existing_event_coverage: Measurement,
    pub risk_probability: Measurement,
    pub severe_probability: Measurement,
}

/// Derived per-region outcome; never persisted.
///
/// `Inactive` means the region failed the admission gate (structurally
/// inactive); an admitted region whose risk falls below the lowest
/// reportable tier is `Active` with `tier == 0` (tier-0-active).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    Inactive,
    Active { tier: usize, severe: bool },
}

impl RegionOutcome {
    /// The reported tier: `None` when inactive, `Some(0..=5)` otherwise
    pub fn tier(&self) -> Option<usize> {
        match self {
            RegionOutcome::Inactive => None,
            RegionOutcome::Active { tier, .. } => Some(*tier),
        }
    }

    pub fn is_severe(&self) -> bool {
        matches!(self, RegionOutcome::Active { severe: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_round_trip() {
        assert_eq!("coast".parse::<RegionId>().unwrap(), RegionId::Coast);
        assert_eq!("coastal".parse::<RegionId>().unwrap(), RegionId::Coast);
        assert_eq!("inland".parse::<RegionId>().unwrap(), RegionId::Inland);
        assert_eq!(RegionId::Coast.as_str(), "coast");
    }

    #[test]
    fn test_unknown_region_id_is_error() {
        assert!("archipelago".parse::<RegionId>().is_err());
    }

    #[test]
    fn test_outcome_tier_accessor() {
        assert_eq!(RegionOutcome::Inactive.tier(), None);
        assert_eq!(
            RegionOutcome::Active {
                tier: 3,
                severe: false
            }
            .tier(),
            Some(3)
        );
    }

    #[test]
    fn test_region_id_serde_lowercase() {
        let id: RegionId = serde_json::from_str(r#""coast""#).unwrap();
        assert_eq!(id, RegionId::Coast);
        assert_eq!(serde_json::to_string(&RegionId::Inland).unwrap(), r#""inland""#);
    }
}
