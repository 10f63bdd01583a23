use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geography;
use crate::model::Species;

/// Newborn-rate fallback for species outside the configured mapping.
pub const DEFAULT_NEWBORN_RATE: f64 = 0.5;

/// Delivery multiplier fallback for channels outside the configured mapping.
pub const DEFAULT_DELIVERY_MULTIPLIER: f64 = 1.0;

/// Per-animal cost fallback for regions outside the configured mapping.
pub const DEFAULT_COST_PER_ANIMAL: f64 = 0.25;

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Result of a closed-set parameter lookup. Fallbacks are a first-class
/// outcome, not an incidental `.get().unwrap_or()`, so default behavior is
/// visible to callers and testable on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<T> {
    Known(T),
    Fallback(T),
}

impl<T: Copy> Lookup<T> {
    pub fn value(&self) -> T {
        match self {
            Self::Known(v) | Self::Fallback(v) => *v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Stepwise political-risk thresholds on the stability index.
/// Bands are half-open: `psi < low`, `low <= psi < high`, `psi >= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoliticalThresholds {
    pub low: f64,
    pub high: f64,
}

/// Cost multipliers per risk band. `high_risk` applies below the low
/// threshold, `low_risk` at or above the high threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoliticalMultipliers {
    pub high_risk: f64,
    pub moderate_risk: f64,
    pub low_risk: f64,
}

/// Immutable snapshot of all user-adjustable parameters for one run.
///
/// Treated as a value object: callers replace the whole config and rerun
/// rather than mutating parameters in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Fraction of the base population vaccinated in Year 1.
    pub coverage_rate: f64,
    /// Fractional inflation of doses over the vaccinated count.
    pub wastage_rate: f64,
    /// Fraction of Year-2 newborns vaccinated.
    pub second_year_coverage_rate: f64,
    /// Fraction of Year-1 vaccinated treated as the Year-2 newborn base,
    /// keyed by canonical species name.
    pub newborn_rate_by_species: BTreeMap<String, f64>,
    pub delivery_channel: String,
    pub delivery_multiplier_by_channel: BTreeMap<String, f64>,
    pub political_thresholds: PoliticalThresholds,
    pub political_multipliers: PoliticalMultipliers,
    /// Per-dose base price in USD, keyed by region name.
    pub cost_per_animal_by_region: BTreeMap<String, f64>,
}

fn default_name() -> String {
    "Default Scenario".to_string()
}

impl Default for ScenarioConfig {
    /// Reference-deployment defaults.
    fn default() -> Self {
        Self {
            name: default_name(),
            coverage_rate: 0.8,
            wastage_rate: 0.10,
            second_year_coverage_rate: 1.0,
            newborn_rate_by_species: BTreeMap::from([
                ("Goats".to_string(), 0.6),
                ("Sheep".to_string(), 0.4),
            ]),
            delivery_channel: "Mixed".to_string(),
            delivery_multiplier_by_channel: BTreeMap::from([
                ("Public".to_string(), 1.2),
                ("Mixed".to_string(), 1.0),
                ("Private".to_string(), 0.85),
            ]),
            political_thresholds: PoliticalThresholds {
                low: -1.0,
                high: 0.0,
            },
            political_multipliers: PoliticalMultipliers {
                high_risk: 2.0,
                moderate_risk: 1.5,
                low_risk: 1.0,
            },
            cost_per_animal_by_region: geography::REGIONS
                .iter()
                .map(|r| (r.to_string(), DEFAULT_COST_PER_ANIMAL))
                .collect(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: ScenarioConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Range checks on load. Out-of-range values are rejected rather than
    /// silently clamped.
    pub fn validate(&self) -> Result<(), EngineError> {
        let rate_in_unit = |name: &str, v: f64| -> Result<(), EngineError> {
            if !(0.0..=1.0).contains(&v) {
                return Err(EngineError::ConfigValidation(format!(
                    "{name} must lie in [0, 1], got {v}"
                )));
            }
            Ok(())
        };

        rate_in_unit("coverage_rate", self.coverage_rate)?;
        rate_in_unit("second_year_coverage_rate", self.second_year_coverage_rate)?;
        if !(0.0..1.0).contains(&self.wastage_rate) {
            return Err(EngineError::ConfigValidation(format!(
                "wastage_rate must lie in [0, 1), got {}",
                self.wastage_rate
            )));
        }
        for (species, rate) in &self.newborn_rate_by_species {
            rate_in_unit(&format!("newborn_rate_by_species.{species}"), *rate)?;
        }

        let t = &self.political_thresholds;
        if !t.low.is_finite() || !t.high.is_finite() || t.low > t.high {
            return Err(EngineError::ConfigValidation(format!(
                "political_thresholds must be finite with low <= high, got ({}, {})",
                t.low, t.high
            )));
        }

        let positive = |name: &str, v: f64| -> Result<(), EngineError> {
            if !v.is_finite() || v <= 0.0 {
                return Err(EngineError::ConfigValidation(format!(
                    "{name} must be a positive finite number, got {v}"
                )));
            }
            Ok(())
        };
        let m = &self.political_multipliers;
        positive("political_multipliers.high_risk", m.high_risk)?;
        positive("political_multipliers.moderate_risk", m.moderate_risk)?;
        positive("political_multipliers.low_risk", m.low_risk)?;
        for (channel, mult) in &self.delivery_multiplier_by_channel {
            positive(&format!("delivery_multiplier_by_channel.{channel}"), *mult)?;
        }
        for (region, cost) in &self.cost_per_animal_by_region {
            if !cost.is_finite() || *cost < 0.0 {
                return Err(EngineError::ConfigValidation(format!(
                    "cost_per_animal_by_region.{region} must be non-negative, got {cost}"
                )));
            }
        }

        Ok(())
    }

    /// Newborn rate for a species; unknown species take 0.5.
    pub fn newborn_rate(&self, species: &Species) -> Lookup<f64> {
        match self.newborn_rate_by_species.get(species.name()) {
            Some(rate) => Lookup::Known(*rate),
            None => Lookup::Fallback(DEFAULT_NEWBORN_RATE),
        }
    }

    /// Multiplier for the configured delivery channel; unknown channels
    /// take 1.0.
    pub fn delivery_multiplier(&self) -> Lookup<f64> {
        match self
            .delivery_multiplier_by_channel
            .get(&self.delivery_channel)
        {
            Some(mult) => Lookup::Known(*mult),
            None => Lookup::Fallback(DEFAULT_DELIVERY_MULTIPLIER),
        }
    }

    /// Per-animal cost for a region; regions missing from the mapping take
    /// the continental default price.
    pub fn cost_per_animal(&self, region: &str) -> Lookup<f64> {
        match self.cost_per_animal_by_region.get(region) {
            Some(cost) => Lookup::Known(*cost),
            None => Lookup::Fallback(DEFAULT_COST_PER_ANIMAL),
        }
    }

    /// Stable fingerprint of the full parameter set, used as half of a
    /// result-cache key.
    pub fn fingerprint(&self) -> String {
        // serde_json on BTreeMaps is deterministic for a given config, and
        // these types always serialize: string keys only, and non-finite
        // floats become null rather than erroring.
        serde_json::to_string(self).expect("scenario config serializes to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ScenarioConfig::default().validate().unwrap();
    }

    #[test]
    fn from_toml_minimal() {
        let toml = r#"
name = "Sahel pilot"
coverage_rate = 0.7
wastage_rate = 0.15
second_year_coverage_rate = 1.0
delivery_channel = "Public"

[newborn_rate_by_species]
Goats = 0.6
Sheep = 0.4

[delivery_multiplier_by_channel]
Public = 1.2
Mixed = 1.0
Private = 0.85

[political_thresholds]
low = 0.4
high = 0.7

[political_multipliers]
high_risk = 1.0
moderate_risk = 1.5
low_risk = 2.0

[cost_per_animal_by_region]
"West Africa" = 0.2
"East Africa" = 0.3
"#;
        let config = ScenarioConfig::from_toml(toml).unwrap();
        assert_eq!(config.name, "Sahel pilot");
        assert_eq!(config.coverage_rate, 0.7);
        assert_eq!(config.delivery_multiplier().value(), 1.2);
    }

    #[test]
    fn reject_out_of_range_coverage() {
        let mut config = ScenarioConfig::default();
        config.coverage_rate = 1.2;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coverage_rate"));
    }

    #[test]
    fn reject_wastage_of_one() {
        let mut config = ScenarioConfig::default();
        config.wastage_rate = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_inverted_thresholds() {
        let mut config = ScenarioConfig::default();
        config.political_thresholds = PoliticalThresholds { low: 0.7, high: 0.4 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_species_falls_back() {
        let config = ScenarioConfig::default();
        let lookup = config.newborn_rate(&Species::Other("Cattle".into()));
        assert!(lookup.is_fallback());
        assert_eq!(lookup.value(), 0.5);
        assert!(!config.newborn_rate(&Species::Goats).is_fallback());
    }

    #[test]
    fn unknown_channel_falls_back_to_unit() {
        let mut config = ScenarioConfig::default();
        config.delivery_channel = "Drone".to_string();
        let lookup = config.delivery_multiplier();
        assert!(lookup.is_fallback());
        assert_eq!(lookup.value(), 1.0);
    }

    #[test]
    fn unknown_region_cost_falls_back() {
        let config = ScenarioConfig::default();
        let lookup = config.cost_per_animal("Atlantis");
        assert!(lookup.is_fallback());
        assert_eq!(lookup.value(), DEFAULT_COST_PER_ANIMAL);
    }

    #[test]
    fn fingerprint_is_stable_and_parameter_sensitive() {
        let a = ScenarioConfig::default();
        let b = ScenarioConfig::default();
        assert_eq!(a.fingerprint(), b.fingerprint());
        let mut c = ScenarioConfig::default();
        c.coverage_rate = 0.9;
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_non_finite_configs() {
        // Configs that would fail validation still get real fingerprints
        // rather than collapsing onto a shared sentinel.
        let mut a = ScenarioConfig::default();
        a.political_thresholds.low = f64::NAN;
        let mut b = ScenarioConfig::default();
        b.political_thresholds.high = f64::INFINITY;
        assert!(!a.fingerprint().is_empty());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
