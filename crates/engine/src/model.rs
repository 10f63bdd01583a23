use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Small-ruminant species of an observation unit.
///
/// The two campaign species are closed variants; anything else is carried
/// verbatim so unknown species stay visible in outputs while taking the
/// documented newborn-rate fallback.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Species {
    Goats,
    Sheep,
    Other(String),
}

impl Species {
    /// Case-insensitive parse. Accepts singular and plural spellings as the
    /// source datasets use both ("Goat"/"Goats", "Sheep"/"Sheeps").
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "goat" | "goats" => Self::Goats,
            "sheep" | "sheeps" => Self::Sheep,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Canonical name used for config lookups and grouping keys.
    pub fn name(&self) -> &str {
        match self {
            Self::Goats => "Goats",
            Self::Sheep => "Sheep",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Species {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.name().to_string()
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One observation unit: a (geographic unit, species) pair with its
/// population estimate. Read-only for the lifetime of a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub country: String,
    #[serde(default)]
    pub subregion: Option<String>,
    pub species: Species,
    /// Population estimate at 100% coverage.
    pub population_base: f64,
    /// World Bank political stability index, roughly -2.5..2.5.
    pub political_stability_index: f64,
    /// Geographic density weight used by subregion-allocation consumers.
    /// Carried through normalization; the cost engine does not read it.
    #[serde(default = "default_density")]
    pub density: f64,
}

fn default_density() -> f64 {
    1.0
}

/// Pre-loaded records plus an optional content fingerprint of the source
/// dataset (set by the loader, echoed into result metadata for caching).
#[derive(Debug, Clone, Default)]
pub struct CampaignInput {
    pub records: Vec<EntityRecord>,
    pub dataset_fingerprint: Option<String>,
}

// ---------------------------------------------------------------------------
// Per-entity results
// ---------------------------------------------------------------------------

/// Derived figures for one entity in one program year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct YearResult {
    pub vaccinated: f64,
    pub doses: f64,
    pub doses_wasted: f64,
    pub cost: f64,
}

impl YearResult {
    pub fn accumulate(&mut self, other: &YearResult) {
        self.vaccinated += other.vaccinated;
        self.doses += other.doses;
        self.doses_wasted += other.doses_wasted;
        self.cost += other.cost;
    }
}

/// Computed outcome for one (geographic unit, species) pair across both
/// program years. The region is resolved once here and reused verbatim by
/// the aggregation engine, so entity-level and aggregate-level region
/// assignment cannot drift apart.
#[derive(Debug, Clone, Serialize)]
pub struct EntityOutcome {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    pub species: Species,
    pub region: String,
    pub region_fallback: bool,
    pub year1: YearResult,
    pub year2: YearResult,
}

/// An entity removed by the exclusion filter. Retained in the result so
/// callers can show what was excluded and why.
#[derive(Debug, Clone, Serialize)]
pub struct ExcludedEntity {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    pub species: Species,
    /// The disease-free list entry the country name matched.
    pub matched_name: String,
}

/// A per-entity computation failure. The entity contributes zero to all
/// aggregates; the rest of the run proceeds.
#[derive(Debug, Clone, Serialize)]
pub struct EntityFailure {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    pub species: Species,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Sum of constituent year results at one grouping level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateResult {
    pub key: String,
    pub member_count: usize,
    pub year1: YearResult,
    pub year2: YearResult,
    /// Year-1 cost + Year-2 cost.
    pub campaign_cost: f64,
}

impl AggregateResult {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn accumulate(&mut self, outcome: &EntityOutcome) {
        self.member_count += 1;
        self.year1.accumulate(&outcome.year1);
        self.year2.accumulate(&outcome.year2);
        self.campaign_cost = self.year1.cost + self.year2.cost;
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignSummary {
    pub entities_in: usize,
    pub entities_included: usize,
    pub entities_excluded: usize,
    pub entities_failed: usize,
    /// Duplicate (country, subregion, species) rows dropped before
    /// calculation; the later row won.
    pub duplicates_dropped: usize,
    pub countries_included: usize,
    pub countries_excluded: usize,
    /// Fallback branches taken, keyed by kind (species newborn rate,
    /// delivery channel, region).
    pub fallbacks: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignMeta {
    pub scenario_name: String,
    pub engine_version: String,
    pub run_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_fingerprint: Option<String>,
}

/// Full engine output: per-entity rows plus aggregates at every level.
/// Numbers only; currency formatting is a presentation concern.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignResult {
    pub meta: CampaignMeta,
    pub summary: CampaignSummary,
    pub entities: Vec<EntityOutcome>,
    pub excluded: Vec<ExcludedEntity>,
    pub failures: Vec<EntityFailure>,
    pub countries: Vec<AggregateResult>,
    pub regions: Vec<AggregateResult>,
    pub episystems: Vec<AggregateResult>,
    pub continental: AggregateResult,
}
