//! Deterministic per-entity formula chain.
//!
//! Every function here is a pure function of its arguments: no logging, no
//! config reads, no shared state. The orchestration layer (`engine`) is
//! responsible for resolving config lookups and recording observability
//! events around these calls.

use crate::error::EntityIssue;
use crate::model::{EntityRecord, YearResult};
use crate::scenario::{PoliticalMultipliers, PoliticalThresholds, ScenarioConfig};

/// Animals vaccinated in Year 1: `population * coverage`.
pub fn vaccinated_initial(population: f64, coverage: f64) -> f64 {
    population * coverage
}

/// Doses required accounting for wastage: `vaccinated * (1 + wastage)`.
pub fn doses_required(vaccinated: f64, wastage: f64) -> f64 {
    vaccinated * (1.0 + wastage)
}

/// Cost before political and delivery adjustments:
/// `doses * cost_per_animal`.
pub fn cost_before_adjustment(doses: f64, cost_per_animal: f64) -> f64 {
    doses * cost_per_animal
}

/// Stepwise political risk multiplier.
///
/// Bands are half-open on the left: `psi < low` is high risk,
/// `low <= psi < high` is moderate, `psi >= high` is low risk (the upper
/// boundary is inclusive).
pub fn political_multiplier(
    psi: f64,
    thresholds: &PoliticalThresholds,
    multipliers: &PoliticalMultipliers,
) -> f64 {
    if psi < thresholds.low {
        multipliers.high_risk
    } else if psi < thresholds.high {
        multipliers.moderate_risk
    } else {
        multipliers.low_risk
    }
}

/// Year-2 newborn base: `vaccinated_y1 * newborn_rate`.
pub fn newborn_count(vaccinated_y1: f64, newborn_rate: f64) -> f64 {
    vaccinated_y1 * newborn_rate
}

/// Total adjusted cost: `base * political_mult * delivery_mult`.
pub fn total_cost(cost_before_adjustment: f64, political_mult: f64, delivery_mult: f64) -> f64 {
    cost_before_adjustment * political_mult * delivery_mult
}

/// Figures for one year from a vaccinated count.
fn year_result(vaccinated: f64, wastage: f64, cost_per_animal: f64, adjustment: f64) -> YearResult {
    let doses = doses_required(vaccinated, wastage);
    YearResult {
        vaccinated,
        doses,
        doses_wasted: doses - vaccinated,
        cost: cost_before_adjustment(doses, cost_per_animal) * adjustment,
    }
}

/// Compute both program years for one entity.
///
/// Pure function of the record, the config, and the pre-resolved region
/// price. Year 2 cascades from the Year-1 vaccinated count, not from the
/// raw population.
pub fn compute_entity(
    record: &EntityRecord,
    config: &ScenarioConfig,
    cost_per_animal: f64,
) -> Result<(YearResult, YearResult), EntityIssue> {
    let population = record.population_base;
    if !population.is_finite() {
        return Err(EntityIssue::NonFinitePopulation(population));
    }
    if population < 0.0 {
        return Err(EntityIssue::NegativePopulation(population));
    }
    let psi = record.political_stability_index;
    if !psi.is_finite() {
        return Err(EntityIssue::NonFiniteStabilityIndex(psi));
    }

    let political_mult =
        political_multiplier(psi, &config.political_thresholds, &config.political_multipliers);
    let delivery_mult = config.delivery_multiplier().value();
    let adjustment = political_mult * delivery_mult;

    let vaccinated_y1 = vaccinated_initial(population, config.coverage_rate);
    let year1 = year_result(vaccinated_y1, config.wastage_rate, cost_per_animal, adjustment);

    let newborns = newborn_count(vaccinated_y1, config.newborn_rate(&record.species).value());
    let vaccinated_y2 = newborns * config.second_year_coverage_rate;
    let year2 = year_result(vaccinated_y2, config.wastage_rate, cost_per_animal, adjustment);

    Ok((year1, year2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;

    fn thresholds(low: f64, high: f64) -> PoliticalThresholds {
        PoliticalThresholds { low, high }
    }

    fn multipliers() -> PoliticalMultipliers {
        PoliticalMultipliers {
            high_risk: 2.0,
            moderate_risk: 1.5,
            low_risk: 1.0,
        }
    }

    #[test]
    fn vaccinated_is_population_times_coverage() {
        assert_eq!(vaccinated_initial(1000.0, 0.8), 800.0);
        assert_eq!(vaccinated_initial(0.0, 0.8), 0.0);
    }

    #[test]
    fn doses_cover_wastage() {
        assert_eq!(doses_required(800.0, 0.1), 880.0);
        // wastage >= 0 implies doses >= vaccinated
        assert!(doses_required(800.0, 0.0) >= 800.0);
    }

    #[test]
    fn base_cost_is_doses_times_price() {
        assert_eq!(cost_before_adjustment(880.0, 0.2), 176.0);
    }

    #[test]
    fn total_cost_applies_both_multipliers() {
        assert!((total_cost(176.0, 1.5, 1.2) - 316.8).abs() < 1e-9);
    }

    #[test]
    fn political_bands_are_half_open() {
        let t = thresholds(0.4, 0.7);
        let m = multipliers();
        // Just below low: high risk.
        assert_eq!(political_multiplier(0.399, &t, &m), 2.0);
        // At low: moderate.
        assert_eq!(political_multiplier(0.4, &t, &m), 1.5);
        assert_eq!(political_multiplier(0.5, &t, &m), 1.5);
        // Exactly at high: low risk (inclusive upper boundary).
        assert_eq!(political_multiplier(0.7, &t, &m), 1.0);
        assert_eq!(political_multiplier(0.8, &t, &m), 1.0);
    }

    fn worked_example_config() -> ScenarioConfig {
        let mut config = ScenarioConfig::default();
        config.coverage_rate = 0.8;
        config.wastage_rate = 0.1;
        config.second_year_coverage_rate = 1.0;
        config.delivery_channel = "Public".to_string();
        config
            .delivery_multiplier_by_channel
            .insert("Public".to_string(), 1.2);
        config.political_thresholds = thresholds(0.4, 0.7);
        config.political_multipliers = PoliticalMultipliers {
            high_risk: 1.0,
            moderate_risk: 1.5,
            low_risk: 2.0,
        };
        config
    }

    #[test]
    fn worked_example_year1() {
        // population 1000, coverage 0.8, wastage 0.1, price 0.2,
        // political 1.5, delivery 1.2 -> 316.8
        let config = worked_example_config();
        let record = EntityRecord {
            country: "Mali".into(),
            subregion: None,
            species: Species::Goats,
            population_base: 1000.0,
            political_stability_index: 0.5, // moderate band -> 1.5
            density: 1.0,
        };
        let (y1, _) = compute_entity(&record, &config, 0.2).unwrap();
        assert_eq!(y1.vaccinated, 800.0);
        assert_eq!(y1.doses, 880.0);
        assert_eq!(y1.doses_wasted, 80.0);
        assert!((y1.cost - 316.8).abs() < 1e-9);
    }

    #[test]
    fn worked_example_year2_cascades_from_year1() {
        // Goats newborn rate 0.6, second-year coverage 1.0:
        // newborns 480, doses 528, cost 528 * 0.2 * 1.5 * 1.2 = 190.08
        let config = worked_example_config();
        let record = EntityRecord {
            country: "Mali".into(),
            subregion: None,
            species: Species::Goats,
            population_base: 1000.0,
            political_stability_index: 0.5,
            density: 1.0,
        };
        let (_, y2) = compute_entity(&record, &config, 0.2).unwrap();
        assert_eq!(y2.vaccinated, 480.0);
        assert!((y2.doses - 528.0).abs() < 1e-9);
        assert!((y2.cost - 190.08).abs() < 1e-9);
    }

    #[test]
    fn unknown_species_uses_half_newborn_rate() {
        let config = worked_example_config();
        let record = EntityRecord {
            country: "Mali".into(),
            subregion: None,
            species: Species::Other("Cattle".into()),
            population_base: 1000.0,
            political_stability_index: 0.5,
            density: 1.0,
        };
        let (_, y2) = compute_entity(&record, &config, 0.2).unwrap();
        // 800 vaccinated * 0.5 fallback * 1.0 coverage
        assert_eq!(y2.vaccinated, 400.0);
    }

    #[test]
    fn per_entity_failures_are_reported_not_computed() {
        let config = worked_example_config();
        let mut record = EntityRecord {
            country: "Mali".into(),
            subregion: None,
            species: Species::Goats,
            population_base: -5.0,
            political_stability_index: 0.5,
            density: 1.0,
        };
        assert_eq!(
            compute_entity(&record, &config, 0.2).unwrap_err(),
            EntityIssue::NegativePopulation(-5.0)
        );

        record.population_base = f64::NAN;
        assert!(matches!(
            compute_entity(&record, &config, 0.2).unwrap_err(),
            EntityIssue::NonFinitePopulation(_)
        ));

        record.population_base = 1000.0;
        record.political_stability_index = f64::INFINITY;
        assert!(matches!(
            compute_entity(&record, &config, 0.2).unwrap_err(),
            EntityIssue::NonFiniteStabilityIndex(_)
        ));
    }

    #[test]
    fn zero_population_yields_zero_everything() {
        let config = worked_example_config();
        let record = EntityRecord {
            country: "Mali".into(),
            subregion: None,
            species: Species::Sheep,
            population_base: 0.0,
            political_stability_index: 0.5,
            density: 1.0,
        };
        let (y1, y2) = compute_entity(&record, &config, 0.2).unwrap();
        assert_eq!(y1, YearResult::default());
        assert_eq!(y2, YearResult::default());
    }
}
