//! Hierarchical aggregation: country, region, episystem, continental.
//!
//! All levels are commutative sums over the same included entity set, so
//! the aggregate at any level equals the sum of its children exactly
//! (modulo floating-point rounding order). Grouping maps are ordered so
//! output order is deterministic.

use std::collections::BTreeMap;

use crate::geography;
use crate::model::{AggregateResult, EntityOutcome};

fn collect(groups: BTreeMap<String, AggregateResult>) -> Vec<AggregateResult> {
    groups.into_values().collect()
}

/// Sum per country across all species and subregions.
pub fn by_country(outcomes: &[EntityOutcome]) -> Vec<AggregateResult> {
    let mut groups: BTreeMap<String, AggregateResult> = BTreeMap::new();
    for outcome in outcomes {
        groups
            .entry(outcome.country.clone())
            .or_insert_with(|| AggregateResult::new(&outcome.country))
            .accumulate(outcome);
    }
    collect(groups)
}

/// Sum per region. Uses the region already resolved on each outcome, so
/// entity-level and aggregate-level assignment are the same by
/// construction.
pub fn by_region(outcomes: &[EntityOutcome]) -> Vec<AggregateResult> {
    let mut groups: BTreeMap<String, AggregateResult> = BTreeMap::new();
    for outcome in outcomes {
        groups
            .entry(outcome.region.clone())
            .or_insert_with(|| AggregateResult::new(&outcome.region))
            .accumulate(outcome);
    }
    collect(groups)
}

/// Sum per episystem. Only entities whose (country, subregion) pair is in
/// a cluster participate; everything else is omitted here but still
/// present in country/region aggregates.
pub fn by_episystem(outcomes: &[EntityOutcome]) -> Vec<AggregateResult> {
    let mut groups: BTreeMap<String, AggregateResult> = BTreeMap::new();
    for outcome in outcomes {
        let Some(subregion) = outcome.subregion.as_deref() else {
            continue;
        };
        let Some(episystem) = geography::episystem_for(&outcome.country, subregion) else {
            continue;
        };
        groups
            .entry(episystem.to_string())
            .or_insert_with(|| AggregateResult::new(episystem))
            .accumulate(outcome);
    }
    collect(groups)
}

/// Sum over all included entities.
pub fn continental(outcomes: &[EntityOutcome]) -> AggregateResult {
    let mut total = AggregateResult::new("Africa");
    for outcome in outcomes {
        total.accumulate(outcome);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Species, YearResult};

    fn outcome(country: &str, subregion: Option<&str>, cost_y1: f64) -> EntityOutcome {
        EntityOutcome {
            country: country.into(),
            subregion: subregion.map(Into::into),
            species: Species::Goats,
            region: geography::region_for(country).value().into(),
            region_fallback: geography::region_for(country).is_fallback(),
            year1: YearResult {
                vaccinated: 100.0,
                doses: 110.0,
                doses_wasted: 10.0,
                cost: cost_y1,
            },
            year2: YearResult {
                vaccinated: 50.0,
                doses: 55.0,
                doses_wasted: 5.0,
                cost: cost_y1 / 2.0,
            },
        }
    }

    #[test]
    fn country_sums_cross_species_and_subregions() {
        let outcomes = vec![
            outcome("Chad", Some("Lac"), 100.0),
            outcome("Chad", Some("Kanem"), 50.0),
            outcome("Mali", None, 30.0),
        ];
        let countries = by_country(&outcomes);
        assert_eq!(countries.len(), 2);
        // BTreeMap order: Chad before Mali.
        assert_eq!(countries[0].key, "Chad");
        assert_eq!(countries[0].member_count, 2);
        assert_eq!(countries[0].year1.cost, 150.0);
        assert_eq!(countries[1].key, "Mali");
    }

    #[test]
    fn conservation_region_equals_sum_of_countries() {
        let outcomes = vec![
            outcome("Mali", None, 100.0),
            outcome("Niger", None, 80.0),
            outcome("Chad", None, 60.0),
        ];
        let countries = by_country(&outcomes);
        let regions = by_region(&outcomes);

        let west_countries: f64 = countries
            .iter()
            .filter(|c| geography::region_for(&c.key).value() == "West Africa")
            .map(|c| c.year1.cost)
            .sum();
        let west_region = regions.iter().find(|r| r.key == "West Africa").unwrap();
        assert!((west_region.year1.cost - west_countries).abs() < 1e-9);

        // Continental total equals sum over regions and over countries.
        let continental = continental(&outcomes);
        let region_sum: f64 = regions.iter().map(|r| r.year1.cost).sum();
        let country_sum: f64 = countries.iter().map(|c| c.year1.cost).sum();
        assert!((continental.year1.cost - region_sum).abs() < 1e-9);
        assert!((continental.year1.cost - country_sum).abs() < 1e-9);
    }

    #[test]
    fn summation_order_does_not_matter() {
        let mut outcomes = vec![
            outcome("Mali", None, 0.1),
            outcome("Mali", None, 0.2),
            outcome("Mali", None, 0.3),
        ];
        let forward = by_country(&outcomes)[0].year1.cost;
        outcomes.reverse();
        let backward = by_country(&outcomes)[0].year1.cost;
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn episystem_omits_unmapped_entities() {
        let outcomes = vec![
            outcome("Chad", Some("Ouaddai"), 100.0),   // Chad-Sudan (DARFUR)
            outcome("Chad", Some("Elsewhere"), 50.0),  // unmapped subregion
            outcome("Mali", None, 25.0),               // no subregion at all
        ];
        let episystems = by_episystem(&outcomes);
        assert_eq!(episystems.len(), 1);
        assert_eq!(episystems[0].key, "Chad-Sudan (DARFUR)");
        assert_eq!(episystems[0].member_count, 1);
        assert_eq!(episystems[0].year1.cost, 100.0);

        // Unmapped entities still count in country/region aggregates.
        let countries = by_country(&outcomes);
        let chad = countries.iter().find(|c| c.key == "Chad").unwrap();
        assert_eq!(chad.member_count, 2);
    }
}
