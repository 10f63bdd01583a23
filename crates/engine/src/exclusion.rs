//! Disease-free exclusion filter.
//!
//! Countries formally certified free of the disease (or that never
//! reported it) are removed before any aggregation. Matching is exact
//! after case-folding and whitespace removal; fuzzy matching is
//! deliberately not used at this boundary.

use crate::model::{EntityOutcome, ExcludedEntity};

/// Countries/zones excluded from all cost aggregates, per the WOAH
/// official disease status list plus never-reported countries. Spelling
/// variants are listed as they appear in the source datasets.
pub const DISEASE_FREE: &[&str] = &[
    "Botswana",
    "eSwatini",
    "Eswatini",
    "Kingdom of eSwatini",
    "Lesotho",
    "Madagascar",
    "Mauritius",
    "Namibia",
    "South Africa",
    // Never reported
    "Cabo Verde",
    "Cape Verde",
    "Sao Tome and Principe",
    "Malawi",
    "Mozambique",
    "Zambia",
    "Zimbabwe",
];

/// Case-fold and strip all whitespace, so "Kingdom of eSwatini" and
/// "kingdom ofeswatini" compare equal.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// The disease-free list entry a country matches, if any.
pub fn disease_free_match(country: &str) -> Option<&'static str> {
    let normalized = normalize_name(country);
    DISEASE_FREE
        .iter()
        .find(|entry| normalize_name(entry) == normalized)
        .copied()
}

/// Split computed outcomes into (included, excluded). Excluded entities
/// are retained for display; they contribute zero to every aggregate.
pub fn partition(outcomes: Vec<EntityOutcome>) -> (Vec<EntityOutcome>, Vec<ExcludedEntity>) {
    let mut included = Vec::with_capacity(outcomes.len());
    let mut excluded = Vec::new();

    for outcome in outcomes {
        match disease_free_match(&outcome.country) {
            Some(matched) => excluded.push(ExcludedEntity {
                country: outcome.country,
                subregion: outcome.subregion,
                species: outcome.species,
                matched_name: matched.to_string(),
            }),
            None => included.push(outcome),
        }
    }

    (included, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Species, YearResult};

    fn outcome(country: &str) -> EntityOutcome {
        EntityOutcome {
            country: country.into(),
            subregion: None,
            species: Species::Goats,
            region: "Southern Africa".into(),
            region_fallback: false,
            year1: YearResult::default(),
            year2: YearResult::default(),
        }
    }

    #[test]
    fn exact_names_are_excluded() {
        assert_eq!(disease_free_match("Botswana"), Some("Botswana"));
        assert_eq!(disease_free_match("Chad"), None);
    }

    #[test]
    fn matching_survives_case_and_spacing_variants() {
        assert!(disease_free_match("eSwatini").is_some());
        assert!(disease_free_match("Eswatini").is_some());
        assert!(disease_free_match("ESWATINI").is_some());
        assert!(disease_free_match("south  africa").is_some());
        assert!(disease_free_match("KingdomofeSwatini").is_some());
    }

    #[test]
    fn no_partial_matching() {
        // Prefix/substring overlap must not exclude.
        assert_eq!(disease_free_match("South Africa Republic"), None);
        assert_eq!(disease_free_match("Zambezi"), None);
    }

    #[test]
    fn partition_keeps_excluded_entities_visible() {
        let (included, excluded) =
            partition(vec![outcome("Chad"), outcome("eSwatini"), outcome("Mali")]);
        assert_eq!(included.len(), 2);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].country, "eSwatini");
        assert_eq!(excluded[0].matched_name, "eSwatini");
    }
}
