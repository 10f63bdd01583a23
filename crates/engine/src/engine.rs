//! Orchestration: validate the scenario, dedupe records, run the per-entity
//! calculator inside a per-entity failure boundary, apply the exclusion
//! filter, and roll results up through every aggregation level.
//!
//! Observability lives here, not in the formula chain: the engine emits
//! structured `tracing` events for fallbacks, duplicates, exclusions, and
//! entity failures.

use std::collections::BTreeMap;

use crate::aggregate;
use crate::calc;
use crate::error::EngineError;
use crate::exclusion;
use crate::geography;
use crate::model::{
    CampaignInput, CampaignMeta, CampaignResult, CampaignSummary, EntityFailure, EntityOutcome,
    EntityRecord,
};
use crate::scenario::ScenarioConfig;

/// Run a full campaign computation. Synchronous and allocation-fresh:
/// identical inputs produce bit-for-bit identical results (timestamp
/// aside), and nothing is retained between calls.
pub fn run(config: &ScenarioConfig, input: &CampaignInput) -> Result<CampaignResult, EngineError> {
    config.validate()?;

    let mut summary = CampaignSummary {
        entities_in: input.records.len(),
        ..CampaignSummary::default()
    };

    let records = dedupe(&input.records, &mut summary);

    let mut outcomes = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        let region = geography::region_for(&record.country);
        if region.is_fallback() {
            tracing::debug!(
                country = %record.country,
                region = region.value(),
                "unmapped country assigned default region"
            );
            *summary.fallbacks.entry("region".to_string()).or_insert(0) += 1;
        }
        if config.newborn_rate(&record.species).is_fallback() {
            *summary
                .fallbacks
                .entry("newborn_rate".to_string())
                .or_insert(0) += 1;
        }

        let cost_per_animal = config.cost_per_animal(region.value()).value();
        match calc::compute_entity(record, config, cost_per_animal) {
            Ok((year1, year2)) => outcomes.push(EntityOutcome {
                country: record.country.clone(),
                subregion: record.subregion.clone(),
                species: record.species.clone(),
                region: region.value().to_string(),
                region_fallback: region.is_fallback(),
                year1,
                year2,
            }),
            Err(issue) => {
                tracing::warn!(
                    country = %record.country,
                    species = %record.species,
                    %issue,
                    "entity computation failed; contributes zero to aggregates"
                );
                failures.push(EntityFailure {
                    country: record.country.clone(),
                    subregion: record.subregion.clone(),
                    species: record.species.clone(),
                    reason: issue.to_string(),
                });
            }
        }
    }

    if config.delivery_multiplier().is_fallback() {
        tracing::debug!(
            channel = %config.delivery_channel,
            "unknown delivery channel, multiplier defaults to 1.0"
        );
        *summary
            .fallbacks
            .entry("delivery_channel".to_string())
            .or_insert(0) += 1;
    }

    let (included, excluded) = exclusion::partition(outcomes);
    for entity in &excluded {
        tracing::debug!(country = %entity.country, matched = %entity.matched_name, "entity excluded as disease-free");
    }

    let countries = aggregate::by_country(&included);
    let regions = aggregate::by_region(&included);
    let episystems = aggregate::by_episystem(&included);
    let continental = aggregate::continental(&included);

    summary.entities_included = included.len();
    summary.entities_excluded = excluded.len();
    summary.entities_failed = failures.len();
    summary.countries_included = countries.len();
    summary.countries_excluded = {
        let mut seen = std::collections::BTreeSet::new();
        excluded.iter().for_each(|e| {
            seen.insert(exclusion::normalize_name(&e.country));
        });
        seen.len()
    };

    Ok(CampaignResult {
        meta: CampaignMeta {
            scenario_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            dataset_fingerprint: input.dataset_fingerprint.clone(),
        },
        summary,
        entities: included,
        excluded,
        failures,
        countries,
        regions,
        episystems,
        continental,
    })
}

/// At most one record per (country, subregion, species) is authoritative.
/// Later rows overwrite earlier ones; every overwrite is counted and
/// logged rather than silently absorbed.
fn dedupe<'a>(
    records: &'a [EntityRecord],
    summary: &mut CampaignSummary,
) -> Vec<&'a EntityRecord> {
    let mut by_key: BTreeMap<(String, String, String), &EntityRecord> = BTreeMap::new();
    for record in records {
        let key = (
            record.country.clone(),
            record.subregion.clone().unwrap_or_default(),
            record.species.name().to_string(),
        );
        if let Some(previous) = by_key.insert(key, record) {
            summary.duplicates_dropped += 1;
            tracing::warn!(
                country = %previous.country,
                species = %previous.species,
                "duplicate entity row dropped, later row wins"
            );
        }
    }
    by_key.into_values().collect()
}
