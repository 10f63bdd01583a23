//! `pprcost run` / `validate` / `normalize` — campaign cost commands.

use std::path::{Path, PathBuf};

use pprcost_engine::model::CampaignInput;
use pprcost_engine::ScenarioConfig;
use pprcost_io::normalize::NormalizeReport;
use pprcost_io::{dataset_fingerprint, normalize, read_csv_path, read_xlsx, RawTable};

use crate::exit_codes::{EXIT_DATA, EXIT_ERROR, EXIT_SCENARIO};
use crate::CliError;

fn data_err(msg: impl Into<String>) -> CliError {
    CliError {
        code: EXIT_DATA,
        message: msg.into(),
        hint: None,
    }
}

fn scenario_err(msg: impl Into<String>) -> CliError {
    CliError {
        code: EXIT_SCENARIO,
        message: msg.into(),
        hint: Some("run `pprcost validate <scenario.toml>` for details".into()),
    }
}

/// Read a data source by extension: `.csv` via the CSV reader, anything
/// else through the workbook reader.
fn read_source(path: &Path, sheet: Option<&str>) -> Result<RawTable, CliError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        read_csv_path(path).map_err(|e| data_err(e.to_string()))
    } else {
        read_xlsx(path, sheet).map_err(|e| data_err(e.to_string()))
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig, CliError> {
    match path {
        None => Ok(ScenarioConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                scenario_err(format!("cannot read {}: {e}", path.display()))
            })?;
            ScenarioConfig::from_toml(&text).map_err(|e| scenario_err(e.to_string()))
        }
    }
}

fn print_report(report: &NormalizeReport) {
    eprintln!("{}: {}", report.source, report.summary());
    for entry in &report.entries {
        eprintln!("  {entry}");
    }
}

pub fn cmd_run(
    data: PathBuf,
    scenario: Option<PathBuf>,
    sheet: Option<String>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_scenario(scenario.as_deref())?;

    let table = read_source(&data, sheet.as_deref())?;
    let (records, report) = normalize(&table);
    print_report(&report);

    let input = CampaignInput {
        dataset_fingerprint: Some(dataset_fingerprint(&records)),
        records,
    };

    let result = pprcost_engine::run(&config, &input).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: e.to_string(),
        hint: None,
    })?;
    tracing::info!(
        scenario = %result.meta.scenario_name,
        entities = result.summary.entities_included,
        campaign_cost = result.continental.campaign_cost,
        "campaign run complete"
    );

    let json_str = serde_json::to_string_pretty(&result).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("cannot write output: {e}"),
            hint: None,
        })?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &pprcost_engine::CampaignResult) {
    let s = &result.summary;
    println!(
        "scenario '{}': {} entities in, {} included, {} excluded, {} failed",
        result.meta.scenario_name,
        s.entities_in,
        s.entities_included,
        s.entities_excluded,
        s.entities_failed,
    );
    if s.duplicates_dropped > 0 {
        println!("  {} duplicate rows dropped (last record won)", s.duplicates_dropped);
    }
    for (kind, count) in &s.fallbacks {
        println!("  {count} {kind} fallbacks");
    }

    println!();
    println!(
        "{:<24} {:>14} {:>14} {:>14}",
        "region", "year-1 cost", "year-2 cost", "campaign cost"
    );
    for region in &result.regions {
        println!(
            "{:<24} {:>14.2} {:>14.2} {:>14.2}",
            region.key, region.year1.cost, region.year2.cost, region.campaign_cost
        );
    }
    let c = &result.continental;
    println!(
        "{:<24} {:>14.2} {:>14.2} {:>14.2}",
        c.key, c.year1.cost, c.year2.cost, c.campaign_cost
    );

    if !result.episystems.is_empty() {
        println!();
        println!("{:<32} {:>8} {:>14}", "episystem", "members", "campaign cost");
        for episystem in &result.episystems {
            println!(
                "{:<32} {:>8} {:>14.2}",
                episystem.key, episystem.member_count, episystem.campaign_cost
            );
        }
    }

    if !result.excluded.is_empty() {
        println!();
        println!("excluded (PPR-free): {}", excluded_country_list(&result.excluded));
    }
    for failure in &result.failures {
        eprintln!(
            "warning: {} / {} skipped: {}",
            failure.country,
            failure.species.name(),
            failure.reason
        );
    }
}

/// Unique excluded country names, sorted, regardless of row order.
fn excluded_country_list(excluded: &[pprcost_engine::model::ExcludedEntity]) -> String {
    let countries: std::collections::BTreeSet<&str> =
        excluded.iter().map(|e| e.country.as_str()).collect();
    countries.into_iter().collect::<Vec<_>>().join(", ")
}

pub fn cmd_validate(scenario: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&scenario)
        .map_err(|e| scenario_err(format!("cannot read {}: {e}", scenario.display())))?;
    let config = ScenarioConfig::from_toml(&text).map_err(|e| CliError {
        code: EXIT_SCENARIO,
        message: e.to_string(),
        hint: None,
    })?;
    println!("{}: ok ('{}')", scenario.display(), config.name);
    Ok(())
}

pub fn cmd_normalize(
    data: PathBuf,
    sheet: Option<String>,
    json_output: bool,
) -> Result<(), CliError> {
    let table = read_source(&data, sheet.as_deref())?;
    let (records, report) = normalize(&table);

    if json_output {
        let payload = serde_json::json!({
            "fingerprint": dataset_fingerprint(&records),
            "records": records,
            "report": report,
        });
        let json_str = serde_json::to_string_pretty(&payload).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{json_str}");
    } else {
        print_report(&report);
        println!("fingerprint: {}", dataset_fingerprint(&records));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprcost_engine::model::{ExcludedEntity, Species};

    fn excluded(country: &str, species: Species) -> ExcludedEntity {
        ExcludedEntity {
            country: country.to_string(),
            subregion: None,
            species,
            matched_name: country.to_string(),
        }
    }

    #[test]
    fn excluded_countries_print_once_even_when_interleaved() {
        // Per-species rows arrive grouped by nothing in particular; the
        // same country must not repeat in the display list.
        let rows = vec![
            excluded("Botswana", Species::Goats),
            excluded("Lesotho", Species::Goats),
            excluded("Botswana", Species::Sheep),
            excluded("Lesotho", Species::Sheep),
        ];
        assert_eq!(excluded_country_list(&rows), "Botswana, Lesotho");
    }
}
