//! Schema normalization: variant column names and shapes in, canonical
//! [`EntityRecord`]s out, with an audit trail of every correction.
//!
//! Nothing here is fatal. Missing optional columns are synthesized with
//! documented defaults, unparsable values fall back per field, and every
//! substitution is recorded in the report.

use std::collections::BTreeSet;

use serde::Serialize;

use pprcost_engine::model::{EntityRecord, Species};

use crate::table::RawTable;

/// Political stability index used when the column or value is absent.
pub const DEFAULT_PSI: f64 = 0.3;

/// Density weight used when the column or value is absent.
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Text placeholder for absent string fields.
pub const UNKNOWN: &str = "Unknown";

/// Population source columns, in priority order. The first one present
/// in the source wins.
const POPULATION_SOURCES: [&str; 4] = [
    "VADEMOS Forecasted Value",
    "VADEMOS National Forecasted Value",
    "100%_Coverage",
    "Population",
];

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Audit trail of one normalization pass, in the spirit of an import
/// report: structured counters plus human-readable entries.
#[derive(Debug, Default, Clone, Serialize)]
pub struct NormalizeReport {
    pub source: String,
    pub records_in: usize,
    pub records_out: usize,
    /// (source column, canonical column) renames applied.
    pub renames: Vec<(String, String)>,
    /// Canonical columns synthesized because no source column matched.
    pub defaulted_columns: Vec<String>,
    /// Duplicate or unnamed source columns dropped (first occurrence wins).
    pub dropped_columns: Vec<String>,
    /// Blank or missing population values treated as 0.
    pub blank_populations: usize,
    /// Non-numeric population values treated as 0.
    pub unparsable_populations: usize,
    /// Blank or non-numeric stability index values defaulted.
    pub defaulted_psi: usize,
    /// Human-readable audit entries, one per correction.
    pub entries: Vec<String>,
}

impl NormalizeReport {
    fn note(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// One-line summary suitable for display.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} records from {} rows",
            self.records_out, self.records_in
        )];
        if !self.renames.is_empty() {
            parts.push(format!("{} column renames", self.renames.len()));
        }
        if !self.defaulted_columns.is_empty() {
            parts.push(format!(
                "{} defaulted columns",
                self.defaulted_columns.len()
            ));
        }
        if !self.dropped_columns.is_empty() {
            parts.push(format!("{} dropped columns", self.dropped_columns.len()));
        }
        let value_fixes =
            self.blank_populations + self.unparsable_populations + self.defaulted_psi;
        if value_fixes > 0 {
            parts.push(format!("{value_fixes} defaulted values"));
        }
        parts.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

struct Columns {
    country: Option<usize>,
    subregion: Option<usize>,
    species: Option<usize>,
    population: Option<usize>,
    psi: Option<usize>,
    density: Option<usize>,
}

/// Find a column by name among deduplicated headers.
fn find(headers: &[(usize, &str)], name: &str) -> Option<usize> {
    headers.iter().find(|(_, h)| *h == name).map(|(i, _)| *i)
}

/// Find the first alias present; record a rename if it was not the
/// canonical name.
fn find_aliased(
    headers: &[(usize, &str)],
    canonical: &str,
    aliases: &[&str],
    report: &mut NormalizeReport,
) -> Option<usize> {
    if let Some(index) = find(headers, canonical) {
        return Some(index);
    }
    for alias in aliases {
        if let Some(index) = find(headers, alias) {
            report
                .renames
                .push((alias.to_string(), canonical.to_string()));
            report.note(format!("Mapped '{alias}' to '{canonical}'."));
            return Some(index);
        }
    }
    None
}

fn resolve_columns(table: &RawTable, report: &mut NormalizeReport) -> Columns {
    // Drop unnamed and duplicate headers deterministically: first
    // occurrence wins.
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut headers: Vec<(usize, &str)> = Vec::new();
    for (index, header) in table.headers.iter().enumerate() {
        let header = header.trim();
        if header.is_empty() {
            report.dropped_columns.push(format!("<unnamed #{index}>"));
            report.note(format!("Dropped unnamed column at position {index}."));
            continue;
        }
        if !seen.insert(header) {
            report.dropped_columns.push(header.to_string());
            report.note(format!("Dropped duplicate column '{header}'."));
            continue;
        }
        headers.push((index, header));
    }

    let population = POPULATION_SOURCES
        .iter()
        .find_map(|name| find(&headers, name).map(|index| (index, *name)));
    if let Some((_, name)) = population {
        if name != "Population" {
            report.note(format!("Set population base from '{name}'."));
        }
    }

    let columns = Columns {
        country: find(&headers, "Country"),
        subregion: find_aliased(&headers, "Subregion", &["ADM1", "ADM1_Name"], report),
        species: find_aliased(&headers, "Species", &["Specie"], report),
        population: population.map(|(index, _)| index),
        psi: find(&headers, "Political_Stability_Index"),
        density: find(&headers, "Density"),
    };

    let mut defaulted = |present: bool, name: &str, default: &str| {
        if !present {
            report.defaulted_columns.push(name.to_string());
            report.note(format!("Missing column '{name}'. Defaulted to {default}."));
        }
    };
    defaulted(columns.country.is_some(), "Country", UNKNOWN);
    defaulted(columns.species.is_some(), "Species", UNKNOWN);
    defaulted(columns.population.is_some(), "Population", "0");
    defaulted(columns.psi.is_some(), "Political_Stability_Index", "0.3");
    defaulted(columns.density.is_some(), "Density", "1.0");
    // Subregion is optional by contract; absence is not a correction.

    columns
}

// ---------------------------------------------------------------------------
// Value parsing
// ---------------------------------------------------------------------------

/// Parse a population value. Source data carries thousands separators
/// and "Unknown" placeholders.
fn parse_population(raw: &str) -> Result<Option<f64>, ()> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || cleaned == UNKNOWN {
        return Ok(None);
    }
    cleaned.parse::<f64>().map(Some).map_err(|_| ())
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
        .trim()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a raw table into canonical entity records. Never fails:
/// every irregularity is resolved with a documented default and recorded
/// in the report.
pub fn normalize(table: &RawTable) -> (Vec<EntityRecord>, NormalizeReport) {
    let mut report = NormalizeReport {
        source: table.source.clone(),
        records_in: table.rows.len(),
        ..NormalizeReport::default()
    };

    let columns = resolve_columns(table, &mut report);

    let mut records = Vec::with_capacity(table.rows.len());
    for (row_index, row) in table.rows.iter().enumerate() {
        let country = match cell(row, columns.country) {
            "" => UNKNOWN.to_string(),
            value => value.to_string(),
        };

        let subregion = match cell(row, columns.subregion) {
            "" => None,
            value => Some(value.to_string()),
        };

        let species = match cell(row, columns.species) {
            "" => Species::Other(UNKNOWN.to_string()),
            value => Species::parse(value),
        };

        let population_base = match parse_population(cell(row, columns.population)) {
            Ok(Some(value)) => value,
            Ok(None) => {
                report.blank_populations += 1;
                0.0
            }
            Err(()) => {
                report.unparsable_populations += 1;
                report.note(format!(
                    "Row {row_index}: non-numeric population '{}' treated as 0.",
                    cell(row, columns.population)
                ));
                0.0
            }
        };

        let political_stability_index = match cell(row, columns.psi).parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                report.defaulted_psi += 1;
                DEFAULT_PSI
            }
        };

        let density = cell(row, columns.density)
            .parse::<f64>()
            .unwrap_or(DEFAULT_DENSITY);

        records.push(EntityRecord {
            country,
            subregion,
            species,
            population_base,
            political_stability_index,
            density,
        });
    }

    report.records_out = records.len();
    tracing::info!(
        source = %report.source,
        records = report.records_out,
        corrections = report.entries.len(),
        "normalized source table"
    );
    (records, report)
}
