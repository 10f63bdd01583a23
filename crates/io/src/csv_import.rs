//! CSV import into a [`RawTable`].

use std::io::Read;
use std::path::Path;

use crate::error::IoError;
use crate::table::RawTable;

/// Read a CSV file into a raw table. The first record is the header row;
/// headers are kept verbatim for the normalizer to resolve.
pub fn read_csv_path(path: &Path) -> Result<RawTable, IoError> {
    let file = std::fs::File::open(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    read_csv(file, &path.display().to_string())
}

/// Read CSV from any reader. Split out so tests can feed in-memory data.
pub fn read_csv<R: Read>(reader: R, source: &str) -> Result<RawTable, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(IoError::EmptyTable(source.to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::Csv(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable {
        source: source.to_string(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_rows() {
        let data = "Country,Species,Population\nChad,Goats,\"1,200\"\nNiger,Sheep,800\n";
        let table = read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(table.headers, vec!["Country", "Species", "Population"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Chad", "Goats", "1,200"]);
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let data = "Country,Species,Population\nChad,Goats\n";
        let table = read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_csv_path(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herds.csv");
        std::fs::write(&path, "Country,Species,Population\nChad,Goats,1200\n").unwrap();

        let table = read_csv_path(&path).unwrap();
        assert_eq!(table.source, path.display().to_string());
        assert_eq!(table.rows, vec![vec!["Chad", "Goats", "1200"]]);
    }
}
