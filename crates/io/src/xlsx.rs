//! XLSX import into a [`RawTable`].

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::IoError;
use crate::table::RawTable;

/// Read one sheet of a workbook into a raw table. With no sheet name the
/// first sheet is used. The first row is taken as the header row.
pub fn read_xlsx(path: &Path, sheet: Option<&str>) -> Result<RawTable, IoError> {
    let path_display = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::Read {
        path: path_display.clone(),
        message: e.to_string(),
    })?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IoError::EmptyTable(path_display.clone()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|_| IoError::SheetNotFound {
            path: path_display.clone(),
            sheet: sheet_name.clone(),
        })?;

    let mut rows = range.rows().map(|row| {
        row.iter().map(cell_to_string).collect::<Vec<String>>()
    });
    let headers = rows
        .next()
        .ok_or_else(|| IoError::EmptyTable(path_display.clone()))?;

    Ok(RawTable {
        source: format!("{path_display}#{sheet_name}"),
        headers,
        rows: rows.collect(),
    })
}

/// Stringify a cell the way the normalizer expects: integers without a
/// trailing ".0", everything else via Display, errors and empties blank.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
            format!("{}", *n as i64)
        }
        other => other.to_string(),
    }
}
