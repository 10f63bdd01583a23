use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// Source file could not be opened or read at all. The only fatal
    /// error in this crate: no partial computation is possible without
    /// any entities.
    Read { path: String, message: String },
    /// Requested sheet does not exist in the workbook.
    SheetNotFound { path: String, sheet: String },
    /// Malformed CSV structure (not cell values; those are normalized
    /// with defaults).
    Csv(String),
    /// Source parsed but contained no header row.
    EmptyTable(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read '{path}': {message}"),
            Self::SheetNotFound { path, sheet } => {
                write!(f, "'{path}': sheet '{sheet}' not found")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::EmptyTable(path) => write!(f, "'{path}': no header row"),
        }
    }
}

impl std::error::Error for IoError {}
