/// Raw tabular data as read from a source file, before schema
/// normalization. Headers are kept verbatim (including duplicates and
/// blanks); cells are stringly typed since source files mix numeric and
/// text representations freely.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Where the table came from, for audit messages.
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
