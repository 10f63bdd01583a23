//! `pprcost-io` — data loading for the campaign cost engine.
//!
//! Reads XLSX and CSV sources into a raw header/rows table, normalizes
//! heterogeneous schemas into canonical [`pprcost_engine::EntityRecord`]s
//! with a full audit trail, and fingerprints datasets for explicit result
//! caching. Only an unreadable source file is fatal; every schema
//! correction is recovered with a documented default and logged.

pub mod cache;
pub mod csv_import;
pub mod error;
pub mod normalize;
pub mod table;
pub mod xlsx;

pub use cache::{dataset_fingerprint, ResultCache};
pub use csv_import::read_csv_path;
pub use error::IoError;
pub use normalize::{normalize, NormalizeReport};
pub use table::RawTable;
pub use xlsx::read_xlsx;
