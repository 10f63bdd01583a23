//! `pprcost-engine` — PPR vaccination campaign cost engine.
//!
//! Pure engine crate: receives pre-loaded entity records and a scenario
//! configuration, returns per-entity figures rolled up by country, region,
//! episystem, and continent. No CLI or IO dependencies.

pub mod aggregate;
pub mod calc;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod geography;
pub mod model;
pub mod scenario;

pub use engine::run;
pub use error::EngineError;
pub use model::{CampaignInput, CampaignResult, EntityRecord};
pub use scenario::ScenarioConfig;
