use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (out-of-range rate, bad thresholds, etc.).
    ConfigValidation(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "scenario parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "scenario validation error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Why one entity could not be computed. Caught at the entity boundary:
/// the entity contributes zero to aggregates and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityIssue {
    NegativePopulation(f64),
    NonFinitePopulation(f64),
    NonFiniteStabilityIndex(f64),
}

impl fmt::Display for EntityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativePopulation(v) => write!(f, "negative population base: {v}"),
            Self::NonFinitePopulation(v) => write!(f, "non-finite population base: {v}"),
            Self::NonFiniteStabilityIndex(v) => {
                write!(f, "non-finite political stability index: {v}")
            }
        }
    }
}
