//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | CLI usage error (bad args; emitted by clap)    |
//! | 3    | Data source unreadable or malformed            |
//! | 4    | Scenario config invalid                        |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

// Usage errors (2) are emitted by clap itself.

/// Data source could not be read or has no usable structure.
pub const EXIT_DATA: u8 = 3;

/// Scenario config failed to parse or validate.
pub const EXIT_SCENARIO: u8 = 4;
