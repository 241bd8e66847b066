//! CLI Exit Code Registry
//!
//! Single source of truth for `shelf` exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args, missing file) |
//! | 10-19 | pipeline  | Config / reconciliation codes            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Pipeline config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 10;

/// Reconciliation run failed (unparseable feed row, unknown source).
pub const EXIT_PIPELINE: u8 = 11;

/// Query store failed to load or answer.
pub const EXIT_STORE: u8 = 12;
