//! Stable exit codes for gtncheck CLI commands.

/// Every dataset passed every check.
pub const OK: i32 = 0;
/// Invalid usage or config, or at least one dataset failed to load.
pub const INVALID: i32 = 1;
/// At least one check failed and every dataset loaded.
pub const CHECKS_FAILED: i32 = 2;
