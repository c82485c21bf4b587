//! Structural consistency checks for GTN and Payrun payroll exports.
//!
//! A dataset is a folder holding a GTN earnings export, a Payrun export with
//! grouped headers, and a `mapping.json` linking pay element columns across
//! the two. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic rules (normalization, the eight checks,
//!   verdicts). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, folder discovery,
//!   spreadsheet and JSON loading).
//!
//! Orchestration modules ([`run`], [`report`]) coordinate core logic with I/O
//! to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod outcome;
pub mod report;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
