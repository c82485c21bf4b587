//! Deterministic, pure validation logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! tables and the parsed mapping, and return verdicts suitable for tests.

pub mod elements;
pub mod format;
pub mod header;
pub mod mapping;
pub mod normalize;
pub mod numeric;
pub mod population;
pub mod rows;
pub mod rule_set;
pub mod table;
pub mod verdict;
