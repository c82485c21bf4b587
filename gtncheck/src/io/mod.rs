//! I/O helpers: configuration, dataset folders, spreadsheets and mapping JSON.

pub mod config;
pub mod dataset;
pub mod mapping_file;
pub mod workbook;
