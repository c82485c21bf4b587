//! Spreadsheet loading for the GTN and Payrun exports.
//!
//! Only the first worksheet is read. Header handling follows the usual
//! dataframe conventions for exported sheets:
//! - blank GTN header cells become `Unnamed: <col>`;
//! - Payrun group labels are forward-filled across merged (blank) cells, and
//!   blank sub-labels become `Unnamed: <col>_level_1`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::core::table::{Cell, ColumnKey, GtnTable, PayrunTable};

/// Read the GTN export (single header row).
pub fn read_gtn(path: &Path) -> Result<GtnTable> {
    let range = first_sheet(path)?;
    gtn_from_range(&range).with_context(|| format!("parse GTN sheet {}", path.display()))
}

/// Read the Payrun export (two header rows).
pub fn read_payrun(path: &Path) -> Result<PayrunTable> {
    let range = first_sheet(path)?;
    payrun_from_range(&range).with_context(|| format!("parse Payrun sheet {}", path.display()))
}

fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open workbook {}", path.display()))?;
    workbook
        .worksheet_range_at(0)
        .with_context(|| format!("workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("read first worksheet of {}", path.display()))
}

pub fn gtn_from_range(range: &Range<Data>) -> Result<GtnTable> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        bail!("worksheet is empty");
    };
    let columns = header
        .iter()
        .enumerate()
        .map(|(index, value)| header_label(value).unwrap_or_else(|| format!("Unnamed: {index}")))
        .collect();
    let data = rows.map(|row| row.iter().map(to_cell).collect()).collect();
    Ok(GtnTable::new(columns, data))
}

pub fn payrun_from_range(range: &Range<Data>) -> Result<PayrunTable> {
    let mut rows = range.rows();
    let (Some(groups), Some(labels)) = (rows.next(), rows.next()) else {
        bail!("worksheet needs two header rows");
    };

    let mut columns = Vec::with_capacity(groups.len());
    let mut current_group: Option<String> = None;
    for (index, (group, label)) in groups.iter().zip(labels).enumerate() {
        if let Some(value) = header_label(group) {
            current_group = Some(value);
        }
        let group = current_group
            .clone()
            .unwrap_or_else(|| format!("Unnamed: {index}_level_0"));
        let label = header_label(label).unwrap_or_else(|| format!("Unnamed: {index}_level_1"));
        columns.push(ColumnKey::new(group, label));
    }

    let data = rows.map(|row| row.iter().map(to_cell).collect()).collect();
    Ok(PayrunTable::new(columns, data))
}

/// Header text for a cell, or `None` when blank.
fn header_label(value: &Data) -> Option<String> {
    let cell = to_cell(value);
    if cell.is_null() {
        return None;
    }
    Some(match cell {
        Cell::Text(text) => text.trim().to_string(),
        other => other.to_string(),
    })
}

pub fn to_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Int(number) => Cell::Int(*number),
        Data::Float(number) => Cell::Float(*number),
        Data::Bool(flag) => Cell::Bool(*flag),
        Data::String(text) => Cell::Text(text.clone()),
        Data::DateTime(_) => Cell::DateTime(value.to_string()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::DateTime(text.clone()),
        Data::Error(err) => Cell::Error(err.to_string()),
    }
}
