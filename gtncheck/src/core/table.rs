//! In-memory tabular structures for the GTN and Payrun exports.
//!
//! Both tables are read-only once loaded. Column labels are not required to
//! be unique; every lookup returns the first matching column.

use std::fmt;

use serde::Serialize;

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Date or time value, kept in its textual form.
    DateTime(String),
    /// Spreadsheet error value such as `#N/A`.
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for empty cells, `NaN` floats and whitespace-only text.
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(value) => value.is_nan(),
            Cell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// Text-like cells, as far as header detection is concerned.
    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_) | Cell::Error(_))
    }
}

/// Renders a cell the way a stringified spreadsheet value reads: integral
/// floats keep their `.0` suffix, empty renders as `nan`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str("nan"),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
            Cell::Text(value) | Cell::DateTime(value) | Cell::Error(value) => f.write_str(value),
        }
    }
}

/// Two-level Payrun column label: `(group, sub-label)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnKey {
    pub group: String,
    pub label: String,
}

impl ColumnKey {
    pub fn new(group: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
        }
    }

    /// Both levels, in order. Used to flatten headers for name membership.
    pub fn parts(&self) -> [&str; 2] {
        [self.group.as_str(), self.label.as_str()]
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.group, self.label)
    }
}

/// Ordered column labels plus rows of cells aligned to those labels.
///
/// Rows are stored positionally; a row shorter than the header reads as
/// empty in its missing positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<K> {
    columns: Vec<K>,
    rows: Vec<Vec<Cell>>,
}

/// GTN export: flat single-level header.
pub type GtnTable = Table<String>;

/// Payrun export: grouped two-level header.
pub type PayrunTable = Table<ColumnKey>;

static EMPTY: Cell = Cell::Empty;

impl<K> Table<K> {
    pub fn new(columns: Vec<K>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[K] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows, each padded to the header width.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        let width = self.columns.len();
        self.rows.iter().map(move |cells| Row { cells, width })
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            cells,
            width: self.columns.len(),
        })
    }

    /// Position of the first column satisfying `pred`.
    pub fn find_column(&self, pred: impl Fn(&K) -> bool) -> Option<usize> {
        self.columns.iter().position(pred)
    }

    /// All cells of column `index`, top to bottom.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |cells| cells.get(index).unwrap_or(&EMPTY))
    }
}

impl GtnTable {
    /// First column whose label equals `name` exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.find_column(|column| column == name)
    }
}

impl PayrunTable {
    /// First column whose outer (group) label equals `group`.
    pub fn group_index(&self, group: &str) -> Option<usize> {
        self.find_column(|column| column.group == group)
    }
}

/// Borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [Cell],
    width: usize,
}

impl<'a> Row<'a> {
    pub fn get(&self, index: usize) -> &'a Cell {
        self.cells.get(index).unwrap_or(&EMPTY)
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        let cells = self.cells;
        (0..self.width.max(cells.len())).map(move |index| cells.get(index).unwrap_or(&EMPTY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_keeps_float_suffix() {
        assert_eq!(Cell::Float(101.0).to_string(), "101.0");
        assert_eq!(Cell::Float(101.5).to_string(), "101.5");
        assert_eq!(Cell::Int(7).to_string(), "7");
        assert_eq!(Cell::Empty.to_string(), "nan");
    }

    #[test]
    fn null_covers_nan_and_blank_text() {
        assert!(Cell::Empty.is_null());
        assert!(Cell::Float(f64::NAN).is_null());
        assert!(Cell::text("  ").is_null());
        assert!(!Cell::text("N/A").is_null());
        assert!(!Cell::Int(0).is_null());
    }

    #[test]
    fn short_rows_are_padded() {
        let table = GtnTable::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![Cell::Int(1)]],
        );
        let row = table.row(0).expect("row");
        let cells: Vec<&Cell> = row.cells().collect();
        assert_eq!(cells, vec![&Cell::Int(1), &Cell::Empty, &Cell::Empty]);
        assert_eq!(table.column_cells(2).collect::<Vec<_>>(), vec![&Cell::Empty]);
    }

    #[test]
    fn lookups_are_first_match() {
        let table = GtnTable::new(vec!["x".to_string(), "x".to_string()], Vec::new());
        assert_eq!(table.column_index("x"), Some(0));

        let payrun = PayrunTable::new(
            vec![
                ColumnKey::new("Earnings", "Base Pay"),
                ColumnKey::new("Employee ID", "Unnamed: 1_level_1"),
                ColumnKey::new("Employee ID", "Other"),
            ],
            Vec::new(),
        );
        assert_eq!(payrun.group_index("Employee ID"), Some(1));
        assert_eq!(payrun.group_index("employee id"), None);
    }
}
