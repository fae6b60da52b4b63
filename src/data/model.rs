use std::fmt;
#[cfg(test)]
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a CSV reader infers.
/// Summaries put `CellValue` into `BTreeMap` / `BTreeSet`, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Timestamp(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// MonthKey – year + month grouping label
// ---------------------------------------------------------------------------

/// Year-month label derived from a row's timestamp. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    #[cfg(test)]
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(ts: &NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
impl FromStr for MonthKey {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("'{s}' is not in YYYY-MM form"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("'{s}': invalid year"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("'{s}': invalid month"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("'{s}': month out of range"));
        }
        Ok(MonthKey { year, month })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Header-ordered table. Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in header order.
    pub column_names: Vec<String>,
    /// Rows in file order, each aligned with `column_names`.
    pub rows: Vec<Vec<CellValue>>,
    /// Name of the column parsed as time.
    pub time_column: String,
    /// Position of the time column, if the file has one.
    pub time_index: Option<usize>,
}

impl Dataset {
    /// Build a dataset and locate `time_column` among the headers.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>, time_column: &str) -> Self {
        let time_index = column_names.iter().position(|c| c == time_column);
        Dataset {
            column_names,
            rows,
            time_column: time_column.to_string(),
            time_index,
        }
    }

    /// A dataset with the same columns and a different set of rows.
    pub fn with_rows(&self, rows: Vec<Vec<CellValue>>) -> Self {
        Dataset {
            column_names: self.column_names.clone(),
            rows,
            time_column: self.time_column.clone(),
            time_index: self.time_index,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    pub fn has_time_column(&self) -> bool {
        self.time_index.is_some()
    }

    /// Timestamp of row `row`, if the dataset is time-indexed and the cell is set.
    pub fn timestamp(&self, row: usize) -> Option<NaiveDateTime> {
        let idx = self.time_index?;
        self.rows.get(row)?.get(idx)?.as_timestamp()
    }

    /// Cells of one column, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |r| r.get(idx))
    }
}

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Label shown for [`ColumnChoice::All`].
pub const ALL_COLUMNS_LABEL: &str = "All columns";

/// Which column(s) the chart shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnChoice {
    #[default]
    All,
    Column(String),
}

impl fmt::Display for ColumnChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnChoice::All => write!(f, "{ALL_COLUMNS_LABEL}"),
            ColumnChoice::Column(name) => write!(f, "{name}"),
        }
    }
}

/// One line of the chart: a column's values indexed by time.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl Series {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }
}

/// All series produced for one render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub series: Vec<Series>,
}
