//! Table preview and per-column descriptive statistics.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;

use super::model::{CellValue, Dataset};

/// One row of the describe table. Statistics that do not apply to the
/// column's kind are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<String>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<String>,
}

/// Header labels for [`ColumnSummary::cells`].
pub const SUMMARY_HEADERS: [&str; 12] = [
    "column", "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

impl ColumnSummary {
    /// Cell texts in [`SUMMARY_HEADERS`] order; empty for missing statistics.
    pub fn cells(&self) -> Vec<String> {
        fn num(v: Option<f64>) -> String {
            v.map(|v| format!("{v:.4}")).unwrap_or_default()
        }
        fn int(v: Option<usize>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }
        vec![
            self.column.clone(),
            self.count.to_string(),
            int(self.unique),
            self.top.clone().unwrap_or_default(),
            int(self.freq),
            num(self.mean),
            num(self.std),
            self.min.clone().unwrap_or_default(),
            num(self.p25),
            num(self.p50),
            num(self.p75),
            self.max.clone().unwrap_or_default(),
        ]
    }
}

/// First `n` rows.
pub fn head(dataset: &Dataset, n: usize) -> Dataset {
    dataset.with_rows(dataset.rows.iter().take(n).cloned().collect())
}

/// Describe every column, in header order.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .column_names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&CellValue> = dataset
                .column_values(idx)
                .filter(|c| !c.is_null())
                .collect();
            let mut summary = if Some(idx) == dataset.time_index {
                describe_timestamps(&cells)
            } else if cells.iter().all(|c| c.is_numeric()) && !cells.is_empty() {
                describe_numeric(&cells)
            } else {
                describe_text(&cells)
            };
            summary.column = name.clone();
            summary.count = cells.len();
            summary
        })
        .collect()
}

fn describe_numeric(cells: &[&CellValue]) -> ColumnSummary {
    let values: Vec<f64> = cells.iter().filter_map(|c| c.as_f64()).collect();
    let n = values.len();

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    ColumnSummary {
        mean: Some(mean),
        std: Some(std),
        min: sorted.first().map(|v| format!("{v:.4}")),
        p25: Some(percentile(&sorted, 25.0)),
        p50: Some(percentile(&sorted, 50.0)),
        p75: Some(percentile(&sorted, 75.0)),
        max: sorted.last().map(|v| format!("{v:.4}")),
        ..Default::default()
    }
}

fn describe_timestamps(cells: &[&CellValue]) -> ColumnSummary {
    let stamps: BTreeSet<NaiveDateTime> = cells.iter().filter_map(|c| c.as_timestamp()).collect();
    let fmt = |t: &NaiveDateTime| t.format("%Y-%m-%d %H:%M:%S").to_string();
    ColumnSummary {
        unique: Some(stamps.len()),
        min: stamps.first().map(fmt),
        max: stamps.last().map(fmt),
        ..Default::default()
    }
}

fn describe_text(cells: &[&CellValue]) -> ColumnSummary {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for cell in cells {
        *counts.entry(*cell).or_default() += 1;
    }
    // Ties resolve to the smallest value: max_by_key keeps the last maximum,
    // so walk the map backwards.
    let top = counts.iter().rev().max_by_key(|(_, n)| **n);

    ColumnSummary {
        unique: Some(counts.len()),
        top: top.map(|(v, _)| v.to_string()),
        freq: top.map(|(_, n)| *n),
        ..Default::default()
    }
}

/// Percentile of already sorted values, linear interpolation between ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn dataset() -> Dataset {
        let csv = "\
time,temp,wind,station
2020-01-01,5,1.0,bergen
2020-01-15,7,,oslo
2020-02-01,3,2.0,bergen
2020-02-02,1,4.0,tromso
";
        read_csv(csv.as_bytes(), "time").unwrap()
    }

    #[test]
    fn test_head_takes_first_rows() {
        let ds = dataset();
        let first = head(&ds, 2);
        assert_eq!(first.len(), 2);
        assert_eq!(first.rows, ds.rows[..2].to_vec());
        assert_eq!(head(&ds, 10).len(), 4);
    }

    #[test]
    fn test_describe_numeric_column() {
        let summary = describe(&dataset());
        let temp = &summary[1];

        assert_eq!(temp.column, "temp");
        assert_eq!(temp.count, 4);
        assert_eq!(temp.mean, Some(4.0));
        assert!((temp.std.unwrap() - 2.581988897).abs() < 1e-6);
        assert_eq!(temp.p25, Some(2.5));
        assert_eq!(temp.p50, Some(4.0));
        assert_eq!(temp.p75, Some(5.5));
        assert_eq!(temp.min.as_deref(), Some("1.0000"));
        assert_eq!(temp.max.as_deref(), Some("7.0000"));
        assert_eq!(temp.unique, None);
    }

    #[test]
    fn test_describe_counts_skip_nulls() {
        let summary = describe(&dataset());
        assert_eq!(summary[2].column, "wind");
        assert_eq!(summary[2].count, 3);
    }

    #[test]
    fn test_describe_text_and_time_columns() {
        let summary = describe(&dataset());

        let station = &summary[3];
        assert_eq!(station.unique, Some(3));
        assert_eq!(station.top.as_deref(), Some("bergen"));
        assert_eq!(station.freq, Some(2));
        assert_eq!(station.mean, None);

        let time = &summary[0];
        assert_eq!(time.unique, Some(4));
        assert_eq!(time.min.as_deref(), Some("2020-01-01 00:00:00"));
        assert_eq!(time.max.as_deref(), Some("2020-02-02 00:00:00"));
    }

    #[test]
    fn test_cells_follow_header_order() {
        let summary = describe(&dataset());
        let cells = summary[3].cells();
        assert_eq!(cells.len(), SUMMARY_HEADERS.len());
        assert_eq!(cells[0], "station");
        assert_eq!(cells[3], "bergen");
        assert_eq!(cells[5], "");
    }

    #[test]
    fn test_percentile_interpolates() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
        assert!(percentile(&[], 50.0).is_nan());
    }
}
