use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::DataError;
use super::model::{CellValue, Dataset};

/// Cell texts read as missing values, matching pandas' `read_csv` defaults.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Timestamp layouts accepted in the time column, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV file into a [`Dataset`].
///
/// Layout: header row with column names, one record per row. If a column
/// named `time_column` exists, its non-empty cells must be timestamps; any
/// value that fails to parse aborts the whole load. Every other cell is
/// typed as integer, float, text or null (empty or one of [`NA_VALUES`]).
pub fn load_csv(path: &Path, time_column: &str) -> Result<Dataset, DataError> {
    if !path.is_file() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path)?;
    let dataset = read_csv(file, time_column)?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. See [`load_csv`].
pub fn read_csv<R: Read>(source: R, time_column: &str) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let time_idx = headers.iter().position(|h| h == time_column);
    if time_idx.is_none() {
        log::warn!("CSV has no '{time_column}' column; months will not be available");
    }

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let mut row = Vec::with_capacity(headers.len());
        for (col_idx, value) in record.iter().enumerate() {
            let cell = if Some(col_idx) == time_idx {
                parse_time_cell(value).ok_or_else(|| DataError::InvalidTimestamp {
                    row: row_no + 1,
                    value: value.to_string(),
                })?
            } else {
                guess_cell_type(value)
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Dataset::new(headers, rows, time_column))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn is_missing(s: &str) -> bool {
    NA_VALUES.contains(&s)
}

/// `Some(Null)` for a missing cell, `None` when the value is not a timestamp.
fn parse_time_cell(s: &str) -> Option<CellValue> {
    if is_missing(s) {
        return Some(CellValue::Null);
    }
    parse_timestamp(s).map(CellValue::Timestamp)
}

/// Offsets in RFC 3339 values are dropped and the wall-clock time kept.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn guess_cell_type(s: &str) -> CellValue {
    if is_missing(s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{available_months, numeric_columns};
    use crate::data::model::MonthKey;
    use crate::data::summary::describe;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("open-meteo-subset.csv");
        let err = load_csv(&path, "time").unwrap_err();
        assert!(matches!(err, DataError::FileNotFound { path: p } if p == path));
    }

    #[test]
    fn test_loads_time_and_numeric_columns() {
        let file = write_temp_csv("time,temp\n2020-01-01,5\n2020-01-15,7\n2020-02-01,3\n");
        let ds = load_csv(file.path(), "time").unwrap();

        assert_eq!(ds.column_names, vec!["time", "temp"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.time_index, Some(0));
        assert_eq!(
            ds.timestamp(1).unwrap().to_string(),
            "2020-01-15 00:00:00"
        );
        assert_eq!(ds.rows[2][1], CellValue::Integer(3));
    }

    #[test]
    fn test_open_meteo_timestamps_parse() {
        let csv = "time,temperature_2m (°C)\n2020-01-01T00:00,-2.2\n2020-01-01T01:00, -2.3\n";
        let ds = read_csv(csv.as_bytes(), "time").unwrap();

        assert_eq!(
            ds.timestamp(1).unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2020-01-01 01:00"
        );
        assert_eq!(ds.rows[1][1], CellValue::Float(-2.3));
    }

    #[test]
    fn test_missing_time_column_still_loads() {
        let ds = read_csv("a,b\n1,x\n2,y\n".as_bytes(), "time").unwrap();
        assert_eq!(ds.time_index, None);
        assert_eq!(ds.rows[1][1], CellValue::Text("y".into()));
    }

    #[test]
    fn test_unparseable_timestamp_fails_whole_load() {
        let err = read_csv("time,temp\n2020-01-01,5\nnot-a-date,7\n".as_bytes(), "time")
            .unwrap_err();
        match err {
            DataError::InvalidTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cells_become_null() {
        let ds = read_csv("time,temp\n,5\n2020-01-02,\n".as_bytes(), "time").unwrap();
        assert!(ds.rows[0][0].is_null());
        assert!(ds.rows[1][1].is_null());
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_ragged_rows_are_csv_errors() {
        let err = read_csv("time,temp\n2020-01-01,5,9\n".as_bytes(), "time").unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_bundled_sample_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/open-meteo-subset.csv");
        let ds = load_csv(&path, "time").unwrap();

        assert_eq!(ds.time_index, Some(0));
        assert_eq!(ds.column_names.len(), 6);
        assert_eq!(ds.len(), 8784);
        assert!(ds.rows.iter().all(|row| row[0].as_timestamp().is_some()));
    }

    #[test]
    fn test_rfc3339_timestamps_keep_wall_clock_time() {
        let ts = parse_timestamp("2020-03-01T01:30:00+01:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2020-03-01 01:30");
    }

    #[test]
    fn test_offset_timestamp_stays_in_its_local_month() {
        let ds = read_csv("time,temp\n2020-02-01T00:30:00+01:00,4\n".as_bytes(), "time").unwrap();
        assert_eq!(available_months(&ds), vec![MonthKey::new(2020, 2)]);
    }

    #[test]
    fn test_na_tokens_are_missing_values() {
        let csv = "time,temp\n2020-01-01,5\n2020-01-02,NA\n2020-01-03,NaN\nN/A,7\n";
        let ds = read_csv(csv.as_bytes(), "time").unwrap();

        assert!(ds.rows[1][1].is_null());
        assert!(ds.rows[2][1].is_null());
        assert!(ds.rows[3][0].is_null());
        assert_eq!(numeric_columns(&ds), vec!["temp"]);

        let temp = &describe(&ds)[1];
        assert_eq!(temp.count, 2);
        assert_eq!(temp.mean, Some(6.0));
    }

    #[test]
    fn test_header_whitespace_is_kept() {
        let ds = read_csv("time, temp\n2020-01-01, 5\n".as_bytes(), "time").unwrap();
        assert_eq!(ds.column_names, vec!["time", " temp"]);
        assert_eq!(ds.rows[0][1], CellValue::Integer(5));
    }
}
