use std::collections::BTreeSet;

use super::error::DataError;
use super::model::{CellValue, ColumnChoice, Dataset, MonthKey, Projection, Series};

// ---------------------------------------------------------------------------
// Month selection
// ---------------------------------------------------------------------------

/// Distinct months present in the time column, earliest first.
///
/// Empty when the dataset has no time column or no rows with a timestamp.
pub fn available_months(dataset: &Dataset) -> Vec<MonthKey> {
    if dataset.is_empty() {
        return Vec::new();
    }
    let months: BTreeSet<MonthKey> = (0..dataset.len())
        .filter_map(|i| dataset.timestamp(i))
        .map(|ts| MonthKey::of(&ts))
        .collect();
    months.into_iter().collect()
}

/// Rows whose timestamp falls in `month`, in their original order.
pub fn filter_by_month(dataset: &Dataset, month: MonthKey) -> Dataset {
    let rows = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(i, _)| dataset.timestamp(*i).is_some_and(|ts| MonthKey::of(&ts) == month))
        .map(|(_, row)| row.clone())
        .collect();
    dataset.with_rows(rows)
}

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Columns whose non-null cells are all numbers, in header order.
///
/// The time column is never numeric; an all-null column is not either.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_names
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != dataset.time_index)
        .filter(|(i, _)| {
            let mut seen_value = false;
            for cell in dataset.column_values(*i) {
                if cell.is_null() {
                    continue;
                }
                if !cell.is_numeric() {
                    return false;
                }
                seen_value = true;
            }
            seen_value
        })
        .map(|(_, name)| name.clone())
        .collect()
}

/// Time-indexed series for the chosen column(s) of `dataset`.
///
/// `numeric` lists the columns the choice is made from, usually
/// [`numeric_columns`] of the whole file while `dataset` is one month of it.
/// Every series carries one point per row with a timestamp; null cells are
/// kept as NaN so all series share the same time axis, and a listed column
/// with no values in `dataset` yields an all-NaN series.
pub fn project(
    dataset: &Dataset,
    numeric: &[String],
    choice: &ColumnChoice,
) -> Result<Projection, DataError> {
    let time_idx = dataset.time_index.ok_or_else(|| DataError::MissingColumn {
        column: dataset.time_column.clone(),
    })?;

    if numeric.is_empty() {
        log::warn!("No numeric columns to plot");
        return Err(DataError::EmptySelection);
    }

    let selected: Vec<String> = match choice {
        ColumnChoice::All => numeric.to_vec(),
        ColumnChoice::Column(name) => {
            if !numeric.contains(name) {
                return Err(DataError::UnknownColumn(name.clone()));
            }
            vec![name.clone()]
        }
    };

    let series = selected
        .into_iter()
        .filter_map(|name| {
            let col_idx = dataset.column_index(&name)?;
            let points = dataset
                .rows
                .iter()
                .filter_map(|row| {
                    let ts = row.get(time_idx)?.as_timestamp()?;
                    let value = row.get(col_idx).and_then(CellValue::as_f64).unwrap_or(f64::NAN);
                    Some((ts, value))
                })
                .collect();
            Some(Series { name, points })
        })
        .collect();

    Ok(Projection { series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn example() -> Dataset {
        read_csv(
            "time,temp\n2020-01-01,5\n2020-01-15,7\n2020-02-01,3\n".as_bytes(),
            "time",
        )
        .unwrap()
    }

    fn weather() -> Dataset {
        let csv = "\
time,temperature_2m (°C),precipitation (mm),station
2020-03-01T00:00,1.5,0.0,bergen
2020-01-01T00:00,-2.2,0.1,bergen
2020-01-01T01:00,-2.3,,bergen
2020-02-10T12:00,0.4,1.2,bergen
2020-01-20T06:00,-5.0,0.0,bergen
";
        read_csv(csv.as_bytes(), "time").unwrap()
    }

    #[test]
    fn test_example_end_to_end() {
        let ds = example();
        let months = available_months(&ds);
        assert_eq!(months, vec![MonthKey::new(2020, 1), MonthKey::new(2020, 2)]);

        let january = filter_by_month(&ds, MonthKey::new(2020, 1));
        assert_eq!(january.len(), 2);

        let temp = ColumnChoice::Column("temp".into());
        let projection = project(&january, &numeric_columns(&ds), &temp).unwrap();
        assert_eq!(projection.series.len(), 1);
        let series = &projection.series[0];
        assert_eq!(series.values(), vec![5.0, 7.0]);
        assert_eq!(series.points[0].0, january.timestamp(0).unwrap());
        assert_eq!(series.points[1].0, january.timestamp(1).unwrap());
    }

    #[test]
    fn test_months_sorted_and_deduplicated() {
        let months = available_months(&weather());
        assert_eq!(
            months,
            vec![
                MonthKey::new(2020, 1),
                MonthKey::new(2020, 2),
                MonthKey::new(2020, 3)
            ]
        );
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_no_time_column_means_no_months() {
        let ds = read_csv("a,b\n1,2\n".as_bytes(), "time").unwrap();
        assert!(available_months(&ds).is_empty());
        assert!(matches!(
            project(&ds, &numeric_columns(&ds), &ColumnChoice::All),
            Err(DataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_no_rows_means_no_months() {
        let ds = read_csv("time,temp\n".as_bytes(), "time").unwrap();
        assert!(available_months(&ds).is_empty());
    }

    #[test]
    fn test_filter_keeps_source_order_and_counts() {
        let ds = weather();
        let january = filter_by_month(&ds, MonthKey::new(2020, 1));

        assert_eq!(january.len(), 3);
        assert_eq!(january.column_names, ds.column_names);
        let days: Vec<String> = (0..january.len())
            .map(|i| january.timestamp(i).unwrap().format("%d %H").to_string())
            .collect();
        assert_eq!(days, vec!["01 00", "01 01", "20 06"]);

        assert!(filter_by_month(&ds, MonthKey::new(2021, 1)).is_empty());
    }

    #[test]
    fn test_numeric_columns_skip_time_and_text() {
        assert_eq!(
            numeric_columns(&weather()),
            vec!["temperature_2m (°C)", "precipitation (mm)"]
        );
    }

    #[test]
    fn test_project_all_gives_one_series_per_numeric_column() {
        let ds = weather();
        let january = filter_by_month(&ds, MonthKey::new(2020, 1));
        let projection = project(&january, &numeric_columns(&ds), &ColumnChoice::All).unwrap();

        assert_eq!(projection.series.len(), 2);
        for series in &projection.series {
            assert_eq!(series.len(), january.len());
        }
        let precip = &projection.series[1];
        assert_eq!(precip.name, "precipitation (mm)");
        assert!(precip.points[1].1.is_nan());
    }

    #[test]
    fn test_project_without_numeric_columns_is_empty_selection() {
        let ds = read_csv("time,station\n2020-01-01,bergen\n".as_bytes(), "time").unwrap();
        let err = project(&ds, &numeric_columns(&ds), &ColumnChoice::All).unwrap_err();
        assert!(matches!(err, DataError::EmptySelection));
    }

    #[test]
    fn test_column_without_values_in_month_keeps_its_series() {
        let ds = read_csv(
            "time,temp,precip\n2020-01-01,5,0.5\n2020-02-01,3,\n".as_bytes(),
            "time",
        )
        .unwrap();
        let numeric = numeric_columns(&ds);
        let february = filter_by_month(&ds, MonthKey::new(2020, 2));

        let all = project(&february, &numeric, &ColumnChoice::All).unwrap();
        let names: Vec<&str> = all.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["temp", "precip"]);

        let precip =
            project(&february, &numeric, &ColumnChoice::Column("precip".into())).unwrap();
        assert_eq!(precip.series.len(), 1);
        assert_eq!(precip.series[0].len(), 1);
        assert!(precip.series[0].points[0].1.is_nan());
    }

    #[test]
    fn test_project_rejects_non_numeric_column() {
        let ds = weather();
        let err = project(&ds, &numeric_columns(&ds), &ColumnChoice::Column("station".into()))
            .unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn(name) if name == "station"));
    }
}
