use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{OutputError, Result};

/// Column holding the portfolio value of each simulated day
pub const VALUE_COLUMN: &str = "Value";

/// Optional column the simulator writes alongside the values
pub const DATE_COLUMN: &str = "Date";

/// Run files are semicolon-delimited
pub const DELIMITER: u8 = b';';

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Portfolio value per elapsed day, in file row order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSeries {
    values: Vec<f64>,
    dates: Option<Vec<NaiveDate>>,
}

impl ValueSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, dates: None }
    }

    /// Attach a date per value; ignored unless lengths agree
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        if dates.len() == self.values.len() {
            self.dates = Some(dates);
        }
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_value(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Value on the last simulated day
    pub fn terminal_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn min_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

/// Load the "Value" column of a semicolon-delimited run file
pub fn load_value_series(path: &Path) -> Result<ValueSeries> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => OutputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => OutputError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let series = read_value_series(BufReader::new(file), path)?;
    tracing::debug!("Loaded {} values from {:?}", series.len(), path);
    Ok(series)
}

/// Parse a run table from any reader; `path` only labels errors
pub fn read_value_series<R: Read>(reader: R, path: &Path) -> Result<ValueSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| OutputError::malformed(path, format!("unreadable header: {}", e)))?
        .clone();

    let value_idx = headers
        .iter()
        .position(|h| h.trim() == VALUE_COLUMN)
        .ok_or_else(|| OutputError::malformed(path, "missing \"Value\" column"))?;
    let date_idx = headers.iter().position(|h| h.trim() == DATE_COLUMN);

    let mut values = Vec::new();
    let mut dates = Vec::new();
    let mut dates_ok = date_idx.is_some();

    for (row, result) in csv_reader.records().enumerate() {
        let record =
            result.map_err(|e| OutputError::malformed(path, format!("row {}: {}", row + 1, e)))?;

        let cell = record.get(value_idx).unwrap_or("").trim();
        let value: f64 = cell.parse().map_err(|_| {
            OutputError::malformed(path, format!("row {}: invalid value '{}'", row + 1, cell))
        })?;
        if !value.is_finite() {
            return Err(OutputError::malformed(
                path,
                format!("row {}: non-finite value '{}'", row + 1, cell),
            ));
        }
        values.push(value);

        if dates_ok {
            let parsed = date_idx
                .and_then(|idx| record.get(idx))
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok());
            match parsed {
                Some(date) => dates.push(date),
                None => dates_ok = false,
            }
        }
    }

    if values.is_empty() {
        return Err(OutputError::malformed(path, "\"Value\" column is empty"));
    }

    let series = ValueSeries::new(values);
    Ok(if dates_ok { series.with_dates(dates) } else { series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<ValueSeries> {
        read_value_series(text.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn test_values_keep_row_order() {
        let series = parse("Value\n100\n105\n98\n110\n").unwrap();
        assert_eq!(series.values(), &[100.0, 105.0, 98.0, 110.0]);
        assert_eq!(series.terminal_value(), Some(110.0));
        assert!(series.dates().is_none());
    }

    #[test]
    fn test_simulator_layout_with_dates() {
        let series =
            parse("Date;Value;P&L\n2024-01-02;1000.5;0\n2024-01-03;1010;9.5\n").unwrap();
        assert_eq!(series.values(), &[1000.5, 1010.0]);
        let dates = series.dates().unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_bad_date_drops_dates_only() {
        let series = parse("Date;Value\n2024-01-02;1\nnot-a-date;2\n").unwrap();
        assert_eq!(series.values(), &[1.0, 2.0]);
        assert!(series.dates().is_none());
    }

    #[test]
    fn test_missing_value_column() {
        let err = parse("Date;P&L\n2024-01-02;0\n").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_comma_delimited_is_malformed() {
        // Whole header lands in one column, so "Value" is never found
        let err = parse("Date,Value\n2024-01-02,1\n").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_non_numeric_value() {
        let err = parse("Value\n100\nabc\n").unwrap_err();
        match err {
            OutputError::MalformedTable { reason, .. } => assert!(reason.contains("row 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_values_are_malformed() {
        for cell in ["NaN", "nan", "inf", "-infinity"] {
            let err = parse(&format!("Value\n100\n{}\n", cell)).unwrap_err();
            match err {
                OutputError::MalformedTable { reason, .. } => {
                    assert!(reason.contains("row 2: non-finite"), "{reason}")
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_header_only_is_malformed() {
        assert!(parse("Date;Value;P&L\n").unwrap_err().is_malformed());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_value_series(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, OutputError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("DCA_SPGold_acc_2015_2024.csv");
        let mut file = File::create(&path).unwrap();
        write!(file, "Date;Value;P&L\n2015-06-01;81200;0\n2015-06-02;81950.25;750.25\n").unwrap();

        let series = load_value_series(&path).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_value(), Some(81200.0));
        assert_eq!(series.max_value(), Some(81950.25));
    }
}
