//! Temperature anomaly dataset loading and validation.
//!
//! Reads the NASA GISS style monthly CSV (`Year,Value` header, then
//! `YYYYMM,<anomaly>` rows) into an ordered sequence of [`AnomalyRecord`]s.
//! The loader is strict: a malformed row or a year with missing months is a
//! fatal [`Error::DataFormat`], reported before any frame is rendered. The
//! one exception is a trailing partial year (the in-progress year in the
//! source data), which is silently discarded.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::scale::{LinearScale, Scale};

/// Number of monthly values expected per year.
pub const MONTHS_PER_YEAR: usize = 12;

/// A single monthly temperature anomaly observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyRecord {
    /// Observation year.
    pub year: i32,
    /// Observation month, 1-12.
    pub month: u32,
    /// Anomaly in degrees Celsius relative to the reference average.
    pub anomaly: f32,
}

/// The full ordered anomaly dataset, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Records sorted by year ascending, month ascending.
    records: Vec<AnomalyRecord>,
    first_year: i32,
    last_year: i32,
    min_anomaly: f32,
    max_anomaly: f32,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the contents are
    /// malformed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a dataset from any reader producing the CSV layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataFormat`] for malformed rows, duplicate or
    /// out-of-range months, a gap in the year sequence, or a non-trailing
    /// year with fewer than twelve values; [`Error::EmptyData`] when no
    /// complete year survives.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut by_year: BTreeMap<i32, [Option<f32>; MONTHS_PER_YEAR]> = BTreeMap::new();

        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line() as usize);

            let (year, month) = parse_year_month(&row, line)?;
            let anomaly = parse_anomaly(&row, line)?;

            let months = by_year.entry(year).or_insert([None; MONTHS_PER_YEAR]);
            let slot = &mut months[(month - 1) as usize];
            if slot.is_some() {
                return Err(Error::DataFormat {
                    line,
                    reason: format!("duplicate value for {year}-{month:02}"),
                });
            }
            *slot = Some(anomaly);
        }

        Self::from_year_map(by_year)
    }

    fn from_year_map(mut by_year: BTreeMap<i32, [Option<f32>; MONTHS_PER_YEAR]>) -> Result<Self> {
        // A trailing partial year is incomplete source data, not an error.
        let partial_last = by_year
            .iter()
            .next_back()
            .filter(|(_, months)| months.iter().any(Option::is_none))
            .map(|(&year, _)| year);
        if let Some(year) = partial_last {
            by_year.remove(&year);
        }

        if by_year.is_empty() {
            return Err(Error::EmptyData);
        }

        let mut records = Vec::with_capacity(by_year.len() * MONTHS_PER_YEAR);
        let mut expected_year = None;

        for (&year, months) in &by_year {
            if let Some(expected) = expected_year {
                if year != expected {
                    return Err(Error::DataFormat {
                        line: 0,
                        reason: format!("year {expected} is missing from the dataset"),
                    });
                }
            }
            expected_year = Some(year + 1);

            for (i, value) in months.iter().enumerate() {
                let month = (i + 1) as u32;
                let anomaly = value.ok_or_else(|| Error::DataFormat {
                    line: 0,
                    reason: format!("year {year} is missing a value for month {month}"),
                })?;
                records.push(AnomalyRecord {
                    year,
                    month,
                    anomaly,
                });
            }
        }

        let min_anomaly = records
            .iter()
            .map(|r| r.anomaly)
            .fold(f32::INFINITY, f32::min);
        let max_anomaly = records
            .iter()
            .map(|r| r.anomaly)
            .fold(f32::NEG_INFINITY, f32::max);

        Ok(Self {
            first_year: records[0].year,
            last_year: records[records.len() - 1].year,
            records,
            min_anomaly,
            max_anomaly,
        })
    }

    /// The ordered record sequence.
    #[must_use]
    pub fn records(&self) -> &[AnomalyRecord] {
        &self.records
    }

    /// First year in the dataset.
    #[must_use]
    pub const fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last (complete) year in the dataset.
    #[must_use]
    pub const fn last_year(&self) -> i32 {
        self.last_year
    }

    /// Number of complete years loaded.
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.records.len() / MONTHS_PER_YEAR
    }

    /// Observed `(min, max)` anomaly extent across all months.
    #[must_use]
    pub const fn extent(&self) -> (f32, f32) {
        (self.min_anomaly, self.max_anomaly)
    }

    /// The twelve records of a given year, or `None` if out of range.
    #[must_use]
    pub fn monthly(&self, year: i32) -> Option<&[AnomalyRecord]> {
        if year < self.first_year || year > self.last_year {
            return None;
        }
        let start = (year - self.first_year) as usize * MONTHS_PER_YEAR;
        Some(&self.records[start..start + MONTHS_PER_YEAR])
    }

    /// All monthly anomalies normalized to `[-1, 1]` against the observed
    /// extent, flattened year-major.
    ///
    /// A degenerate extent (every value identical) normalizes to all zeros.
    #[must_use]
    pub fn normalized_monthly(&self) -> Vec<f32> {
        normalize(
            self.records.iter().map(|r| r.anomaly),
            self.records.len(),
            (self.min_anomaly, self.max_anomaly),
        )
    }

    /// Mean anomaly per year, ordered by year ascending.
    #[must_use]
    pub fn yearly_means(&self) -> Vec<f32> {
        self.records
            .chunks_exact(MONTHS_PER_YEAR)
            .map(|year| year.iter().map(|r| r.anomaly).sum::<f32>() / MONTHS_PER_YEAR as f32)
            .collect()
    }

    /// Per-year mean anomalies normalized to `[-1, 1]` against the extent
    /// of the means themselves.
    #[must_use]
    pub fn normalized_yearly(&self) -> Vec<f32> {
        let means = self.yearly_means();
        let min = means.iter().copied().fold(f32::INFINITY, f32::min);
        let max = means.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        normalize(means.iter().copied(), means.len(), (min, max))
    }
}

fn normalize(values: impl Iterator<Item = f32>, len: usize, extent: (f32, f32)) -> Vec<f32> {
    match LinearScale::new(extent, (-1.0, 1.0)) {
        Ok(scale) => values.map(|v| scale.scale(v)).collect(),
        // Degenerate extent: everything sits at the neutral midpoint.
        Err(_) => vec![0.0; len],
    }
}

fn parse_year_month(row: &csv::StringRecord, line: usize) -> Result<(i32, u32)> {
    let field = row.get(0).ok_or_else(|| Error::DataFormat {
        line,
        reason: "missing date field".to_string(),
    })?;

    if field.len() < 5 || !field.is_char_boundary(field.len() - 2) {
        return Err(Error::DataFormat {
            line,
            reason: format!("expected YYYYMM date, found '{field}'"),
        });
    }

    let (year_part, month_part) = field.split_at(field.len() - 2);
    let year: i32 = year_part.parse().map_err(|_| Error::DataFormat {
        line,
        reason: format!("invalid year in '{field}'"),
    })?;
    let month: u32 = month_part.parse().map_err(|_| Error::DataFormat {
        line,
        reason: format!("invalid month in '{field}'"),
    })?;

    if !(1..=12).contains(&month) {
        return Err(Error::DataFormat {
            line,
            reason: format!("month {month} out of range 1-12"),
        });
    }

    Ok((year, month))
}

fn parse_anomaly(row: &csv::StringRecord, line: usize) -> Result<f32> {
    let field = row.get(1).ok_or_else(|| Error::DataFormat {
        line,
        reason: "missing anomaly field".to_string(),
    })?;

    field.parse().map_err(|_| Error::DataFormat {
        line,
        reason: format!("invalid anomaly value '{field}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn csv_for_years(years: &[(i32, [f32; 12])]) -> String {
        let mut out = String::from("Year,Value\n");
        for (year, months) in years {
            for (i, v) in months.iter().enumerate() {
                out.push_str(&format!("{year}{:02},{v}\n", i + 1));
            }
        }
        out
    }

    fn two_year_dataset() -> Dataset {
        let csv = csv_for_years(&[
            (1880, [-0.5; 12]),
            (1881, [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 1.5]),
        ]);
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_complete_years() {
        let ds = two_year_dataset();
        assert_eq!(ds.first_year(), 1880);
        assert_eq!(ds.last_year(), 1881);
        assert_eq!(ds.year_count(), 2);
        assert_eq!(ds.records().len(), 24);
    }

    #[test]
    fn test_records_sorted_ascending() {
        let ds = two_year_dataset();
        let records = ds.records();
        for pair in records.windows(2) {
            let ordered = (pair[0].year, pair[0].month) < (pair[1].year, pair[1].month);
            assert!(ordered, "records must be year-then-month ascending");
        }
    }

    #[test]
    fn test_extent() {
        let ds = two_year_dataset();
        let (min, max) = ds.extent();
        assert_relative_eq!(min, -0.5);
        assert_relative_eq!(max, 1.5);
    }

    #[test]
    fn test_monthly_lookup() {
        let ds = two_year_dataset();
        let year = ds.monthly(1881).unwrap();
        assert_eq!(year.len(), 12);
        assert_eq!(year[0].month, 1);
        assert_relative_eq!(year[11].anomaly, 1.5);

        assert!(ds.monthly(1879).is_none());
        assert!(ds.monthly(1882).is_none());
    }

    #[test]
    fn test_normalized_monthly_range() {
        let ds = two_year_dataset();
        let normalized = ds.normalized_monthly();
        assert_eq!(normalized.len(), 24);
        assert_relative_eq!(normalized[0], -1.0);
        assert_relative_eq!(normalized[23], 1.0);
        // 0.5 sits at the midpoint of [-0.5, 1.5]
        assert_relative_eq!(normalized[12], 0.0);
    }

    #[test]
    fn test_normalized_constant_dataset_is_all_zero() {
        let csv = csv_for_years(&[(1900, [0.0; 12]), (1901, [0.0; 12])]);
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(ds.normalized_monthly().iter().all(|&v| v == 0.0));
        assert!(ds.normalized_yearly().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_yearly_means() {
        let ds = two_year_dataset();
        let means = ds.yearly_means();
        assert_eq!(means.len(), 2);
        assert_relative_eq!(means[0], -0.5);
        assert_relative_eq!(means[1], (0.5 * 11.0 + 1.5) / 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_trailing_partial_year_discarded() {
        let mut csv = csv_for_years(&[(1880, [0.1; 12]), (1881, [0.2; 12])]);
        // Three months of an in-progress year
        csv.push_str("188201,0.3\n188202,0.3\n188203,0.3\n");

        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.last_year(), 1881);
        assert_eq!(ds.year_count(), 2);
    }

    #[test]
    fn test_missing_month_in_middle_year_fails() {
        // 1880 has only 11 values; 1881 is complete, so 1880 is not trailing
        let csv = "Year,Value\n".to_string()
            + &(1..=11)
                .map(|m| format!("1880{m:02},0.1\n"))
                .collect::<String>()
            + &(1..=12)
                .map(|m| format!("1881{m:02},0.2\n"))
                .collect::<String>();

        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }), "got {err:?}");
        assert!(err.to_string().contains("1880"));
    }

    #[test]
    fn test_year_gap_fails() {
        let csv = csv_for_years(&[(1880, [0.1; 12]), (1882, [0.2; 12])]);
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
        assert!(err.to_string().contains("1881"));
    }

    #[test]
    fn test_duplicate_month_fails() {
        let mut csv = csv_for_years(&[(1880, [0.1; 12])]);
        csv.push_str("188001,0.5\n");
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
    }

    #[test]
    fn test_malformed_date_fails() {
        let csv = "Year,Value\nnot-a-date,0.1\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn test_month_out_of_range_fails() {
        let csv = "Year,Value\n188013,0.1\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn test_invalid_value_fails() {
        let csv = "Year,Value\n188001,abc\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let err = Dataset::from_reader("Year,Value\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::EmptyData));
    }
}
