//! CSV history-file observation adapter.
//!
//! Reads the merged history artifact the upstream data-acquisition step
//! produces: columns `date,pe,close,ma250,bond_price,trend`, one row per
//! trading day. Empty cells in the nullable columns become `None`.

use crate::domain::error::ValuesimError;
use crate::domain::observation::{MarketObservation, TrendSignal};
use crate::ports::observation_port::ObservationPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvObservationAdapter {
    path: PathBuf,
}

impl CsvObservationAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<Vec<MarketObservation>, ValuesimError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ValuesimError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| ValuesimError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();

        let col = |name: &str| -> Result<usize, ValuesimError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ValuesimError::Data {
                    reason: format!("missing column '{}'", name),
                })
        };

        let date_col = col("date")?;
        let pe_col = col("pe")?;
        let close_col = col("close")?;
        let ma_col = col("ma250")?;
        let bond_col = col("bond_price")?;
        let trend_col = col("trend")?;

        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ValuesimError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |idx: usize| record.get(idx).unwrap_or("").trim();

            let date = NaiveDate::parse_from_str(field(date_col), "%Y-%m-%d").map_err(|e| {
                ValuesimError::Data {
                    reason: format!("invalid date '{}': {}", field(date_col), e),
                }
            })?;

            let close = parse_value(field(close_col), "close", date)?;
            let bond_price = parse_value(field(bond_col), "bond_price", date)?;

            let valuation = parse_optional(field(pe_col), "pe", date)?;
            let moving_avg = parse_optional(field(ma_col), "ma250", date)?;

            let trend = match field(trend_col) {
                "" => None,
                s => Some(TrendSignal::parse(s).ok_or_else(|| ValuesimError::Data {
                    reason: format!("invalid trend value '{}' on {}", s, date),
                })?),
            };

            observations.push(MarketObservation {
                date,
                valuation,
                close,
                moving_avg,
                bond_price,
                trend,
            });
        }

        observations.sort_by_key(|obs| obs.date);
        Ok(observations)
    }
}

// `f64::from_str` happily accepts "nan" and "inf"; letting those through
// would corrupt every downstream value without tripping the driver's
// positivity checks, so they are rejected here.
fn parse_value(value: &str, column: &str, date: NaiveDate) -> Result<f64, ValuesimError> {
    let parsed: f64 = value.parse().map_err(|e| ValuesimError::Data {
        reason: format!("invalid {} value on {}: {}", column, date, e),
    })?;
    if !parsed.is_finite() {
        return Err(ValuesimError::Data {
            reason: format!("non-finite {} value on {}", column, date),
        });
    }
    Ok(parsed)
}

fn parse_optional(
    value: &str,
    column: &str,
    date: NaiveDate,
) -> Result<Option<f64>, ValuesimError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_value(value, column, date).map(Some)
}

impl ObservationPort for CsvObservationAdapter {
    fn fetch_observations(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ValuesimError> {
        let observations = self.read_all()?;
        Ok(observations
            .into_iter()
            .filter(|obs| obs.date >= start_date && obs.date <= end_date)
            .collect())
    }

    fn observation_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ValuesimError> {
        let observations = self.read_all()?;
        match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, observations.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "date,pe,close,ma250,bond_price,trend\n\
        2024-01-16,12.5,101.0,95.0,100.2,neutral\n\
        2024-01-15,12.3,100.0,,100.1,\n\
        2024-01-17,,102.0,96.0,100.3,bearish\n";

    fn setup(content: &str) -> (TempDir, CsvObservationAdapter) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, content).unwrap();
        (dir, CsvObservationAdapter::new(path))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_parses_and_sorts_by_date() {
        let (_dir, adapter) = setup(SAMPLE);
        let obs = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].date, date(2024, 1, 15));
        assert_eq!(obs[1].date, date(2024, 1, 16));
        assert_eq!(obs[2].date, date(2024, 1, 17));
    }

    #[test]
    fn empty_cells_become_none() {
        let (_dir, adapter) = setup(SAMPLE);
        let obs = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert!(obs[0].moving_avg.is_none());
        assert!(obs[0].trend.is_none());
        assert_eq!(obs[0].valuation, Some(12.3));
        assert!(obs[2].valuation.is_none());
        assert_eq!(obs[2].trend, Some(TrendSignal::Bearish));
    }

    #[test]
    fn fetch_filters_by_date_range() {
        let (_dir, adapter) = setup(SAMPLE);
        let obs = adapter
            .fetch_observations(date(2024, 1, 16), date(2024, 1, 16))
            .unwrap();

        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].date, date(2024, 1, 16));
    }

    #[test]
    fn observation_range_reports_bounds() {
        let (_dir, adapter) = setup(SAMPLE);
        let range = adapter.observation_range().unwrap();
        assert_eq!(range, Some((date(2024, 1, 15), date(2024, 1, 17), 3)));
    }

    #[test]
    fn observation_range_empty_file() {
        let (_dir, adapter) = setup("date,pe,close,ma250,bond_price,trend\n");
        assert_eq!(adapter.observation_range().unwrap(), None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_dir, adapter) = setup("date,pe,close,ma250\n2024-01-15,12.3,100.0,95.0\n");
        let err = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, ValuesimError::Data { reason } if reason.contains("bond_price")));
    }

    #[test]
    fn unknown_trend_is_an_error() {
        let (_dir, adapter) = setup(
            "date,pe,close,ma250,bond_price,trend\n2024-01-15,12.3,100.0,95.0,100.1,sideways\n",
        );
        let err = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, ValuesimError::Data { reason } if reason.contains("trend")));
    }

    #[test]
    fn non_finite_price_is_an_error() {
        let (_dir, adapter) = setup(
            "date,pe,close,ma250,bond_price,trend\n2024-01-15,12.3,nan,95.0,100.1,\n",
        );
        let err = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, ValuesimError::Data { reason } if reason.contains("close")));
    }

    #[test]
    fn non_finite_optional_value_is_an_error() {
        let (_dir, adapter) = setup(
            "date,pe,close,ma250,bond_price,trend\n2024-01-15,inf,100.0,95.0,100.1,\n",
        );
        let err = adapter
            .fetch_observations(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, ValuesimError::Data { reason } if reason.contains("pe")));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvObservationAdapter::new(dir.path().join("absent.csv"));
        assert!(adapter.observation_range().is_err());
    }
}
