//! Market observation model: one row of the merged history series.

use chrono::NaiveDate;

/// Externally supplied trend indicator.
///
/// An explicit enum rather than a string so a typo in the input can never
/// silently match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSignal {
    Bullish,
    Neutral,
    Bearish,
}

impl TrendSignal {
    /// Case-insensitive parse. Unknown strings return `None`.
    pub fn parse(s: &str) -> Option<TrendSignal> {
        match s.trim().to_lowercase().as_str() {
            "bullish" => Some(TrendSignal::Bullish),
            "neutral" => Some(TrendSignal::Neutral),
            "bearish" => Some(TrendSignal::Bearish),
            _ => None,
        }
    }
}

/// A single dated market observation, immutable once ingested.
///
/// `valuation`, `moving_avg` and `trend` may be absent; the policies treat
/// absence as a data-quality fallback, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketObservation {
    pub date: NaiveDate,
    pub valuation: Option<f64>,
    pub close: f64,
    pub moving_avg: Option<f64>,
    pub bond_price: f64,
    pub trend: Option<TrendSignal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_parse_known_values() {
        assert_eq!(TrendSignal::parse("bullish"), Some(TrendSignal::Bullish));
        assert_eq!(TrendSignal::parse("Neutral"), Some(TrendSignal::Neutral));
        assert_eq!(TrendSignal::parse("BEARISH"), Some(TrendSignal::Bearish));
        assert_eq!(TrendSignal::parse(" bearish "), Some(TrendSignal::Bearish));
    }

    #[test]
    fn trend_parse_unknown_is_none() {
        assert_eq!(TrendSignal::parse("bear"), None);
        assert_eq!(TrendSignal::parse(""), None);
        assert_eq!(TrendSignal::parse("sideways"), None);
    }

    #[test]
    fn observation_fields() {
        let obs = MarketObservation {
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            valuation: Some(12.5),
            close: 100.0,
            moving_avg: Some(95.0),
            bond_price: 101.5,
            trend: Some(TrendSignal::Bullish),
        };
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(obs.valuation, Some(12.5));
        assert!((obs.close - 100.0).abs() < f64::EPSILON);
        assert_eq!(obs.trend, Some(TrendSignal::Bullish));
    }

    #[test]
    fn observation_with_gaps() {
        let obs = MarketObservation {
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            valuation: None,
            close: 100.0,
            moving_avg: None,
            bond_price: 101.5,
            trend: None,
        };
        assert!(obs.valuation.is_none());
        assert!(obs.moving_avg.is_none());
        assert!(obs.trend.is_none());
    }
}
