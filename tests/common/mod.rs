#![allow(dead_code)]

use chrono::NaiveDate;
use valuesim::domain::error::ValuesimError;
pub use valuesim::domain::observation::{MarketObservation, TrendSignal};
use valuesim::domain::simulation::SimulationConfig;
use valuesim::ports::observation_port::ObservationPort;

pub struct MockObservationPort {
    pub observations: Vec<MarketObservation>,
    pub error: Option<String>,
}

impl MockObservationPort {
    pub fn new(observations: Vec<MarketObservation>) -> Self {
        Self {
            observations,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            observations: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl ObservationPort for MockObservationPort {
    fn fetch_observations(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ValuesimError> {
        if let Some(reason) = &self.error {
            return Err(ValuesimError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .observations
            .iter()
            .filter(|obs| obs.date >= start_date && obs.date <= end_date)
            .cloned()
            .collect())
    }

    fn observation_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ValuesimError> {
        if let Some(reason) = &self.error {
            return Err(ValuesimError::Data {
                reason: reason.clone(),
            });
        }
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.date, last.date, self.observations.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_obs(date: NaiveDate, valuation: Option<f64>, close: f64) -> MarketObservation {
    MarketObservation {
        date,
        valuation,
        close,
        moving_avg: None,
        bond_price: 100.0,
        trend: None,
    }
}

/// One observation on the decision day of each month, with the given
/// valuations, all at a flat close of 100 and bond price of 100.
pub fn monthly_series(start_year: i32, valuations: &[f64]) -> Vec<MarketObservation> {
    valuations
        .iter()
        .enumerate()
        .map(|(i, &pe)| {
            let month = (i % 12) as u32 + 1;
            let year = start_year + (i / 12) as i32;
            make_obs(date(year, month, 20), Some(pe), 100.0)
        })
        .collect()
}

pub fn sample_config() -> SimulationConfig {
    SimulationConfig::default()
}
