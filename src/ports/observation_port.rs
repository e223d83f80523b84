//! Observation supply port trait.
//!
//! The upstream data-acquisition collaborator (price/valuation/bond
//! retrieval, moving-average computation) sits behind this seam; the core
//! only ever sees a clean, date-ordered observation series.

use crate::domain::error::ValuesimError;
use crate::domain::observation::MarketObservation;
use chrono::NaiveDate;

pub trait ObservationPort {
    /// Fetch observations within `[start_date, end_date]`, ascending by date.
    fn fetch_observations(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ValuesimError>;

    /// First date, last date and row count of the available series.
    fn observation_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ValuesimError>;
}
