//! Simulation configuration and replay driver.

use chrono::Datelike;

use super::contribution::apply_contribution;
use super::error::ValuesimError;
use super::ledger::Ledger;
use super::observation::MarketObservation;
use super::percentile::{self, NEUTRAL_PERCENTILE};
use super::portfolio::PortfolioState;
use super::profit_taking::apply_profit_taking;
use super::rebalance::apply_rebalance;

/// Strategy and schedule parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_capital: f64,
    /// Base periodic contribution unit.
    pub base_unit: f64,
    /// Starting emergency reserve.
    pub reserve: f64,
    /// Low/high valuation percentile band bounds.
    pub low_band: f64,
    pub high_band: f64,
    /// Consecutive low-valuation periods before the reserve deploys.
    pub streak_threshold: u32,
    /// Valuation history window length, in observations.
    pub lookback: usize,
    /// Valuation clip bounds for percentile ranking.
    pub clip_low: f64,
    pub clip_high: f64,
    /// Moving-average deviation sell threshold and step size.
    pub deviation_threshold: f64,
    pub deviation_step: f64,
    /// Extreme-valuation liquidation percentile and fraction.
    pub extreme_percentile: f64,
    pub extreme_fraction: f64,
    /// Trend-reversal liquidation fraction.
    pub trend_fraction: f64,
    /// Day of month on (or after) which the decision pipeline fires.
    pub decision_day: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_capital: 100_000.0,
            base_unit: 3000.0,
            reserve: 18_000.0,
            low_band: 30.0,
            high_band: 60.0,
            streak_threshold: 3,
            lookback: 120,
            clip_low: 8.0,
            clip_high: 20.0,
            deviation_threshold: 0.2,
            deviation_step: 0.05,
            extreme_percentile: 90.0,
            extreme_fraction: 0.5,
            trend_fraction: 0.3,
            decision_day: 20,
        }
    }
}

/// Output of a full replay: the ledger, the final state, and the final
/// net asset value marked at the last observation's prices.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub state: PortfolioState,
    pub ledger: Ledger,
    pub final_value: f64,
}

/// One scheduled decision: contribution, then rebalance, then
/// profit-taking, all fed the same percentile for the period.
pub fn apply_decision(
    state: &mut PortfolioState,
    obs: &MarketObservation,
    percentile: f64,
    config: &SimulationConfig,
    ledger: &mut Ledger,
) {
    apply_contribution(state, obs.date, percentile, obs.close, config, ledger);
    apply_rebalance(
        state,
        obs.date,
        percentile,
        obs.close,
        obs.bond_price,
        ledger,
    );
    apply_profit_taking(
        state,
        obs.date,
        obs.close,
        obs.moving_avg,
        obs.trend,
        percentile,
        config,
        ledger,
    );
}

/// Replay the observation series in date order.
///
/// Every observation extends the rolling valuation window; the decision
/// pipeline fires on the first observation of each calendar month whose
/// day-of-month is at least `decision_day`, so a schedule day falling on
/// a non-trading day slides to the next available observation.
///
/// The series must be strictly ascending by date with positive prices;
/// violations are the ingestion boundary's bug and fail loudly here.
pub fn run_simulation(
    observations: &[MarketObservation],
    config: &SimulationConfig,
) -> Result<SimulationResult, ValuesimError> {
    let last = observations.last().ok_or(ValuesimError::EmptySeries)?;

    let mut state = PortfolioState::new(config.initial_capital, config.reserve);
    let mut ledger = Ledger::new();
    let mut history: Vec<Option<f64>> = Vec::with_capacity(observations.len());
    let mut prev_date = None;
    let mut last_decision_month = None;

    for obs in observations {
        if prev_date.is_some_and(|prev| obs.date <= prev) {
            return Err(ValuesimError::UnorderedObservations { date: obs.date });
        }
        if obs.close <= 0.0 {
            return Err(ValuesimError::NonPositivePrice {
                field: "close",
                date: obs.date,
            });
        }
        if obs.bond_price <= 0.0 {
            return Err(ValuesimError::NonPositivePrice {
                field: "bond_price",
                date: obs.date,
            });
        }
        prev_date = Some(obs.date);

        history.push(obs.valuation);

        let month = (obs.date.year(), obs.date.month());
        if obs.date.day() < config.decision_day || last_decision_month == Some(month) {
            continue;
        }
        last_decision_month = Some(month);

        let percentile = match obs.valuation {
            Some(current) => {
                let start = history.len().saturating_sub(config.lookback);
                let window: Vec<f64> = history[start..].iter().flatten().copied().collect();
                percentile::rank(&window, config.clip_low, config.clip_high, current)
            }
            None => NEUTRAL_PERCENTILE,
        };

        apply_decision(&mut state, obs, percentile, config, &mut ledger);
    }

    let final_value = state.total_value(last.close, last.bond_price);

    Ok(SimulationResult {
        state,
        ledger,
        final_value,
    })
}
