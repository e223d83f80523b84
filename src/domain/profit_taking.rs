//! Multi-trigger profit-taking.
//!
//! Three liquidation triggers evaluated in a fixed order, each acting on
//! the share count as already reduced by the prior trigger in the same
//! call. Every fraction applies to the *remaining* holding, so invoking
//! the check twice with identical inputs sells strictly less the second
//! time — never the same magnitude.

use chrono::NaiveDate;

use super::ledger::{Ledger, Operation};
use super::observation::TrendSignal;
use super::portfolio::PortfolioState;
use super::simulation::SimulationConfig;

/// Stepped sell fraction for price extension above the moving average.
///
/// One 20% step per full `step` of deviation beyond `threshold`, capped at
/// a full liquidation. At or below the threshold (or within the first
/// partial step) the fraction is zero.
pub fn deviation_sell_fraction(deviation: f64, threshold: f64, step: f64) -> f64 {
    if deviation <= threshold {
        return 0.0;
    }
    (((deviation - threshold) / step).floor() * 0.2).min(1.0)
}

fn sell_fraction(
    state: &mut PortfolioState,
    fraction: f64,
    price: f64,
    date: NaiveDate,
    action: String,
    percentile: f64,
    ledger: &mut Ledger,
) {
    let shares = state.stock_shares * fraction;
    let proceeds = shares * price;
    state.stock_shares = (state.stock_shares - shares).max(0.0);
    state.cash += proceeds;
    ledger.append(Operation {
        date,
        action,
        percentile,
        amount: Some(proceeds),
    });
}

/// Evaluate the three profit-taking triggers against the current period.
///
/// A missing moving average or trend signal skips only the corresponding
/// trigger; the others are still evaluated.
pub fn apply_profit_taking(
    state: &mut PortfolioState,
    date: NaiveDate,
    close: f64,
    moving_avg: Option<f64>,
    trend: Option<TrendSignal>,
    percentile: f64,
    config: &SimulationConfig,
    ledger: &mut Ledger,
) {
    if let Some(ma) = moving_avg {
        let deviation = (close - ma) / ma;
        let fraction =
            deviation_sell_fraction(deviation, config.deviation_threshold, config.deviation_step);
        if fraction > 0.0 {
            sell_fraction(
                state,
                fraction,
                close,
                date,
                format!("trim {:.0}% above moving average", fraction * 100.0),
                percentile,
                ledger,
            );
        }
    }

    if percentile >= config.extreme_percentile {
        sell_fraction(
            state,
            config.extreme_fraction,
            close,
            date,
            format!(
                "liquidate {:.0}% on extreme valuation",
                config.extreme_fraction * 100.0
            ),
            percentile,
            ledger,
        );
    }

    if trend == Some(TrendSignal::Bearish) {
        sell_fraction(
            state,
            config.trend_fraction,
            close,
            date,
            format!(
                "liquidate {:.0}% on trend reversal",
                config.trend_fraction * 100.0
            ),
            percentile,
            ledger,
        );
    }
}
