//! Periodic contribution sizing and emergency-reserve deployment.

use chrono::NaiveDate;

use super::ledger::{Ledger, Operation};
use super::portfolio::PortfolioState;
use super::simulation::SimulationConfig;

/// Outcome of the sizing step, before execution against cash.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionDecision {
    pub amount: f64,
    pub streak: u32,
    /// Portion of `amount` drawn down from the emergency reserve tracker.
    pub emergency: f64,
}

/// Size the periodic contribution from the valuation percentile.
///
/// Band policy: below `low_band` double the base unit and extend the
/// low-valuation streak; inside the band invest the base unit; above
/// `high_band` invest nothing. The streak resets in both of the latter
/// cases. When the streak reaches `streak_threshold`, half of the
/// remaining reserve is deployed on top and the streak always resets.
pub fn decide(
    percentile: f64,
    streak: u32,
    reserve: f64,
    base_unit: f64,
    low_band: f64,
    high_band: f64,
    streak_threshold: u32,
) -> ContributionDecision {
    let (mut amount, mut streak) = if percentile < low_band {
        (base_unit * 2.0, streak + 1)
    } else if percentile <= high_band {
        (base_unit, 0)
    } else {
        (0.0, 0)
    };

    let mut emergency = 0.0;
    if streak >= streak_threshold {
        emergency = reserve * 0.5;
        amount += emergency;
        streak = 0;
    }

    ContributionDecision {
        amount,
        streak,
        emergency,
    }
}

/// Execute the scheduled contribution.
///
/// The streak and reserve always advance per the decision; the buy itself
/// only executes when cash covers the full amount. An underfunded period
/// is skipped entirely — no partial fill, no ledger entry.
pub fn apply_contribution(
    state: &mut PortfolioState,
    date: NaiveDate,
    percentile: f64,
    close: f64,
    config: &SimulationConfig,
    ledger: &mut Ledger,
) {
    let decision = decide(
        percentile,
        state.low_streak,
        state.reserve,
        config.base_unit,
        config.low_band,
        config.high_band,
        config.streak_threshold,
    );

    state.low_streak = decision.streak;
    state.reserve -= decision.emergency;

    if decision.amount > 0.0 && state.cash >= decision.amount {
        state.stock_shares += decision.amount / close;
        state.cash -= decision.amount;
        ledger.append(Operation {
            date,
            action: format!("invest {:.0}", decision.amount),
            percentile,
            amount: Some(decision.amount),
        });
    }
}
