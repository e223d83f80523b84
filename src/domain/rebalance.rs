//! Valuation-driven equity/bond rebalancing.

use chrono::NaiveDate;

use super::ledger::{Ledger, Operation};
use super::portfolio::PortfolioState;

/// Target equity weight for a given valuation percentile.
///
/// Equity shrinks as valuation richens; the `max(0.3, ..)` floor keeps
/// bonds from ever exceeding 70% of assets.
pub fn target_equity_ratio(percentile: f64) -> f64 {
    1.0 - (percentile / 100.0).max(0.3)
}

/// Move holdings toward the target weights at current prices.
///
/// Value-neutral by construction: cash absorbs the negative of the net
/// trade value, no capital enters or leaves. Share counts are clamped at
/// zero so adversarial inputs (price gaps, pre-damaged state) can never
/// produce a negative holding.
pub fn apply_rebalance(
    state: &mut PortfolioState,
    date: NaiveDate,
    percentile: f64,
    stock_price: f64,
    bond_price: f64,
    ledger: &mut Ledger,
) {
    let ratio = target_equity_ratio(percentile);
    let total = state.total_value(stock_price, bond_price);

    let target_stock_shares = (total * ratio / stock_price).max(0.0);
    let target_bond_shares = (total * (1.0 - ratio) / bond_price).max(0.0);

    let delta_stock = target_stock_shares - state.stock_shares;
    let delta_bond = target_bond_shares - state.bond_shares;

    state.stock_shares = target_stock_shares;
    state.bond_shares = target_bond_shares;
    state.cash -= delta_stock * stock_price + delta_bond * bond_price;

    ledger.append(Operation {
        date,
        action: format!("rebalance to {:.1}% equity", ratio * 100.0),
        percentile,
        amount: None,
    });
}
