//! Portfolio state: the single mutable record threaded through the
//! decision pipeline.

/// Account state for the whole simulation horizon.
///
/// Created once at simulation start, mutated exclusively by the
/// contribution, rebalance and profit-taking policies. The reserve is a
/// separate tracking bucket that only ever shrinks; purchases always draw
/// from `cash`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub cash: f64,
    pub stock_shares: f64,
    pub bond_shares: f64,
    /// Emergency reserve balance, deployed in bulk after a sustained
    /// low-valuation streak.
    pub reserve: f64,
    /// Consecutive scheduled periods with percentile below the low band.
    pub low_streak: u32,
}

impl PortfolioState {
    pub fn new(initial_capital: f64, reserve: f64) -> Self {
        PortfolioState {
            cash: initial_capital,
            stock_shares: 0.0,
            bond_shares: 0.0,
            reserve,
            low_streak: 0,
        }
    }

    /// Mark-to-market total: cash + stock value + bond value.
    pub fn total_value(&self, stock_price: f64, bond_price: f64) -> f64 {
        self.cash + self.stock_shares * stock_price + self.bond_shares * bond_price
    }
}
