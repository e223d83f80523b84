//! Run summary statistics for reporting.

use super::simulation::SimulationResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub final_value: f64,
    pub total_return: f64,
    pub contributions: usize,
    pub rebalances: usize,
    pub liquidations: usize,
}

impl Summary {
    pub fn compute(result: &SimulationResult, initial_capital: f64) -> Self {
        let mut contributions = 0;
        let mut rebalances = 0;
        let mut liquidations = 0;

        for op in result.ledger.entries() {
            if op.action.starts_with("invest") {
                contributions += 1;
            } else if op.action.starts_with("rebalance") {
                rebalances += 1;
            } else {
                liquidations += 1;
            }
        }

        let total_return = if initial_capital > 0.0 {
            (result.final_value - initial_capital) / initial_capital
        } else {
            0.0
        };

        Summary {
            final_value: result.final_value,
            total_return,
            contributions,
            rebalances,
            liquidations,
        }
    }
}
