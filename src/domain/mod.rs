//! Core domain types and logic.

pub mod observation;
pub mod portfolio;
pub mod percentile;
pub mod contribution;
pub mod rebalance;
pub mod profit_taking;
pub mod ledger;
pub mod simulation;
pub mod metrics;
pub mod config_validation;
pub mod error;
