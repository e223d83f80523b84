//! Report output port trait.

use crate::domain::error::ValuesimError;
use crate::domain::simulation::SimulationResult;

/// Port for persisting a finished simulation's ledger.
pub trait ReportPort {
    fn write(&self, result: &SimulationResult, output_path: &str) -> Result<(), ValuesimError>;
}
