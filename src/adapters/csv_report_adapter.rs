//! CSV ledger report adapter.
//!
//! Serializes the operations ledger as `date,action,percentile,amount`,
//! one row per executed operation in execution order.

use crate::domain::error::ValuesimError;
use crate::domain::simulation::SimulationResult;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        CsvReportAdapter
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &SimulationResult, output_path: &str) -> Result<(), ValuesimError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| ValuesimError::Data {
            reason: format!("failed to open {}: {}", output_path, e),
        })?;

        wtr.write_record(["date", "action", "percentile", "amount"])
            .map_err(|e| ValuesimError::Data {
                reason: format!("CSV write error: {}", e),
            })?;

        for op in result.ledger.entries() {
            let amount = op.amount.map(|a| format!("{a:.2}")).unwrap_or_default();
            wtr.write_record([
                op.date.format("%Y-%m-%d").to_string(),
                op.action.clone(),
                format!("{:.2}", op.percentile),
                amount,
            ])
            .map_err(|e| ValuesimError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }

        wtr.flush().map_err(|e| ValuesimError::Data {
            reason: format!("CSV flush error: {}", e),
        })?;
        Ok(())
    }
}
