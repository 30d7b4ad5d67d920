// Bill estimate domain model
use serde::Serialize;

/// Monetary estimate derived from monthly totals and tariff rates.
/// Recomputed on demand, never stored or mutated directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BillEstimate {
    pub electricity: f64,
    pub water: f64,
    pub gas: f64,
    pub total: f64,
}
