// Repository trait for daily consumption feeds
use crate::domain::consumption::DailyReading;
use async_trait::async_trait;

/// Source of daily readings for the household and for the neighborhood
/// baseline. Implementations fetch the trailing `days` window; the engine
/// does not care whether the backend is a metering API, a database or a
/// test fixture.
#[async_trait]
pub trait ReadingsRepository: Send + Sync {
    /// Household readings for the trailing `days` window, oldest first
    async fn fetch_household_readings(&self, days: u32) -> anyhow::Result<Vec<DailyReading>>;

    /// Neighborhood-average readings covering the same dates as the
    /// household window
    async fn fetch_neighborhood_readings(&self, days: u32) -> anyhow::Result<Vec<DailyReading>>;
}
