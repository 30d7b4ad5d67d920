// Metering API repository implementation
use crate::application::readings_repository::ReadingsRepository;
use crate::domain::consumption::DailyReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

/// JSON client for the metering API. Serves both the household consumption
/// feed and the neighborhood-average feed.
#[derive(Debug, Clone)]
pub struct MeterApiRepository {
    base_url: String,
    household_id: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ReadingsResponse {
    readings: Vec<ReadingRow>,
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    date: String,
    electricity: f64,
    water: f64,
    gas: f64,
}

impl MeterApiRepository {
    pub fn new(base_url: String, household_id: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            household_id,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_feed(&self, feed: &str, days: u32) -> Result<Vec<DailyReading>> {
        let url = format!(
            "{}/households/{}/{}?days={}",
            self.base_url, self.household_id, feed, days
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to metering API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("metering API request failed with status {}: {}", status, body);
        }

        let data = response
            .json::<ReadingsResponse>()
            .await
            .context("Failed to parse metering API response")?;

        tracing::debug!("Fetched {} {} readings", data.readings.len(), feed);
        data.readings.into_iter().map(parse_row).collect()
    }
}

fn parse_row(row: ReadingRow) -> Result<DailyReading> {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
        .with_context(|| format!("invalid reading date {:?}", row.date))?;

    for (label, value) in [
        ("electricity", row.electricity),
        ("water", row.water),
        ("gas", row.gas),
    ] {
        if value < 0.0 || !value.is_finite() {
            anyhow::bail!("negative or non-finite {} reading on {}: {}", label, date, value);
        }
    }

    Ok(DailyReading::new(date, row.electricity, row.water, row.gas))
}

#[async_trait]
impl ReadingsRepository for MeterApiRepository {
    async fn fetch_household_readings(&self, days: u32) -> Result<Vec<DailyReading>> {
        self.fetch_feed("consumption", days).await
    }

    async fn fetch_neighborhood_readings(&self, days: u32) -> Result<Vec<DailyReading>> {
        self.fetch_feed("neighborhood", days).await
    }
}
