use crate::application::alert_engine::AlertThresholds;
use crate::application::billing::TariffRates;
use crate::domain::recommendation::Recommendation;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub meter_api: MeterApiSettings,
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MeterApiSettings {
    pub base_url: String,
    pub household_id: String,
}

/// Engine tuning: retained window size, tariff rates and alert thresholds.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    pub tariffs: TariffRates,
    #[serde(default)]
    pub alerts: AlertThresholds,
}

fn default_window_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationsConfig {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/settings"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_recommendations_config() -> anyhow::Result<RecommendationsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/recommendations"))
        .build()?;

    let catalog: RecommendationsConfig = settings.try_deserialize()?;
    for entry in &catalog.recommendations {
        if entry.potential_savings < 0.0 {
            anyhow::bail!(
                "recommendation {} has a negative potential saving",
                entry.id
            );
        }
    }
    Ok(catalog)
}
