// Application layer - The consumption aggregation and billing engine
pub mod aggregation;
pub mod alert_engine;
pub mod billing;
pub mod consumption_store;
pub mod dashboard_service;
pub mod error;
pub mod readings_repository;
pub mod recommendations;
pub mod window;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::consumption::DailyReading;
    use chrono::{Days, NaiveDate};

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Consecutive daily readings starting at `start`, one
    /// (electricity, water, gas) tuple per day.
    pub fn series(start: NaiveDate, days: &[(f64, f64, f64)]) -> Vec<DailyReading> {
        days.iter()
            .enumerate()
            .map(|(i, &(electricity, water, gas))| {
                DailyReading::new(start + Days::new(i as u64), electricity, water, gas)
            })
            .collect()
    }

    /// `count` identical readings starting at `start`.
    pub fn flat_series(
        start: NaiveDate,
        count: usize,
        electricity: f64,
        water: f64,
        gas: f64,
    ) -> Vec<DailyReading> {
        (0..count)
            .map(|i| DailyReading::new(start + Days::new(i as u64), electricity, water, gas))
            .collect()
    }
}
