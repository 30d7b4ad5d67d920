// Dashboard service - Use case facade over the consumption engine
use crate::application::aggregation::{daily_average, totals};
use crate::application::alert_engine;
use crate::application::billing::estimate_bill;
use crate::application::consumption_store::ConsumptionSnapshot;
use crate::application::error::EngineError;
use crate::application::readings_repository::ReadingsRepository;
use crate::application::recommendations;
use crate::application::window::{select_window, WindowKind};
use crate::domain::alert::Alert;
use crate::domain::billing::BillEstimate;
use crate::domain::consumption::{DailyReading, ResourceTotals};
use crate::domain::recommendation::Recommendation;
use crate::infrastructure::config::EngineSettings;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Windowed view handed to the presentation layer: the selected readings
/// for charts plus the derived aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionView {
    pub readings: Vec<DailyReading>,
    pub baseline: Vec<DailyReading>,
    pub totals: ResourceTotals,
    pub daily_average: ResourceTotals,
}

#[derive(Debug, Default)]
struct EngineState {
    snapshot: ConsumptionSnapshot,
    alerts: Vec<Alert>,
}

/// Owns the current window snapshot and the alert list, and exposes the
/// dashboard's read interface. All derived values are recomputed on demand
/// from the snapshot; a refresh swaps the whole state atomically under the
/// write lock, so readers never see a half-replaced window.
#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ReadingsRepository>,
    settings: EngineSettings,
    catalog: Vec<Recommendation>,
    state: Arc<RwLock<EngineState>>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn ReadingsRepository>,
        settings: EngineSettings,
        catalog: Vec<Recommendation>,
    ) -> Self {
        Self {
            repository,
            settings,
            catalog,
            state: Arc::new(RwLock::new(EngineState::default())),
        }
    }

    /// Fetches both feeds and replaces the stored window. The fetch is the
    /// only async boundary in the engine; no await happens while the state
    /// lock is held.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let days = self.settings.window_days;
        let subject = self.repository.fetch_household_readings(days).await?;
        let baseline = self.repository.fetch_neighborhood_readings(days).await?;
        self.load_window(subject, baseline)?;
        Ok(())
    }

    /// Replaces the window wholesale and re-evaluates alerts against the
    /// new snapshot, preserving read flags on alerts that persist.
    pub fn load_window(
        &self,
        subject: Vec<DailyReading>,
        baseline: Vec<DailyReading>,
    ) -> Result<(), EngineError> {
        let snapshot = ConsumptionSnapshot::load(subject, baseline)?;
        let alert_count;
        {
            let mut state = self.write_state();
            state.alerts = alert_engine::evaluate(&snapshot, &self.settings.alerts, &state.alerts);
            alert_count = state.alerts.len();
            state.snapshot = snapshot;
        }
        tracing::debug!(alerts = alert_count, "consumption window replaced");
        Ok(())
    }

    pub fn get_totals(&self, kind: WindowKind, reference: NaiveDate) -> ResourceTotals {
        let state = self.read_state();
        totals(select_window(state.snapshot.subject(), kind, reference))
    }

    pub fn get_daily_average(&self, kind: WindowKind, reference: NaiveDate) -> ResourceTotals {
        daily_average(
            self.get_totals(kind, reference),
            kind.nominal_days(reference),
        )
    }

    pub fn get_consumption(&self, kind: WindowKind, reference: NaiveDate) -> ConsumptionView {
        let state = self.read_state();
        let readings = select_window(state.snapshot.subject(), kind, reference);
        let baseline = select_window(state.snapshot.baseline(), kind, reference);
        let window_totals = totals(readings);

        ConsumptionView {
            readings: readings.to_vec(),
            baseline: baseline.to_vec(),
            totals: window_totals,
            daily_average: daily_average(window_totals, kind.nominal_days(reference)),
        }
    }

    /// Bill estimate over the calendar month containing `reference`.
    pub fn get_bill_estimate(&self, reference: NaiveDate) -> Result<BillEstimate, EngineError> {
        let monthly = self.get_totals(WindowKind::CalendarMonth, reference);
        estimate_bill(monthly, &self.settings.tariffs)
    }

    pub fn get_alerts(&self) -> Vec<Alert> {
        self.read_state().alerts.clone()
    }

    pub fn mark_alert_read(&self, id: i64) {
        alert_engine::mark_read(&mut self.write_state().alerts, id);
    }

    pub fn get_recommendations(&self) -> Vec<Recommendation> {
        recommendations::ranked(&self.catalog, &self.read_state().snapshot)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::billing::TariffRates;
    use crate::application::fixtures::{date, flat_series};
    use async_trait::async_trait;

    struct FixtureRepository {
        subject: Vec<DailyReading>,
        baseline: Vec<DailyReading>,
    }

    #[async_trait]
    impl ReadingsRepository for FixtureRepository {
        async fn fetch_household_readings(&self, _days: u32) -> anyhow::Result<Vec<DailyReading>> {
            Ok(self.subject.clone())
        }

        async fn fetch_neighborhood_readings(
            &self,
            _days: u32,
        ) -> anyhow::Result<Vec<DailyReading>> {
            Ok(self.baseline.clone())
        }
    }

    fn reference_rates() -> TariffRates {
        TariffRates {
            electricity_rate: 0.1740,
            water_rate: 0.0035,
            gas_rate: 0.0850,
        }
    }

    fn service_with(
        subject: Vec<DailyReading>,
        baseline: Vec<DailyReading>,
        tariffs: TariffRates,
    ) -> DashboardService {
        let settings = EngineSettings {
            window_days: 30,
            tariffs,
            alerts: Default::default(),
        };
        DashboardService::new(
            Arc::new(FixtureRepository { subject, baseline }),
            settings,
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_refresh_loads_window_and_serves_totals() {
        // All of March 2025 at a constant 10 kWh / 150 L / 2.5 m³ per day
        let subject = flat_series(date(2025, 3, 1), 31, 10.0, 150.0, 2.5);
        let baseline = flat_series(date(2025, 3, 1), 31, 9.0, 140.0, 2.0);
        let service = service_with(subject, baseline, reference_rates());

        service.refresh().await.unwrap();

        let weekly = service.get_totals(WindowKind::Trailing7, date(2025, 3, 20));
        assert_eq!(weekly.electricity, 70.0);
        assert_eq!(weekly.water, 1050.0);

        let daily = service.get_daily_average(WindowKind::Trailing7, date(2025, 3, 20));
        assert_eq!(daily.electricity, 10.0);

        let monthly = service.get_totals(WindowKind::CalendarMonth, date(2025, 3, 20));
        assert_eq!(monthly.electricity, 310.0);
    }

    #[tokio::test]
    async fn test_refresh_rejects_misaligned_feeds() {
        let subject = flat_series(date(2025, 3, 1), 10, 10.0, 150.0, 2.5);
        let baseline = flat_series(date(2025, 3, 2), 10, 9.0, 140.0, 2.0);
        let service = service_with(subject, baseline, reference_rates());

        assert!(service.refresh().await.is_err());
        // Failed load leaves the previous (empty) window in place
        assert_eq!(
            service.get_totals(WindowKind::Trailing7, date(2025, 3, 10)),
            ResourceTotals::default()
        );
    }

    #[tokio::test]
    async fn test_bill_estimate_uses_calendar_month() {
        // 30 days of June at 10 kWh per day -> 300 kWh monthly
        let subject = flat_series(date(2025, 6, 1), 30, 10.0, 4000.0 / 30.0, 2.0);
        let baseline = subject.clone();
        let service = service_with(subject, baseline, reference_rates());
        service.refresh().await.unwrap();

        let bill = service.get_bill_estimate(date(2025, 6, 15)).unwrap();
        assert!((bill.electricity - 52.2).abs() < 1e-9);
        assert!((bill.water - 14.0).abs() < 1e-9);
        assert!((bill.total - (bill.electricity + bill.water + bill.gas)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_bad_rates_do_not_break_other_views() {
        let subject = flat_series(date(2025, 3, 1), 14, 10.0, 150.0, 2.5);
        let baseline = flat_series(date(2025, 3, 1), 14, 7.0, 150.0, 2.5);
        let mut rates = reference_rates();
        rates.gas_rate = -1.0;
        let service = service_with(subject, baseline, rates);
        service.refresh().await.unwrap();

        assert!(service.get_bill_estimate(date(2025, 3, 10)).is_err());
        // Alerts stay independently computable
        assert!(!service.get_alerts().is_empty());
    }

    #[tokio::test]
    async fn test_mark_alert_read_is_idempotent() {
        let subject = flat_series(date(2025, 3, 1), 14, 10.0, 150.0, 2.5);
        let baseline = flat_series(date(2025, 3, 1), 14, 7.0, 150.0, 2.5);
        let service = service_with(subject, baseline, reference_rates());
        service.refresh().await.unwrap();

        let alerts = service.get_alerts();
        assert!(!alerts.is_empty());
        let id = alerts[0].id;

        service.mark_alert_read(id);
        service.mark_alert_read(id);
        assert!(service.get_alerts()[0].read);

        // Unknown id is a silent no-op
        service.mark_alert_read(-1);
    }

    #[tokio::test]
    async fn test_read_flags_survive_refresh() {
        let subject = flat_series(date(2025, 3, 1), 14, 10.0, 150.0, 2.5);
        let baseline = flat_series(date(2025, 3, 1), 14, 7.0, 150.0, 2.5);
        let service = service_with(subject, baseline, reference_rates());
        service.refresh().await.unwrap();

        let id = service.get_alerts()[0].id;
        service.mark_alert_read(id);

        service.refresh().await.unwrap();
        let alerts = service.get_alerts();
        assert!(alerts.iter().find(|a| a.id == id).map(|a| a.read).unwrap());
    }

    #[tokio::test]
    async fn test_out_of_window_reference_yields_empty_view() {
        let subject = flat_series(date(2025, 3, 1), 14, 10.0, 150.0, 2.5);
        let baseline = subject.clone();
        let service = service_with(subject, baseline, reference_rates());
        service.refresh().await.unwrap();

        let view = service.get_consumption(WindowKind::Trailing7, date(2026, 1, 1));
        assert!(view.readings.is_empty());
        assert!(view.baseline.is_empty());
        assert_eq!(view.totals, ResourceTotals::default());
    }
}
