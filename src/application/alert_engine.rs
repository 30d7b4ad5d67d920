// Alert rules over the consumption snapshot
use crate::application::aggregation::totals;
use crate::application::consumption_store::ConsumptionSnapshot;
use crate::application::window::select_span;
use crate::domain::alert::Alert;
use crate::domain::consumption::{DailyReading, Resource};
use chrono::{Days, NaiveDate};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Thresholds for the three alert rules. Percentages are whole numbers
/// (15.0 means 15%).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub trend_threshold_pct: f64,
    pub baseline_threshold_pct: f64,
    pub spike_multiplier: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            trend_threshold_pct: 15.0,
            baseline_threshold_pct: 20.0,
            spike_multiplier: 2.0,
        }
    }
}

/// Evaluates every rule against the snapshot and returns a new alert list:
/// `existing` alerts first with their read flags untouched, then newly
/// fired ones, newest first.
///
/// Ids are a content hash of (rule, resource, date), so re-running on an
/// unchanged snapshot mints the same ids and anything already present is
/// not fired again.
pub fn evaluate(
    snapshot: &ConsumptionSnapshot,
    thresholds: &AlertThresholds,
    existing: &[Alert],
) -> Vec<Alert> {
    let known: HashSet<i64> = existing.iter().map(|alert| alert.id).collect();

    let mut fresh = trend_alerts(snapshot, thresholds);
    fresh.extend(spike_alerts(snapshot, thresholds));
    fresh.extend(baseline_alerts(snapshot, thresholds));
    fresh.retain(|alert| !known.contains(&alert.id));
    fresh.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

    let mut alerts = existing.to_vec();
    alerts.extend(fresh);
    alerts
}

/// Flips the matching alert to read. Unknown ids are a silent no-op so
/// client retries stay idempotent.
pub fn mark_read(alerts: &mut [Alert], id: i64) {
    if let Some(alert) = alerts.iter_mut().find(|alert| alert.id == id) {
        alert.read = true;
    }
}

fn trend_alerts(snapshot: &ConsumptionSnapshot, thresholds: &AlertThresholds) -> Vec<Alert> {
    let series = snapshot.subject();
    let Some(end) = series.last().map(|reading| reading.date) else {
        return Vec::new();
    };

    let recent = totals(trailing_week(series, end));
    let prior_end = match end.checked_sub_days(Days::new(7)) {
        Some(day) => day,
        None => return Vec::new(),
    };
    let prior = totals(trailing_week(series, prior_end));

    let mut alerts = Vec::new();
    for resource in Resource::ALL {
        let before = prior.get(resource);
        if before <= 0.0 {
            continue;
        }
        let change_pct = (recent.get(resource) - before) / before * 100.0;
        if change_pct > thresholds.trend_threshold_pct {
            let message = format!(
                "Your {} use is up {:.0}% compared to the previous week",
                resource, change_pct
            );
            alerts.push(Alert::new(alert_id("trend", resource, end), resource, message, end));
        }
    }
    alerts
}

fn spike_alerts(snapshot: &ConsumptionSnapshot, thresholds: &AlertThresholds) -> Vec<Alert> {
    let series = snapshot.subject();
    if series.is_empty() {
        return Vec::new();
    }

    let window_average = totals(series).divided(series.len() as f64);

    let mut alerts = Vec::new();
    for reading in series {
        for resource in Resource::ALL {
            let average = window_average.get(resource);
            if average <= 0.0 {
                continue;
            }
            let amount = reading.amount(resource);
            if amount > thresholds.spike_multiplier * average {
                let message = format!(
                    "Unusually high {} use detected: {:.1} {} against a {:.1} {} daily average",
                    resource,
                    amount,
                    resource.unit(),
                    average,
                    resource.unit()
                );
                alerts.push(Alert::new(
                    alert_id("spike", resource, reading.date),
                    resource,
                    message,
                    reading.date,
                ));
            }
        }
    }
    alerts
}

fn baseline_alerts(snapshot: &ConsumptionSnapshot, thresholds: &AlertThresholds) -> Vec<Alert> {
    let Some(end) = snapshot.subject().last().map(|reading| reading.date) else {
        return Vec::new();
    };

    let subject = totals(trailing_week(snapshot.subject(), end));
    let baseline = totals(trailing_week(snapshot.baseline(), end));

    let mut alerts = Vec::new();
    for resource in Resource::ALL {
        let neighborhood = baseline.get(resource);
        if neighborhood <= 0.0 {
            continue;
        }
        let over_pct = (subject.get(resource) - neighborhood) / neighborhood * 100.0;
        if over_pct > thresholds.baseline_threshold_pct {
            let message = format!(
                "Your {} use this week is {:.0}% above the neighborhood average",
                resource, over_pct
            );
            alerts.push(Alert::new(
                alert_id("baseline", resource, end),
                resource,
                message,
                end,
            ));
        }
    }
    alerts
}

fn trailing_week(series: &[DailyReading], end: NaiveDate) -> &[DailyReading] {
    let start = end.checked_sub_days(Days::new(6)).unwrap_or(end);
    select_span(series, start, end)
}

/// Deterministic id: first 8 bytes of SHA-256 over "rule:resource:date",
/// masked non-negative.
fn alert_id(rule: &str, resource: Resource, date: NaiveDate) -> i64 {
    let digest = Sha256::digest(format!("{rule}:{resource}:{date}"));
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(bytes) & i64::MAX
}
