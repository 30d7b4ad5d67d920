// Savings recommendation ranking
use crate::application::aggregation::totals;
use crate::application::consumption_store::ConsumptionSnapshot;
use crate::application::window::select_span;
use crate::domain::consumption::{Resource, ResourceTotals};
use crate::domain::recommendation::Recommendation;
use chrono::Days;

/// Orders catalog entries so that resources furthest above the
/// neighborhood baseline surface first. General entries keep their catalog
/// position after the resource-specific ones; ties keep catalog order.
/// The entries themselves are fixed reference data from configuration.
pub fn ranked(catalog: &[Recommendation], snapshot: &ConsumptionSnapshot) -> Vec<Recommendation> {
    let ratios = overconsumption_ratios(snapshot);

    let mut entries = catalog.to_vec();
    entries.sort_by(|a, b| {
        let (general_a, ratio_a) = sort_key(a, &ratios);
        let (general_b, ratio_b) = sort_key(b, &ratios);
        general_a
            .cmp(&general_b)
            .then(ratio_b.total_cmp(&ratio_a))
    });
    entries
}

fn sort_key(entry: &Recommendation, ratios: &ResourceTotals) -> (bool, f64) {
    match entry.kind.resource() {
        Some(resource) => (false, ratios.get(resource)),
        None => (true, 0.0),
    }
}

/// Trailing-week subject/baseline ratio per resource. Falls back to 1.0
/// (neutral) when the snapshot is empty or the baseline total is zero.
fn overconsumption_ratios(snapshot: &ConsumptionSnapshot) -> ResourceTotals {
    let neutral = ResourceTotals {
        electricity: 1.0,
        water: 1.0,
        gas: 1.0,
    };
    let Some(end) = snapshot.subject().last().map(|reading| reading.date) else {
        return neutral;
    };
    let start = end.checked_sub_days(Days::new(6)).unwrap_or(end);

    let subject = totals(select_span(snapshot.subject(), start, end));
    let baseline = totals(select_span(snapshot.baseline(), start, end));

    ResourceTotals {
        electricity: ratio(subject.electricity, baseline.electricity),
        water: ratio(subject.water, baseline.water),
        gas: ratio(subject.gas, baseline.gas),
    }
}

fn ratio(subject: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        subject / baseline
    } else {
        1.0
    }
}
