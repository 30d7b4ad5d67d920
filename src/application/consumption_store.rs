// Time-series store - owns the household and baseline series
use crate::application::error::EngineError;
use crate::domain::consumption::DailyReading;

/// Immutable snapshot of the observation window: the household (subject)
/// series and the neighborhood baseline, aligned on the same date set.
/// A load replaces the window wholesale; there is no partial-update path,
/// so every consumer sees either the old or the new complete window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionSnapshot {
    subject: Vec<DailyReading>,
    baseline: Vec<DailyReading>,
}

impl ConsumptionSnapshot {
    /// Builds a snapshot from raw feeds. Input order is not trusted: both
    /// series are sorted ascending by date. Fails when either series
    /// repeats a date or when the two date sets differ.
    pub fn load(
        subject: Vec<DailyReading>,
        baseline: Vec<DailyReading>,
    ) -> Result<Self, EngineError> {
        let subject = sorted_unique(subject)?;
        let baseline = sorted_unique(baseline)?;

        if subject.len() != baseline.len()
            || subject
                .iter()
                .zip(&baseline)
                .any(|(s, b)| s.date != b.date)
        {
            return Err(EngineError::Misaligned);
        }

        Ok(Self { subject, baseline })
    }

    pub fn subject(&self) -> &[DailyReading] {
        &self.subject
    }

    pub fn baseline(&self) -> &[DailyReading] {
        &self.baseline
    }
}

fn sorted_unique(mut series: Vec<DailyReading>) -> Result<Vec<DailyReading>, EngineError> {
    series.sort_by_key(|reading| reading.date);
    for pair in series.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(EngineError::DuplicateDate(pair[1].date));
        }
    }
    Ok(series)
}
