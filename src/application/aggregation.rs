// Windowed reduction of daily readings
use crate::domain::consumption::{DailyReading, ResourceTotals};

/// Per-resource sum across the window. Empty windows reduce to zero.
pub fn totals(readings: &[DailyReading]) -> ResourceTotals {
    readings.iter().map(ResourceTotals::from).sum()
}

/// Element-wise daily average over the window's nominal day count. The
/// divisor is the nominal size, not the number of readings actually
/// present, so weekly totals always divide by 7. Never divides by zero.
pub fn daily_average(totals: ResourceTotals, nominal_days: u32) -> ResourceTotals {
    totals.divided(f64::from(nominal_days.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::{date, series};

    #[test]
    fn test_totals_sums_each_resource() {
        let readings = series(
            date(2025, 3, 1),
            &[(10.0, 150.0, 2.5), (12.0, 130.0, 3.0), (8.0, 120.0, 2.0)],
        );

        let sum = totals(&readings);
        assert_eq!(sum.electricity, 30.0);
        assert_eq!(sum.water, 400.0);
        assert_eq!(sum.gas, 7.5);
    }

    #[test]
    fn test_totals_is_order_insensitive() {
        let mut readings = series(
            date(2025, 3, 1),
            &[(10.0, 150.0, 2.5), (12.0, 130.0, 3.0), (8.0, 120.0, 2.0)],
        );
        let forward = totals(&readings);
        readings.reverse();
        assert_eq!(totals(&readings), forward);
    }

    #[test]
    fn test_totals_of_empty_window_is_zero() {
        assert_eq!(totals(&[]), ResourceTotals::default());
    }

    #[test]
    fn test_daily_average_divides_weekly_totals_by_seven() {
        let readings = series(
            date(2025, 3, 1),
            &[
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
                (7.0, 140.0, 2.1),
            ],
        );

        let weekly = totals(&readings);
        let daily = daily_average(weekly, 7);
        assert_eq!(daily.electricity, weekly.electricity / 7.0);
        assert_eq!(daily.water, weekly.water / 7.0);
        assert_eq!(daily.gas, weekly.gas / 7.0);
    }

    #[test]
    fn test_daily_average_is_exact_division() {
        // 14.7 / 7 must come out as exactly 2.1, not a rounded-reciprocal
        // product like 14.7 * (1.0 / 7.0)
        let weekly = ResourceTotals {
            electricity: 14.7,
            water: 1050.0,
            gas: 14.7,
        };

        let daily = daily_average(weekly, 7);
        assert_eq!(daily.electricity, 2.1);
        assert_eq!(daily.water, 150.0);
        assert_eq!(daily.gas, 14.7 / 7.0);
    }

    #[test]
    fn test_daily_average_never_divides_by_zero() {
        let empty = daily_average(ResourceTotals::default(), 0);
        assert_eq!(empty, ResourceTotals::default());
    }
}
