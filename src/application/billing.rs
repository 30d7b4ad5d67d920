// Bill estimation from monthly totals and tariff rates
use crate::application::error::EngineError;
use crate::domain::billing::BillEstimate;
use crate::domain::consumption::{Resource, ResourceTotals};
use serde::Deserialize;

/// Tariff rates in currency per unit (kWh, liter, m³). Each rate must be
/// strictly positive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TariffRates {
    pub electricity_rate: f64,
    pub water_rate: f64,
    pub gas_rate: f64,
}

impl TariffRates {
    pub fn rate(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity_rate,
            Resource::Water => self.water_rate,
            Resource::Gas => self.gas_rate,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for resource in Resource::ALL {
            let rate = self.rate(resource);
            if rate <= 0.0 || !rate.is_finite() {
                return Err(EngineError::InvalidRate { resource, rate });
            }
        }
        Ok(())
    }
}

/// Pure estimation: each resource's monthly total times its rate, plus the
/// grand total. Output order is fixed (electricity, water, gas).
pub fn estimate_bill(
    monthly: ResourceTotals,
    rates: &TariffRates,
) -> Result<BillEstimate, EngineError> {
    rates.validate()?;

    let electricity = monthly.electricity * rates.electricity_rate;
    let water = monthly.water * rates.water_rate;
    let gas = monthly.gas * rates.gas_rate;

    Ok(BillEstimate {
        electricity,
        water,
        gas,
        total: electricity + water + gas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_rates() -> TariffRates {
        TariffRates {
            electricity_rate: 0.1740,
            water_rate: 0.0035,
            gas_rate: 0.0850,
        }
    }

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_reference_bill_scenario() {
        let monthly = ResourceTotals {
            electricity: 300.0,
            water: 4000.0,
            gas: 60.0,
        };

        let bill = estimate_bill(monthly, &reference_rates()).unwrap();
        assert!(approx(bill.electricity, 52.2));
        assert!(approx(bill.water, 14.0));
        assert!(approx(bill.gas, 5.1));
        assert!(approx(bill.total, 71.3));
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let monthly = ResourceTotals {
            electricity: 123.4,
            water: 5678.9,
            gas: 42.0,
        };

        let bill = estimate_bill(monthly, &reference_rates()).unwrap();
        assert!(approx(bill.total, bill.electricity + bill.water + bill.gas));
    }

    #[test]
    fn test_zero_totals_estimate_to_zero() {
        let bill = estimate_bill(ResourceTotals::default(), &reference_rates()).unwrap();
        assert_eq!(bill.total, 0.0);
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        let mut rates = reference_rates();
        rates.water_rate = 0.0;

        assert_eq!(
            estimate_bill(ResourceTotals::default(), &rates),
            Err(EngineError::InvalidRate {
                resource: Resource::Water,
                rate: 0.0
            })
        );
    }
}
