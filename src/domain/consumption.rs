// Consumption domain models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A metered household resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Electricity,
    Water,
    Gas,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Electricity, Resource::Water, Resource::Gas];

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Electricity => "electricity",
            Resource::Water => "water",
            Resource::Gas => "gas",
        }
    }

    /// Billing/display unit for the resource.
    pub fn unit(&self) -> &'static str {
        match self {
            Resource::Electricity => "kWh",
            Resource::Water => "L",
            Resource::Gas => "m³",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of metered usage. At most one reading exists per calendar day
/// within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub electricity: f64,
    pub water: f64,
    pub gas: f64,
}

impl DailyReading {
    pub fn new(date: NaiveDate, electricity: f64, water: f64, gas: f64) -> Self {
        Self {
            date,
            electricity,
            water,
            gas,
        }
    }

    pub fn amount(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity,
            Resource::Water => self.water,
            Resource::Gas => self.gas,
        }
    }
}

/// Per-resource aggregate. Closed under addition, so a window can be
/// reduced in any order with the same result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResourceTotals {
    pub electricity: f64,
    pub water: f64,
    pub gas: f64,
}

impl ResourceTotals {
    pub fn get(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity,
            Resource::Water => self.water,
            Resource::Gas => self.gas,
        }
    }

    /// Element-wise division, used for daily averages.
    pub fn divided(self, divisor: f64) -> Self {
        Self {
            electricity: self.electricity / divisor,
            water: self.water / divisor,
            gas: self.gas / divisor,
        }
    }
}

impl Add for ResourceTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            electricity: self.electricity + other.electricity,
            water: self.water + other.water,
            gas: self.gas + other.gas,
        }
    }
}

impl Sum for ResourceTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<&DailyReading> for ResourceTotals {
    fn from(reading: &DailyReading) -> Self {
        Self {
            electricity: reading.electricity,
            water: reading.water,
            gas: reading.gas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_addition_is_commutative() {
        let a = ResourceTotals {
            electricity: 10.0,
            water: 150.0,
            gas: 2.5,
        };
        let b = ResourceTotals {
            electricity: 12.0,
            water: 130.0,
            gas: 3.0,
        };

        assert_eq!(a + b, b + a);
        assert_eq!(a + ResourceTotals::default(), a);
    }

    #[test]
    fn test_resource_labels() {
        assert_eq!(Resource::Electricity.to_string(), "electricity");
        assert_eq!(Resource::Gas.unit(), "m³");
    }
}
