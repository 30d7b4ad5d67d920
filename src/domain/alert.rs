// Alert domain model
use crate::domain::consumption::Resource;
use chrono::NaiveDate;
use serde::Serialize;

/// A dated consumption notification produced by the alert engine.
/// The only mutation in its lifetime is flipping `read` to true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: i64,
    pub resource: Resource,
    pub message: String,
    pub date: NaiveDate,
    pub read: bool,
}

impl Alert {
    pub fn new(id: i64, resource: Resource, message: String, date: NaiveDate) -> Self {
        Self {
            id,
            resource,
            message,
            date,
            read: false,
        }
    }
}
