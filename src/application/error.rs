// Engine error types
use crate::domain::consumption::Resource;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the engine when a precondition is violated. All of them
/// are synchronous and none are retried internally; retry policy belongs to
/// the data-source collaborator.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("household and neighborhood series cover different dates")]
    Misaligned,

    #[error("duplicate reading for {0}")]
    DuplicateDate(NaiveDate),

    #[error("{resource} tariff rate must be positive, got {rate}")]
    InvalidRate { resource: Resource, rate: f64 },
}
