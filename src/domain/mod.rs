// Domain layer - Consumption value types
pub mod alert;
pub mod billing;
pub mod consumption;
pub mod recommendation;
