// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod meter_api_repository;
