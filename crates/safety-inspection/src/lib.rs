pub mod config;
pub mod error;
pub mod inspections;
pub mod telemetry;
