mod service_provider;

pub use service_provider::ServiceProvider;

pub mod config;
mod database;
mod repository;
pub mod telemetry;
