//! Shared configuration library for cinelist.
//!
//! This crate centralizes client config defaults, loading from an optional
//! TOML file layered under `.env` and the process environment, validation
//! of the effective values, and tracing subscriber setup for binaries and
//! test harnesses.

pub mod constants;
pub mod loader;
pub mod models;
pub mod telemetry;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError};
pub use models::CatalogConfig;
pub use models::sources::{EnvConfig, FileConfig};
