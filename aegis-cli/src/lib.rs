//! Configuration and run loop for the `aegis-sync` binary.

pub mod config;
pub mod service;

pub use config::{Config, ConfigError};
pub use service::Service;
