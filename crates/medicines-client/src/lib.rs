//! HTTP client and session orchestration for the medicines inventory.
//!
//! This crate wires the pure logic of `medicines_core` to a running
//! inventory API through a blocking `reqwest` client, and exposes it as the
//! `medicines` command-line tool.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod session;
pub mod shell;

pub use api::{HttpApi, MedicineApi};
pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use session::Session;
