//! ludoteca-api — REST backend client for ludoteca.
//!
//! Implements the `Backend` and `ProgressSink` traits from `ludoteca-core`
//! over the remote JSON/HTTP backend, plus configuration loading and an
//! in-memory mock for tests.

pub mod client;
pub mod config;
pub mod mock;

pub use client::ApiClient;
pub use config::{load_config, load_config_from, LudotecaConfig};
pub use mock::MockBackend;
