//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `query` - Question answering, search, and summary commands
//! - `health` - Backend connectivity check

pub mod health;
pub mod query;

// Re-export command functions for main.rs
pub use health::*;
pub use query::*;

use anyhow::Result;
use teller_core::{BackendClient, BackendConfig};

/// Build a backend client from the environment plus CLI overrides
pub fn connect(host: Option<&str>, index: Option<&str>) -> Result<BackendClient> {
    let mut config = BackendConfig::from_env();
    if let Some(host) = host {
        config = config.host(host);
    }
    if let Some(index) = index {
        config = config.index(index);
    }
    Ok(BackendClient::elasticsearch(config)?)
}
