//! Backend connectivity check

use anyhow::Result;
use teller_core::{format_health, BackendClient, SearchBackend};

pub async fn cmd_health(backend: BackendClient, json: bool) -> Result<()> {
    tracing::debug!("Checking backend health");
    match backend.health().await {
        Ok(health) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("{}", format_health(&health));
            }
            Ok(())
        }
        Err(e) => {
            anyhow::bail!("backend health check failed: {e}")
        }
    }
}
