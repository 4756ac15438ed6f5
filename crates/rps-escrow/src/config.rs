//! Combined configuration for an engine and the actor that runs it.

use std::path::Path;

use rps_escrow_engine::EngineConfig;
use rps_escrow_service::ServiceConfig;
use serde::{Deserialize, Serialize};

use crate::RpsEscrowError;

/// Everything needed to start an engine.
///
/// Every field is optional in JSON; missing ones take their defaults.
///
/// ```json
/// { "engine": { "allow_self_play": false }, "service": { "channel_size": 64 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RpsEscrowError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            RpsEscrowError::ConfigIo {
                path: path.display().to_string(),
                source,
            }
        })?;
        let config = Self::from_json(&text).map_err(|source| {
            RpsEscrowError::ConfigParse {
                path: path.display().to_string(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
