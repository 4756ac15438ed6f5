//! Actor configuration.

use serde::{Deserialize, Serialize};

/// Settings for the engine actor spawned by
/// [`spawn_engine`](crate::spawn_engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Capacity of the actor's command mailbox. When it fills up,
    /// submitters wait (bounded channel backpressure).
    pub channel_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { channel_size: 64 }
    }
}
