//! Engine configuration.

use serde::{Deserialize, Serialize};

/// The entry stake every game requires, in ledger base units.
///
/// Fixed for the lifetime of a deployment and not part of [`EngineConfig`].
pub const REQUIRED_STAKE: u64 = 10;

/// Policy knobs for a [`GameEngine`](crate::GameEngine).
///
/// Missing fields fall back to their defaults when deserializing, so an
/// empty JSON object is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether an account may enroll itself as its own opponent.
    ///
    /// Default: `false`. When enabled, the single account fills `move1`
    /// with its first move and `move2` with its second.
    pub allow_self_play: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default_rejects_self_play() {
        let config = EngineConfig::default();
        assert!(!config.allow_self_play);
    }

    #[test]
    fn test_engine_config_from_empty_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_engine_config_from_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "allow_self_play": true }"#).unwrap();
        assert!(config.allow_self_play);
    }
}
