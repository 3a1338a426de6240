//! Engine tuning knobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays after start at which the supervisor retries a missing control.
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 4] = [1000, 2000, 4000, 8000];

/// Delay between a site navigation signal and the extra injection attempt.
pub const DEFAULT_NAVIGATION_DELAY_MS: u64 = 500;

/// Settings for one engine instance.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration:
///
/// ```
/// use pipkit_engine::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "autoPip": false }"#).unwrap();
/// assert!(!config.auto_pip);
/// assert_eq!(config.retry_delays_ms, vec![1000, 2000, 4000, 8000]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// One-shot retry schedule, in milliseconds after start
    pub retry_delays_ms: Vec<u64>,
    /// Delay before re-injecting after a navigation signal, in milliseconds
    pub navigation_delay_ms: u64,
    /// Initial auto-PiP enablement for the page context
    pub auto_pip: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry_delays_ms: DEFAULT_RETRY_DELAYS_MS.to_vec(),
            navigation_delay_ms: DEFAULT_NAVIGATION_DELAY_MS,
            auto_pip: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON, filling in defaults for absent keys.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// The retry schedule as durations.
    pub fn retry_delays(&self) -> impl Iterator<Item = Duration> + '_ {
        self.retry_delays_ms.iter().copied().map(Duration::from_millis)
    }

    /// The navigation re-injection delay as a duration.
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}
