// src/config.rs
// =============================================================================
// Settings for a Resolver.
//
// Every Resolver owns its own copy of these values, so changing the interval
// on one resolver never affects a resolution running on another.
//
// The struct can be built in code, or loaded from JSON such as:
//   { "interval_ms": 500, "timeout_ms": 10000, "max_depth": 3 }
// Missing keys fall back to the defaults.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause between child sitemap fetches.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Default per-request timeout for the HTTP fetcher.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default limit on sitemap-index nesting.
pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Pause before each child fetch of an index (except the first).
    #[serde(rename = "interval_ms", with = "millis")]
    pub interval: Duration,

    /// Request timeout handed to the HTTP client.
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// How many index levels may sit above a flat sitemap.
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Parses a JSON document; absent keys keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// Durations are written as whole milliseconds in config files
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
