use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Endpoint the hive publishes its clock channel on.
pub const DEFAULT_URL: &str = "wss://myserver.domain/hive-ws/";

/// Seconds between outbound clock messages.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Everything a session needs to know: where to dial, how often to tick.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: Url,
    pub interval: Duration,
}

impl SessionConfig {
    /// Build a validated config. Only `ws` and `wss` endpoints are accepted.
    pub fn new(url: Url, interval: Duration) -> Result<Self, ConfigError> {
        match url.scheme() {
            "ws" | "wss" => Ok(Self { url, interval }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ws_and_wss_endpoints() {
        for url in ["ws://127.0.0.1:9000/", DEFAULT_URL] {
            let cfg = SessionConfig::new(
                url.parse().unwrap(),
                Duration::from_secs(DEFAULT_INTERVAL_SECS),
            );
            assert!(cfg.is_ok(), "rejected {url}");
        }
    }

    #[test]
    fn rejects_non_websocket_schemes() {
        let cfg = SessionConfig::new(
            "https://myserver.domain/hive-ws/".parse().unwrap(),
            Duration::from_secs(60),
        );
        assert!(matches!(
            cfg,
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "https"
        ));
    }
}
