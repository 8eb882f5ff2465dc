//! Configuration Module
//!
//! Cache policy and server settings. The cache itself only ever receives a
//! `Config` value; reading the environment is left to the binary.

use std::env;
use std::time::Duration;

/// Default TTL applied when a caller does not supply one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default period of the background expiry sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Default port for the admin HTTP surface.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache and server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL for entries stored without an explicit TTL
    pub default_ttl: Duration,
    /// Interval between background expiry sweeps
    pub sweep_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep period in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Absent or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            default_ttl: env_secs("CACHE_DEFAULT_TTL").unwrap_or(DEFAULT_TTL),
            // A zero interval would spin the sweep task.
            sweep_interval: env_secs("CACHE_SWEEP_INTERVAL")
                .filter(|interval| !interval.is_zero())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_default_ttl(Duration::from_secs(5))
            .with_sweep_interval(Duration::from_millis(250));

        assert_eq!(config.default_ttl, Duration::from_secs(5));
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
    }

    // Single test so parallel tests never observe each other's variables.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_DEFAULT_TTL");
        env::remove_var("CACHE_SWEEP_INTERVAL");
        env::remove_var("SERVER_PORT");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("CACHE_DEFAULT_TTL", "60");
        env::set_var("CACHE_SWEEP_INTERVAL", "0");
        env::set_var("SERVER_PORT", "not-a-port");
        let config = Config::from_env();
        assert_eq!(config.default_ttl, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);

        env::remove_var("CACHE_DEFAULT_TTL");
        env::remove_var("CACHE_SWEEP_INTERVAL");
        env::remove_var("SERVER_PORT");
    }
}
