//! Per-IP rate limiting configuration.
//!
//! Limits are enforced with `tower_governor`, a token bucket keyed on the
//! client IP. The login endpoint gets its own, stricter bucket.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RATE_LIMIT_ENABLED` | `true` |
//! | `RATE_LIMIT_GENERAL_PER_SECOND` | 2 |
//! | `RATE_LIMIT_GENERAL_BURST_SIZE` | 30 |
//! | `RATE_LIMIT_AUTH_PER_SECOND` | 10 |
//! | `RATE_LIMIT_AUTH_BURST_SIZE` | 5 |
//!
//! The key is taken from `X-Forwarded-For` / `X-Real-Ip` / `Forwarded` when a
//! proxy sets them, falling back to the peer address.

use std::env;

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

pub type IpGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// When false the router installs no governor layers.
    pub enabled: bool,
    /// Replenish interval for general endpoints, in seconds per token.
    pub general_per_second: u64,
    /// Maximum tokens a client can accumulate on general endpoints.
    pub general_burst_size: u32,
    /// Replenish interval for the login endpoint.
    pub auth_per_second: u64,
    /// Burst size for the login endpoint.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl RateLimitConfig {
    /// Loads limits from the environment, keeping defaults for unset or
    /// unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Limits disabled, used by tests that fire many requests from one address.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Governor config for the general `/api` routes.
    ///
    /// # Panics
    ///
    /// Never in practice: zero values are bumped to 1 before building.
    #[must_use]
    pub fn general_governor_config(&self) -> IpGovernorConfig {
        build(self.general_per_second, self.general_burst_size)
            .expect("Failed to build general rate limiter config")
    }

    /// Governor config for `POST /api/auth/login`.
    ///
    /// # Panics
    ///
    /// Never in practice: zero values are bumped to 1 before building.
    #[must_use]
    pub fn auth_governor_config(&self) -> IpGovernorConfig {
        build(self.auth_per_second, self.auth_burst_size)
            .expect("Failed to build auth rate limiter config")
    }
}

fn build(per_second: u64, burst_size: u32) -> Option<IpGovernorConfig> {
    GovernorConfigBuilder::default()
        .per_second(per_second.max(1))
        .burst_size(burst_size.max(1))
        .key_extractor(SmartIpKeyExtractor)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_disabled_keeps_other_defaults() {
        let config = RateLimitConfig::disabled();
        assert!(!config.enabled);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_zero_values_still_build() {
        let config = RateLimitConfig {
            enabled: true,
            general_per_second: 0,
            general_burst_size: 0,
            auth_per_second: 0,
            auth_burst_size: 0,
        };
        let _ = config.general_governor_config();
        let _ = config.auth_governor_config();
    }
}
