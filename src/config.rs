//! # Configuration Management
//!
//! Centralized configuration for the Bolt driver.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Environment variables via `from_env()` (`BOLT_DRIVER_*`)
//! - Direct instantiation with defaults
//!
//! Configuration is limited to the connection target, timeouts, the
//! reported user agent, and the ordered candidate protocol versions; there
//! is no process-wide state.

use crate::error::{BoltError, Result};
use crate::protocol::version::{ProtocolVersion, VersionOffer, MAX_OFFERED_VERSIONS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default Bolt port.
pub const DEFAULT_PORT: u16 = 7687;

/// Default connection attempt timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest value the tiny-string encoder accepts, in bytes.
const TINY_STRING_LIMIT: usize = 15;

/// Driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    /// Server host name or address.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Timeout for connection attempts.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,

    /// User agent reported in the HELLO message.
    pub user_agent: String,

    /// Candidate protocol versions, most preferred first (at most four).
    pub preferred_versions: Vec<ProtocolVersion>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: String::from("BoltDriver/0.1"),
            preferred_versions: vec![ProtocolVersion::new(4, 0)],
        }
    }
}

impl DriverConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BoltError::Config(format!("Failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| BoltError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Start with defaults
        let mut config = Self::default();

        if let Ok(host) = std::env::var("BOLT_DRIVER_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("BOLT_DRIVER_PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.port = val;
            }
        }

        if let Ok(timeout) = std::env::var("BOLT_DRIVER_CONNECT_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.connect_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(agent) = std::env::var("BOLT_DRIVER_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// The candidate versions as an immutable offer for the negotiator.
    pub fn version_offer(&self) -> Result<VersionOffer> {
        VersionOffer::new(self.preferred_versions.clone())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push("Host cannot be empty".to_string());
        }

        if self.port == 0 {
            errors.push("Port must be greater than 0".to_string());
        }

        if self.connect_timeout.as_millis() < 100 {
            errors.push("Connect timeout too short (minimum: 100ms)".to_string());
        } else if self.connect_timeout.as_secs() > 300 {
            errors.push("Connect timeout too long (maximum: 300s)".to_string());
        }

        if self.user_agent.is_empty() {
            errors.push("User agent cannot be empty".to_string());
        } else if self.user_agent.len() > TINY_STRING_LIMIT {
            errors.push(format!(
                "User agent too long: {} bytes (tiny-string limit: {} bytes)",
                self.user_agent.len(),
                TINY_STRING_LIMIT
            ));
        }

        if self.preferred_versions.is_empty() {
            errors.push("At least one preferred protocol version is required".to_string());
        } else if self.preferred_versions.len() > MAX_OFFERED_VERSIONS {
            errors.push(format!(
                "Too many preferred versions: {} (protocol maximum: {})",
                self.preferred_versions.len(),
                MAX_OFFERED_VERSIONS
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BoltError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Serialize `Duration` as milliseconds for TOML round-tripping.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DriverConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.preferred_versions, vec![ProtocolVersion::new(4, 0)]);
    }

    #[test]
    fn toml_roundtrip() {
        let config = DriverConfig::default_with_overrides(|c| {
            c.host = "db.internal".into();
            c.port = 7690;
            c.connect_timeout = Duration::from_millis(2500);
        });

        let toml = toml::to_string(&config).expect("serialize");
        let parsed = DriverConfig::from_toml(&toml).expect("parse");
        assert_eq!(parsed.host, "db.internal");
        assert_eq!(parsed.port, 7690);
        assert_eq!(parsed.connect_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn rejects_empty_host_and_zero_port() {
        let config = DriverConfig::default_with_overrides(|c| {
            c.host = String::new();
            c.port = 0;
        });

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(config.validate_strict().is_err());
    }

    #[test]
    fn rejects_oversized_user_agent() {
        let config = DriverConfig::default_with_overrides(|c| {
            c.user_agent = "an-agent-name-far-beyond-fifteen-bytes".into();
        });
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn rejects_bad_version_lists() {
        let config = DriverConfig::default_with_overrides(|c| {
            c.preferred_versions = vec![];
        });
        assert!(!config.validate().is_empty());

        let config = DriverConfig::default_with_overrides(|c| {
            c.preferred_versions = vec![ProtocolVersion::new(4, 0); 5];
        });
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn version_offer_from_config() {
        let config = DriverConfig::default();
        let offer = config.version_offer().expect("offer");
        assert_eq!(offer.versions(), &[ProtocolVersion::new(4, 0)]);
    }
}
