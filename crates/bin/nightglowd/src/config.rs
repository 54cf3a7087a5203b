//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `nightglow.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use nightglow_adapter_mqtt::MqttConfig;
use nightglow_app::config::LightingConfig;
use nightglow_domain::error::ValidationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection settings.
    pub mqtt: MqttConfig,
    /// Fixture and lighting behaviour.
    pub lighting: LightingConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Scheduler loop settings.
    pub scheduler: SchedulerConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Scheduler loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wake-up interval of the loop when no message arrives, in milliseconds.
    pub tick_interval_ms: u64,
    /// Capacity of the transport → scheduler channel.
    pub event_capacity: usize,
}

impl Config {
    /// Load configuration from `nightglow.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nightglow.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("NIGHTGLOW_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = var("NIGHTGLOW_MQTT_PORT").and_then(|val| val.parse().ok()) {
            self.mqtt.broker_port = port;
        }
        if let Some(val) = var("NIGHTGLOW_MQTT_USERNAME") {
            self.mqtt.username = Some(val);
        }
        if let Some(val) = var("NIGHTGLOW_MQTT_PASSWORD") {
            self.mqtt.password = Some(val);
        }
        if let Some(val) = var("NIGHTGLOW_DEVICE_ID") {
            self.lighting.device_id = val;
        }
        if let Some(val) = var("NIGHTGLOW_ACTUATOR_DEVICE_ID") {
            self.lighting.actuator_device_id = val;
        }
        if let Some(val) = var("NIGHTGLOW_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt port must be non-zero".to_string(),
            ));
        }
        if self.mqtt.client_id.is_empty() {
            return Err(ConfigError::Validation(
                "mqtt client id must not be empty".to_string(),
            ));
        }
        if self.scheduler.tick_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "scheduler tick interval must be non-zero".to_string(),
            ));
        }
        if self.scheduler.event_capacity == 0 {
            return Err(ConfigError::Validation(
                "scheduler event capacity must be non-zero".to_string(),
            ));
        }
        self.lighting.validate()?;
        Ok(())
    }

    /// Scheduler wake-up interval.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.tick_interval_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nightglowd=info,nightglow=info,rumqttc=warn".to_string(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            event_capacity: 64,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// Lighting values the core cannot work with.
    #[error("invalid lighting configuration")]
    Lighting(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.mqtt.broker_host, "localhost");
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.lighting.pixel_count, 60);
        assert_eq!(config.scheduler.tick_interval_ms, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
        assert_eq!(config.lighting.max_brightness, 64);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r##"
            [mqtt]
            broker_host = "broker.example.org"
            broker_port = 8883
            client_id = "hallway"
            use_tls = true
            subscriptions = ["rltn-iot/acme/hq/#"]

            [lighting]
            base_color = "#ffbf00"
            device_id = "BBKXQ"
            actuator_device_id = "2b9c-41"

            [logging]
            filter = "debug"

            [scheduler]
            tick_interval_ms = 5
            event_capacity = 8
        "##;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.mqtt.broker_host, "broker.example.org");
        assert_eq!(config.mqtt.broker_port, 8883);
        assert_eq!(config.mqtt.client_id, "hallway");
        assert!(config.mqtt.use_tls);
        assert_eq!(config.mqtt.subscriptions, vec!["rltn-iot/acme/hq/#"]);
        assert_eq!(config.lighting.base_color.to_string(), "#ffbf00");
        assert_eq!(config.lighting.device_id, "BBKXQ");
        assert_eq!(config.lighting.actuator_device_id, "2b9c-41");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.scheduler.tick_interval_ms, 5);
        assert_eq!(config.scheduler.event_capacity, 8);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("NIGHTGLOW_MQTT_HOST", "10.0.0.2"),
            ("NIGHTGLOW_MQTT_PORT", "8883"),
            ("NIGHTGLOW_MQTT_USERNAME", "fixture"),
            ("NIGHTGLOW_MQTT_PASSWORD", "secret"),
            ("NIGHTGLOW_DEVICE_ID", "BBKXQ"),
            ("NIGHTGLOW_ACTUATOR_DEVICE_ID", "2b9c-41"),
            ("NIGHTGLOW_LOG", "debug"),
        ]));
        assert_eq!(config.mqtt.broker_host, "10.0.0.2");
        assert_eq!(config.mqtt.broker_port, 8883);
        assert_eq!(config.mqtt.username.as_deref(), Some("fixture"));
        assert_eq!(config.mqtt.password.as_deref(), Some("secret"));
        assert_eq!(config.lighting.device_id, "BBKXQ");
        assert_eq!(config.lighting.actuator_device_id, "2b9c-41");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_prefer_rust_log_over_nightglow_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("NIGHTGLOW_LOG", "debug"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("NIGHTGLOW_MQTT_PORT", "mqtt")]));
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.mqtt.broker_port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_client_id() {
        let mut config = Config::default();
        config.mqtt.client_id = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_tick_interval() {
        let mut config = Config::default();
        config.scheduler.tick_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_event_capacity() {
        let mut config = Config::default();
        config.scheduler.event_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_invalid_lighting() {
        let mut config = Config::default();
        config.lighting.pixel_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Lighting(ValidationError::ZeroPixelCount))
        ));
    }
}
