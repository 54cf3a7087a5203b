//! # nightglow-adapter-mqtt
//!
//! MQTT adapter — the transport and deserializer in front of the lighting core.
//!
//! ## Responsibilities
//! - Connect to the broker and keep reconnecting on failure
//! - Re-subscribe to the configured topic filters after every connect
//! - Classify topics (`sensorData` / `actuatorData`) and parse actuator paths
//!   into a [`DeviceScope`](nightglow_domain::scope::DeviceScope)
//! - Decode JSON payloads; undecodable messages are logged and dropped
//! - Forward connection changes and messages to the core over a channel
//!
//! ## Dependency rule
//! Same as other adapters: depends on `nightglow-app` and `nightglow-domain`.

mod config;
mod error;
pub mod payload;
pub mod topic;
mod transport;

pub use config::MqttConfig;
pub use error::MqttError;
pub use transport::MqttTransport;
