//! MQTT transport configuration.

use std::time::Duration;

use rumqttc::{MqttOptions, Transport};
use serde::Deserialize;

/// Configuration for the MQTT transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Optional username; credentials are only sent when both are set.
    pub username: Option<String>,
    /// Optional password.
    pub password: Option<String>,
    /// Connect over TLS using the platform root certificates.
    pub use_tls: bool,
    /// First topic segment of actuator command topics.
    pub topic_prefix: String,
    /// Topic filters subscribed after every (re)connect.
    pub subscriptions: Vec<String>,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause after a connection failure before reconnecting, in seconds.
    pub reconnect_delay_secs: u16,
    /// Capacity of the client request queue.
    pub request_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "nightglow".to_string(),
            username: None,
            password: None,
            use_tls: false,
            topic_prefix: "rltn-iot".to_string(),
            subscriptions: vec!["rltn-iot/#".to_string()],
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            request_capacity: 16,
        }
    }
}

impl MqttConfig {
    /// Build the rumqttc client options.
    #[must_use]
    pub fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.broker_host, self.broker_port);
        options.set_keep_alive(Duration::from_secs(u64::from(self.keep_alive_secs)));
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            options.set_credentials(username, password);
        }
        if self.use_tls {
            options.set_transport(Transport::tls_with_default_config());
        }
        options
    }

    /// Delay between a failed connection and the next attempt.
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_delay_secs))
    }
}
