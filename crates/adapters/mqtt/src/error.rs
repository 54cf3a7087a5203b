//! MQTT adapter error types.

use nightglow_domain::error::{NightglowError, ValidationError};

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client rejected a request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The connection to the broker failed or dropped.
    #[error("MQTT connection error")]
    Connection(#[source] Box<rumqttc::ConnectionError>),

    /// Failed to parse an incoming MQTT payload as JSON.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] serde_json::Error),

    /// The core task dropped its end of the event channel.
    #[error("event channel closed")]
    ChannelClosed,

    /// A domain-level error (e.g. malformed topic).
    #[error("domain error")]
    Domain(#[source] ValidationError),
}

impl MqttError {
    /// Convert into a [`NightglowError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> NightglowError {
        match self {
            Self::Domain(err) => NightglowError::Validation(err),
            other => NightglowError::Transport(Box::new(other)),
        }
    }
}

impl From<MqttError> for NightglowError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
