//! Payload decoding — raw MQTT publish into an [`InboundMessage`].

use nightglow_domain::message::InboundMessage;

use crate::error::MqttError;
use crate::topic::{self, TopicKind};

/// Decode a publish received on `topic`.
///
/// Returns `Ok(None)` when the topic is not one the lighting core consumes.
///
/// # Errors
///
/// Returns [`MqttError::Domain`] for a malformed actuator topic and
/// [`MqttError::PayloadParse`] when the body is not the expected JSON.
pub fn decode(
    topic: &str,
    payload: &[u8],
    topic_prefix: &str,
) -> Result<Option<InboundMessage>, MqttError> {
    let Some(kind) = topic::parse(topic, topic_prefix).map_err(MqttError::Domain)? else {
        return Ok(None);
    };

    let message = match kind {
        TopicKind::Sensor => {
            InboundMessage::Sensor(serde_json::from_slice(payload).map_err(MqttError::PayloadParse)?)
        }
        TopicKind::Actuator(scope) => InboundMessage::Actuator {
            scope,
            payload: serde_json::from_slice(payload).map_err(MqttError::PayloadParse)?,
        },
    };
    Ok(Some(message))
}
