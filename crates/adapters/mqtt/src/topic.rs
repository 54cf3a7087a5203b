//! Topic parsing — turns a topic string into a structured [`TopicKind`].
//!
//! This is the only place that looks inside topic strings. Actuator topics
//! follow `<prefix>/<org>/<site>/<device>/actuator/<kind>/<index>/actuatorData`.

use nightglow_domain::error::ValidationError;
use nightglow_domain::scope::DeviceScope;

/// Last segment of sensor reading topics.
pub const SENSOR_SUFFIX: &str = "sensorData";
/// Last segment of actuator command topics.
pub const ACTUATOR_SUFFIX: &str = "actuatorData";

/// What kind of message a topic carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicKind {
    /// A sensor reading; the sensor identity is in the payload.
    Sensor,
    /// A command for the actuator identified by the topic path.
    Actuator(DeviceScope),
}

/// Classify `topic`.
///
/// Returns `Ok(None)` for topics this fixture does not care about, and an
/// error for actuator topics whose path does not have the expected shape.
pub fn parse(topic: &str, prefix: &str) -> Result<Option<TopicKind>, ValidationError> {
    if topic.ends_with(SENSOR_SUFFIX) {
        return Ok(Some(TopicKind::Sensor));
    }
    if topic.ends_with(ACTUATOR_SUFFIX) {
        return parse_actuator(topic, prefix).map(|scope| Some(TopicKind::Actuator(scope)));
    }
    Ok(None)
}

fn parse_actuator(topic: &str, prefix: &str) -> Result<DeviceScope, ValidationError> {
    let invalid = || ValidationError::InvalidTopic(topic.to_string());

    let path = topic
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(invalid)?;
    let segments: Vec<&str> = path.split('/').collect();
    let [organization, site, device, "actuator", kind, index, ACTUATOR_SUFFIX] =
        segments.as_slice()
    else {
        return Err(invalid());
    };
    if [organization, site, device, kind].iter().any(|s| s.is_empty()) {
        return Err(invalid());
    }

    Ok(DeviceScope {
        organization: (*organization).to_string(),
        site: (*site).to_string(),
        device: (*device).to_string(),
        actuator_kind: (*kind).to_string(),
        index: index.parse().map_err(|_| invalid())?,
    })
}
