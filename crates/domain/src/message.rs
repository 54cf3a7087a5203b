//! Inbound messages — payloads delivered by the transport, already decoded.
//!
//! Every field is optional: a payload that lacks what the router needs is
//! dropped there, never rejected at decode time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scope::DeviceScope;

/// Sensor type reported by motion detectors.
pub const MOTION_SENSOR: &str = "MOTION";

/// Body of a `sensorData` message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorPayload {
    /// Sensor type, e.g. `"MOTION"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Reading; for motion sensors a truthy value means motion is detected.
    pub value: Option<Value>,
    /// Wall-clock time of the reading, milliseconds since the Unix epoch.
    pub timestamp: Option<i64>,
    /// Identity of the reporting sensor device.
    pub device_id: Option<String>,
}

/// Body of an `actuatorData` message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorPayload {
    /// Non-zero means on, zero means off.
    pub value: Option<Value>,
}

/// A message classified by topic and decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// A sensor reading from any device on the site.
    Sensor(SensorPayload),
    /// A command addressed to the actuator identified by `scope`.
    Actuator {
        scope: DeviceScope,
        payload: ActuatorPayload,
    },
}

/// Interpret a JSON value as a boolean.
///
/// Booleans are taken as-is. Numbers, and numeric strings once parsed, are
/// truncated to an integer and are true when non-zero, so `0.5` reads as
/// off. Anything else has no truth value.
#[must_use]
pub fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_f64().map(non_zero_integer),
        Value::String(text) => text.trim().parse::<f64>().ok().map(non_zero_integer),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn non_zero_integer(value: f64) -> bool {
    value.is_finite() && value.trunc().abs() >= 1.0
}
