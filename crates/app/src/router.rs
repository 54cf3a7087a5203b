//! Event router — classifies inbound messages and forwards them to the
//! lighting controller.
//!
//! The router never touches animation state itself. Anything that does not
//! address this fixture, or lacks a field the controller needs, is dropped
//! silently (logged at debug level).

use nightglow_domain::message::{
    ActuatorPayload, InboundMessage, MOTION_SENSOR, SensorPayload, truthiness,
};
use nightglow_domain::scope::DeviceScope;
use nightglow_domain::time::Millis;

use crate::config::LightingConfig;
use crate::lighting::LightingController;

/// What an inbound message means for this fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingEvent {
    /// The followed motion sensor reported a reading.
    Motion { active: bool, timestamp_ms: i64 },
    /// An on/off command addressed to this fixture.
    Remote { turn_on: bool },
}

/// Filters messages down to the ones addressed to this fixture.
#[derive(Debug, Clone)]
pub struct EventRouter {
    device_id: String,
    actuator_device_id: String,
    actuator_kind: String,
}

impl EventRouter {
    /// Create a router for the given sensor and actuator identities.
    pub fn new(
        device_id: impl Into<String>,
        actuator_device_id: impl Into<String>,
        actuator_kind: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            actuator_device_id: actuator_device_id.into(),
            actuator_kind: actuator_kind.into(),
        }
    }

    /// Create a router from the lighting configuration.
    #[must_use]
    pub fn from_config(config: &LightingConfig) -> Self {
        Self::new(
            config.device_id.as_str(),
            config.actuator_device_id.as_str(),
            config.actuator_kind.as_str(),
        )
    }

    /// Decide what `message` means for this fixture, if anything.
    #[must_use]
    pub fn classify(&self, message: &InboundMessage) -> Option<LightingEvent> {
        match message {
            InboundMessage::Sensor(payload) => self.classify_sensor(payload),
            InboundMessage::Actuator { scope, payload } => self.classify_actuator(scope, payload),
        }
    }

    /// Classify `message` and forward it to `controller`.
    ///
    /// Returns the event that was applied, or `None` if the message was dropped.
    pub fn route(
        &self,
        message: &InboundMessage,
        controller: &mut LightingController,
        now: Millis,
    ) -> Option<LightingEvent> {
        let event = self.classify(message)?;
        match event {
            LightingEvent::Motion {
                active,
                timestamp_ms,
            } => controller.on_motion_event(active, timestamp_ms, now),
            LightingEvent::Remote { turn_on } => controller.on_remote_command(turn_on, now),
        }
        Some(event)
    }

    fn classify_sensor(&self, payload: &SensorPayload) -> Option<LightingEvent> {
        if payload.kind.as_deref() != Some(MOTION_SENSOR) {
            tracing::trace!(kind = ?payload.kind, "ignoring non-motion sensor reading");
            return None;
        }
        if payload.device_id.as_deref() != Some(self.device_id.as_str()) {
            tracing::debug!(device_id = ?payload.device_id, "ignoring motion from other device");
            return None;
        }
        let Some(active) = payload.value.as_ref().and_then(truthiness) else {
            tracing::debug!(value = ?payload.value, "ignoring motion reading without usable value");
            return None;
        };
        let Some(timestamp_ms) = payload.timestamp else {
            tracing::debug!("ignoring motion reading without timestamp");
            return None;
        };
        Some(LightingEvent::Motion {
            active,
            timestamp_ms,
        })
    }

    fn classify_actuator(
        &self,
        scope: &DeviceScope,
        payload: &ActuatorPayload,
    ) -> Option<LightingEvent> {
        if !scope.targets(&self.actuator_device_id, &self.actuator_kind) {
            tracing::debug!(%scope, "ignoring command for other actuator");
            return None;
        }
        let Some(turn_on) = payload.value.as_ref().and_then(truthiness) else {
            tracing::debug!(%scope, value = ?payload.value, "ignoring command without usable value");
            return None;
        };
        Some(LightingEvent::Remote { turn_on })
    }
}
