//! Device scope — which fixture and actuator a command is addressed to.

use std::fmt;

/// Identity tuple carried in the path of an actuator command.
///
/// Built per message at the transport boundary and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceScope {
    pub organization: String,
    pub site: String,
    pub device: String,
    pub actuator_kind: String,
    pub index: u32,
}

impl DeviceScope {
    /// Whether this scope targets `device` through an actuator of `actuator_kind`.
    #[must_use]
    pub fn targets(&self, device: &str, actuator_kind: &str) -> bool {
        self.device == device && self.actuator_kind == actuator_kind
    }
}

impl fmt::Display for DeviceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.organization, self.site, self.device, self.actuator_kind, self.index
        )
    }
}
