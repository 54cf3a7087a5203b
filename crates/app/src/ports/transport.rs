//! Transport port — what the transport task hands to the core task.
//!
//! The transport runs as its own supervised task and owns connection and
//! reconnection entirely. It only ever talks to the core by sending
//! [`TransportEvent`]s over a channel, so the lighting state has a single
//! writer.

use nightglow_domain::message::InboundMessage;

/// Connection-state change or inbound message from the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The broker session is established and subscriptions are in place.
    Connected,
    /// The broker session was lost; the transport is retrying on its own.
    Disconnected { reason: String },
    /// A decoded message from a subscribed topic.
    Message(InboundMessage),
}
