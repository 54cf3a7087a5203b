//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`NightglowError`] when crossing a port boundary.

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum NightglowError {
    /// A value failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The transport collaborator failed (connection, client, channel).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A color string is not of the form `#rrggbb`.
    #[error("invalid hex color {0:?}, expected #rrggbb")]
    InvalidHexColor(String),

    /// A topic does not follow the expected segment layout.
    #[error("invalid topic {0:?}")]
    InvalidTopic(String),

    /// The broker rejects sessions without a client identifier.
    #[error("client id must not be empty")]
    EmptyClientId,

    /// The fixture must have at least one pixel.
    #[error("pixel count must be non-zero")]
    ZeroPixelCount,

    /// The on-brightness must be greater than zero.
    #[error("max brightness must be non-zero")]
    ZeroBrightness,
}
