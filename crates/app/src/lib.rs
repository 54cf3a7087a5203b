//! # nightglow-app
//!
//! Application layer — the lighting core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement or feed:
//!   - `Clock` — monotonic millisecond time source
//!   - `PixelDriver` — writes one color to the whole strip
//!   - `TransportEvent` — what the transport task sends into the core
//! - Own the lighting core:
//!   - `LightingController` — on/off fades, night gate, auto-off deadline
//!   - `EventRouter` — classify inbound messages and forward them
//!   - `ColorRenderer` — brightness to color to pixels
//!   - `Scheduler` — the single task that owns all of the above
//! - Provide **in-process infrastructure** that doesn't need IO (the tokio-backed clock)
//!
//! ## Dependency rule
//! Depends on `nightglow-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod config;
pub mod lighting;
pub mod ports;
pub mod renderer;
pub mod router;
pub mod scheduler;
