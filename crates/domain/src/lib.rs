//! # nightglow-domain
//!
//! Pure domain model for the nightglow ambient lighting controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, monotonic/wall-clock time helpers
//! - Define the **Tween** (time-indexed brightness interpolation)
//! - Define **colors** and the dimming applied before a frame is written
//! - Define the **night window** that gates motion-triggered illumination
//! - Define the **device scope** and the **inbound payloads** delivered by the transport
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod color;
pub mod message;
pub mod night;
pub mod scope;
pub mod tween;
