//! Port definitions — traits and types that adapters implement or produce.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the core and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod pixel_driver;
pub mod transport;

pub use clock::Clock;
pub use pixel_driver::PixelDriver;
pub use transport::TransportEvent;
