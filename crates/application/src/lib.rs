//! Captive DNS Application Layer
//!
//! Ports consumed by the engine and the request-processing use case that
//! ties parsing, classification and reply construction together.
pub mod ports;
pub mod use_cases;

pub use ports::DatagramTransport;
pub use use_cases::{RedirectEngine, RequestOutcome};
