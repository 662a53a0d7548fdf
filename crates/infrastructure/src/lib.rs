//! Captive DNS Infrastructure Layer
//!
//! Adapters binding the application layer to the outside world: the
//! non-blocking UDP transport and the embeddable server facade.
pub mod server;
pub mod udp;

pub use server::CaptiveDnsServer;
pub use udp::UdpTransport;
