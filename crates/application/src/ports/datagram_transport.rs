use std::net::SocketAddr;

/// Datagram capability the engine drives, one poll at a time.
///
/// Implementations must be non-blocking: the engine calls [`poll_recv`] once
/// per processing cycle and expects an immediate answer. Each engine owns its
/// transport outright, so several independent engines can coexist in one
/// process without shared socket state.
///
/// [`poll_recv`]: DatagramTransport::poll_recv
pub trait DatagramTransport: Send {
    /// Returns the next pending datagram and its source address, or `None`
    /// when nothing is waiting. Must never block.
    fn poll_recv(&mut self) -> Option<(Vec<u8>, SocketAddr)>;

    /// Fire-and-forget send of a fully formed reply. Failures are the
    /// implementation's concern (logged, never surfaced).
    fn send_to(&mut self, payload: &[u8], peer: SocketAddr);
}
