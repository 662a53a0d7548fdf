//! UDP transport for the catch-all resolver (RFC 1035 §4.2.1)
//!
//! Standard DNS transport. One datagram per poll, no framing, no retries:
//! a dropped reply costs the client one retransmit, which is acceptable for
//! captive-portal traffic.

use captive_dns_application::ports::DatagramTransport;
use captive_dns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use tracing::{debug, warn};

/// Largest inbound datagram accepted; queries beyond the classic 512-byte
/// limit still fit here even when clients attach EDNS padding we ignore.
const MAX_DATAGRAM_SIZE: usize = 4096;

/// Non-blocking UDP socket configured through `socket2`.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds the listening socket. This is the only hard failure in the
    /// system; everything after a successful bind degrades to logged no-ops.
    pub fn bind(addr: SocketAddr) -> Result<Self, DomainError> {
        let domain = if addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        let bind = || -> io::Result<UdpSocket> {
            let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
            socket.set_reuse_address(true)?;
            socket.set_recv_buffer_size(256 * 1024)?;
            socket.bind(&addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        };

        let socket = bind().map_err(|e| DomainError::BindFailed {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

        debug!(bind_address = %addr, "UDP socket bound");
        Ok(Self { socket })
    }

    /// Actual bound address (resolves port 0 after binding).
    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }
}

impl DatagramTransport for UdpTransport {
    fn poll_recv(&mut self) -> Option<(Vec<u8>, SocketAddr)> {
        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        loop {
            match self.socket.recv_from(&mut buf) {
                Ok((len, peer)) => return Some((buf[..len].to_vec(), peer)),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return None,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    return None;
                }
            }
        }
    }

    fn send_to(&mut self, payload: &[u8], peer: SocketAddr) {
        if let Err(e) = self.socket.send_to(payload, peer) {
            warn!(error = %e, client = %peer, "Failed to send reply");
        }
    }
}
