//! Embeddable catch-all DNS server over UDP.

use crate::udp::UdpTransport;
use captive_dns_application::use_cases::{RedirectEngine, RequestOutcome};
use captive_dns_domain::name_filter::NameFilter;
use captive_dns_domain::reply_code::ReplyCode;
use captive_dns_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::info;

/// [`RedirectEngine`] wired to a bound UDP socket — the surface an embedding
/// application (captive portal, provisioning firmware, test harness) talks to.
pub struct CaptiveDnsServer {
    engine: RedirectEngine<UdpTransport>,
}

impl CaptiveDnsServer {
    /// Binds `bind_addr` and prepares the engine. Bind failure is the only
    /// startup error.
    pub fn start(
        bind_addr: SocketAddr,
        domain: &str,
        resolved_address: Ipv4Addr,
        strip_www_prefix: bool,
    ) -> Result<Self, DomainError> {
        let transport = UdpTransport::bind(bind_addr)?;
        let filter = NameFilter::new(domain, strip_www_prefix);
        info!(
            bind_address = %bind_addr,
            domain = %filter.target(),
            address = %resolved_address,
            "Captive DNS server listening"
        );
        Ok(Self {
            engine: RedirectEngine::new(transport, filter, resolved_address),
        })
    }

    pub fn set_ttl(&mut self, ttl: u32) {
        self.engine.set_ttl(ttl);
    }

    pub fn set_error_reply_code(&mut self, code: ReplyCode) {
        self.engine.set_error_reply_code(code);
    }

    /// See [`RedirectEngine::process_one_request`].
    pub fn process_one_request(&mut self) -> RequestOutcome {
        self.engine.process_one_request()
    }

    /// See [`RedirectEngine::reply_with_address`].
    pub fn reply_with_address(&mut self, addr: Ipv4Addr) {
        self.engine.reply_with_address(addr);
    }

    /// Answers a matched request with the address given at startup.
    pub fn reply_with_default(&mut self) {
        self.engine.reply_with_default();
    }

    /// Actual listening address (resolves port 0 after binding).
    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.engine.transport().local_addr()
    }

    /// Releases the socket and any pending request buffer.
    pub fn stop(self) {
        info!("Captive DNS server stopped");
        self.engine.stop();
    }
}
