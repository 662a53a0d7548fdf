//! One-datagram-per-call request processing.
//!
//! The engine owns a single request buffer at a time: received, classified,
//! and either answered, dropped, or parked for the caller — all within one
//! `process_one_request` call. Mismatches are answered internally with the
//! configured error code; a match is deliberately NOT answered here, so the
//! embedding application can pick the resolved address per request before
//! calling [`RedirectEngine::reply_with_address`].

use crate::ports::DatagramTransport;
use captive_dns_domain::message::{classify_query, QueryOutcome};
use captive_dns_domain::name_filter::NameFilter;
use captive_dns_domain::reply_code::ReplyCode;
use captive_dns_domain::wire_response::{build_address_answer, build_error_reply};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{debug, info};

/// Result of one processing cycle, as seen by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Nothing received, or unusable traffic that was silently dropped.
    NoActivity,
    /// A well-formed query for a different domain was answered with the
    /// configured error code. No caller action needed.
    HandledInternally,
    /// The query matched the configured domain. The request is parked; the
    /// caller decides the answer via [`RedirectEngine::reply_with_address`].
    Matched(String),
}

struct PendingRequest {
    datagram: Vec<u8>,
    peer: SocketAddr,
}

/// Catch-all DNS engine over an injected datagram transport.
pub struct RedirectEngine<T: DatagramTransport> {
    transport: T,
    filter: NameFilter,
    resolved_address: Ipv4Addr,
    ttl: u32,
    error_reply_code: ReplyCode,
    pending: Option<PendingRequest>,
}

impl<T: DatagramTransport> RedirectEngine<T> {
    pub fn new(transport: T, filter: NameFilter, resolved_address: Ipv4Addr) -> Self {
        Self {
            transport,
            filter,
            resolved_address,
            ttl: 60,
            error_reply_code: ReplyCode::default(),
            pending: None,
        }
    }

    /// TTL embedded in subsequent answers, in seconds.
    pub fn set_ttl(&mut self, ttl: u32) {
        self.ttl = ttl;
    }

    /// RCODE for subsequent non-matching replies.
    pub fn set_error_reply_code(&mut self, code: ReplyCode) {
        self.error_reply_code = code;
    }

    /// Default address used by [`RedirectEngine::reply_with_default`].
    pub fn resolved_address(&self) -> Ipv4Addr {
        self.resolved_address
    }

    /// Borrow of the underlying transport, e.g. to query its bound address.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Receives and classifies at most one datagram.
    ///
    /// Any request still parked from a previous cycle is released first —
    /// the buffer is never shared across requests.
    pub fn process_one_request(&mut self) -> RequestOutcome {
        self.pending = None;

        let Some((datagram, peer)) = self.transport.poll_recv() else {
            return RequestOutcome::NoActivity;
        };

        match classify_query(&datagram, &self.filter) {
            QueryOutcome::NotAQuery => {
                debug!(client = %peer, len = datagram.len(), "Dropping non-query datagram");
                RequestOutcome::NoActivity
            }
            QueryOutcome::NoMatch => {
                let mut reply = datagram;
                build_error_reply(&mut reply, self.error_reply_code);
                self.transport.send_to(&reply, peer);
                debug!(client = %peer, code = ?self.error_reply_code, "Rejected query");
                RequestOutcome::HandledInternally
            }
            QueryOutcome::Matched { domain } => {
                info!(domain = %domain, client = %peer, "Query matched redirect domain");
                self.pending = Some(PendingRequest { datagram, peer });
                RequestOutcome::Matched(domain)
            }
        }
    }

    /// Answers the parked matched request with `addr`, consuming the parked
    /// buffer. Silent no-op when no matched request is pending.
    pub fn reply_with_address(&mut self, addr: Ipv4Addr) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        build_address_answer(&mut pending.datagram, addr, self.ttl);
        self.transport.send_to(&pending.datagram, pending.peer);
        debug!(client = %pending.peer, address = %addr, "Sent redirect answer");
    }

    /// Answers the parked matched request with the engine's configured
    /// address.
    pub fn reply_with_default(&mut self) {
        self.reply_with_address(self.resolved_address);
    }

    /// Consumes the engine, releasing the transport and any parked buffer.
    pub fn stop(self) {}
}
