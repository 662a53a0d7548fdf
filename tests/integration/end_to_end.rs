//! End-to-end tests over real loopback UDP sockets.
//!
//! Each test binds a server on an ephemeral port, fires queries from a plain
//! client socket, and drives the server's poll loop from the test thread —
//! the same single-threaded cadence an embedding application uses.

use captive_dns_application::use_cases::RequestOutcome;
use captive_dns_domain::reply_code::ReplyCode;
use captive_dns_infrastructure::CaptiveDnsServer;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

const PORTAL: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);

fn start_server(domain: &str) -> (CaptiveDnsServer, SocketAddr) {
    let server = CaptiveDnsServer::start(
        "127.0.0.1:0".parse().unwrap(),
        domain,
        PORTAL,
        false,
    )
    .expect("bind on loopback ephemeral port");
    let addr = server.local_addr().expect("bound address");
    (server, addr)
}

fn client_socket() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_millis(300)))
        .unwrap();
    socket
}

/// Polls until the server reports activity, or panics after ~1s of idling.
fn pump(server: &mut CaptiveDnsServer) -> RequestOutcome {
    for _ in 0..200 {
        match server.process_one_request() {
            RequestOutcome::NoActivity => {
                std::thread::sleep(Duration::from_millis(5));
            }
            outcome => return outcome,
        }
    }
    panic!("server saw no activity");
}

fn build_query(domain: &str) -> Vec<u8> {
    let mut datagram = Vec::new();
    datagram.extend_from_slice(&0x4242u16.to_be_bytes()); // ID
    datagram.extend_from_slice(&0x0100u16.to_be_bytes()); // flags: RD set
    datagram.extend_from_slice(&[0, 1, 0, 0, 0, 0, 0, 0]); // QDCOUNT = 1
    for label in domain.split('.') {
        datagram.push(label.len() as u8);
        datagram.extend_from_slice(label.as_bytes());
    }
    datagram.push(0);
    datagram.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]); // A, IN
    datagram
}

#[test]
fn matched_query_is_answered_with_portal_address() {
    let (mut server, addr) = start_server("portal.lan");
    let client = client_socket();

    let query = build_query("portal.lan");
    client.send_to(&query, addr).unwrap();

    assert_eq!(
        pump(&mut server),
        RequestOutcome::Matched("portal.lan".to_string())
    );
    server.reply_with_default();

    let mut buf = [0u8; 512];
    let (len, _) = client.recv_from(&mut buf).expect("answer should arrive");
    let reply = &buf[..len];

    assert_eq!(reply.len(), query.len() + 16);
    assert_eq!(&reply[0..2], &0x4242u16.to_be_bytes(), "ID echoed");
    assert_ne!(reply[2] & 0x80, 0, "QR = RESPONSE");
    assert_eq!(u16::from_be_bytes([reply[6], reply[7]]), 1, "ANCOUNT = 1");
    assert_eq!(&reply[len - 4..], &PORTAL.octets());
}

#[test]
fn caller_chosen_address_overrides_the_default() {
    let (mut server, addr) = start_server("*");
    let client = client_socket();

    client.send_to(&build_query("anything.example"), addr).unwrap();
    assert!(matches!(pump(&mut server), RequestOutcome::Matched(_)));
    server.reply_with_address(Ipv4Addr::new(10, 9, 8, 7));

    let mut buf = [0u8; 512];
    let (len, _) = client.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[len - 4..len], &[10, 9, 8, 7]);
}

#[test]
fn mismatched_query_gets_a_header_only_error_reply() {
    let (mut server, addr) = start_server("portal.lan");
    server.set_error_reply_code(ReplyCode::Refused);
    let client = client_socket();

    client.send_to(&build_query("other.example"), addr).unwrap();
    assert_eq!(pump(&mut server), RequestOutcome::HandledInternally);

    let mut buf = [0u8; 512];
    let (len, _) = client.recv_from(&mut buf).expect("error reply should arrive");
    let reply = &buf[..len];

    assert_eq!(reply.len(), 12);
    assert_ne!(reply[2] & 0x80, 0, "QR = RESPONSE");
    assert_eq!(reply[3] & 0x0F, ReplyCode::Refused.code());
    assert_eq!(u16::from_be_bytes([reply[4], reply[5]]), 0, "QDCOUNT = 0");
}

#[test]
fn configured_ttl_is_embedded_big_endian() {
    let (mut server, addr) = start_server("portal.lan");
    server.set_ttl(7200);
    let client = client_socket();

    client.send_to(&build_query("portal.lan"), addr).unwrap();
    assert!(matches!(pump(&mut server), RequestOutcome::Matched(_)));
    server.reply_with_default();

    let mut buf = [0u8; 512];
    let (len, _) = client.recv_from(&mut buf).unwrap();
    let ttl_offset = len - 10;
    assert_eq!(&buf[ttl_offset..ttl_offset + 4], &7200u32.to_be_bytes());
}

#[test]
fn garbage_is_never_answered() {
    let (mut server, addr) = start_server("*");
    let client = client_socket();

    client.send_to(&[0xFFu8; 7], addr).unwrap();

    // Give the datagram time to land, then drain: it must classify as noise
    // and the client must hear nothing back.
    std::thread::sleep(Duration::from_millis(20));
    for _ in 0..10 {
        assert_eq!(server.process_one_request(), RequestOutcome::NoActivity);
    }

    let mut probe = [0u8; 32];
    assert!(
        client.recv_from(&mut probe).is_err(),
        "server must not reply to garbage"
    );
}

#[test]
fn two_servers_coexist_in_one_process() {
    let (mut portal, portal_addr) = start_server("portal.lan");
    let (mut wildcard, wildcard_addr) = start_server("*");
    let client = client_socket();

    client.send_to(&build_query("portal.lan"), portal_addr).unwrap();
    client.send_to(&build_query("elsewhere.io"), wildcard_addr).unwrap();

    assert_eq!(
        pump(&mut portal),
        RequestOutcome::Matched("portal.lan".to_string())
    );
    assert_eq!(
        pump(&mut wildcard),
        RequestOutcome::Matched("elsewhere.io".to_string())
    );

    portal.stop();
    wildcard.stop();
}
