#![allow(dead_code)]

/// Builds a standard single-question A/IN query for `domain`.
pub fn build_query(domain: &str) -> Vec<u8> {
    build_query_with_counts(domain, [1, 0, 0, 0])
}

/// Builds a query datagram with explicit QD/AN/NS/AR counts.
pub fn build_query_with_counts(domain: &str, counts: [u16; 4]) -> Vec<u8> {
    let mut datagram = Vec::new();
    datagram.extend_from_slice(&0x1234u16.to_be_bytes()); // ID
    datagram.extend_from_slice(&0x0100u16.to_be_bytes()); // flags: RD set
    for count in counts {
        datagram.extend_from_slice(&count.to_be_bytes());
    }
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        datagram.push(label.len() as u8);
        datagram.extend_from_slice(label.as_bytes());
    }
    datagram.push(0); // root label
    datagram.extend_from_slice(&[0x00, 0x01]); // QTYPE = A
    datagram.extend_from_slice(&[0x00, 0x01]); // QCLASS = IN
    datagram
}
