//! DNS response codes (RFC 1035 §4.1.1 RCODE field).

use serde::{Deserialize, Serialize};

/// Response code carried in the low nibble of the second flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyCode {
    NoError = 0,
    FormError = 1,
    ServerFailure = 2,
    #[default]
    NonExistentDomain = 3,
    NotImplemented = 4,
    Refused = 5,
}

impl ReplyCode {
    /// Wire value for the RCODE field.
    pub fn code(self) -> u8 {
        self as u8
    }
}
