//! Captive DNS Domain Layer
//!
//! Pure DNS message engine: wire-format parsing and classification of
//! incoming queries, reply construction, and the configuration types shared
//! by the outer layers. No sockets, no async, no side effects.
pub mod config;
pub mod errors;
pub mod message;
pub mod name_filter;
pub mod reply_code;
pub mod wire_response;

pub use config::{CliOverrides, Config, ConfigError, RedirectConfig};
pub use errors::DomainError;
pub use message::{classify_query, QueryOutcome};
pub use name_filter::NameFilter;
pub use reply_code::ReplyCode;
pub use wire_response::{build_address_answer, build_error_reply};
