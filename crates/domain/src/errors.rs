use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Failed to bind UDP socket on {addr}: {reason}")]
    BindFailed { addr: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}
