//! Error types shared by the digest modules.
//!
//! Hashing bytes or text in memory cannot fail; errors only come from parsing
//! user-supplied hex digests and from reading streamed input.

use thiserror::Error;

/// Errors produced by the `textdigest` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A hex digest string was not exactly 32 hexadecimal digits.
    #[error("invalid MD5 digest {0:?}: expected 32 hexadecimal digits")]
    InvalidDigest(String),

    /// Reading streamed input failed.
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
