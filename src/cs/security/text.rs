//! # Text Digests
//!
//! MD5 digests of user-supplied text, rendered as 32 hex characters.
//!
//! Text is always hashed as its UTF-8 byte encoding, so `"日本語"` hashes the nine
//! bytes `e6 97 a5 e6 9c ac e8 aa 9e`, never UTF-16 code units. Hashing in memory
//! is total: every `&str` has a digest, including the empty string.
//!
//! ## Key Features
//! - [`digest`] for the common case (lowercase hex).
//! - **Builder** pattern ([`TextDigesterBuilder`]) to pick the hex case.
//! - **Batch** hashing of independent inputs on the rayon thread pool.
//! - **Streaming** from any [`std::io::Read`] for inputs that should not be held in memory.
//!
//! ```rust
//! use textdigest::cs::security::text::{digest, HexCase, TextDigesterBuilder};
//!
//! assert_eq!(digest("abc"), "900150983cd24fb0d6963f7d28e17f72");
//!
//! let upper = TextDigesterBuilder::new().case(HexCase::Upper).build();
//! assert_eq!(upper.digest("abc"), "900150983CD24FB0D6963F7D28E17F72");
//! ```

use std::io::{self, Read};

use rayon::prelude::*;

use super::md5::{md5_digest, Md5, Md5Digest};
pub use super::md5::HexCase;
use crate::cs::error::Result;

/// Computes the MD5 digest of `text` as 32 lowercase hex characters.
pub fn digest(text: &str) -> String {
    md5_digest(text.as_bytes()).to_hex(HexCase::Lower)
}

/// Checks `text` against a previously displayed digest.
///
/// `expected_hex` may be in either case and may carry surrounding whitespace
/// (as pasted from a clipboard). Anything else that is not 32 hex digits is an
/// [`crate::cs::error::Error::InvalidDigest`].
pub fn verify(text: &str, expected_hex: &str) -> Result<bool> {
    let expected = Md5Digest::from_hex(expected_hex.trim())?;
    Ok(md5_digest(text.as_bytes()) == expected)
}

/// Builder for a [`TextDigester`].
#[derive(Debug, Clone, Default)]
pub struct TextDigesterBuilder {
    case: HexCase,
}

impl TextDigesterBuilder {
    /// Creates a builder producing lowercase digests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hex letter case of produced digests.
    pub fn case(mut self, case: HexCase) -> Self {
        self.case = case;
        self
    }

    /// Shorthand for `case(HexCase::Upper)` when `on`, `case(HexCase::Lower)` otherwise.
    pub fn uppercase(self, on: bool) -> Self {
        self.case(if on { HexCase::Upper } else { HexCase::Lower })
    }

    /// Builds the configured [`TextDigester`].
    pub fn build(self) -> TextDigester {
        TextDigester { case: self.case }
    }
}

/// Hashes text with a fixed output configuration.
///
/// Holds no per-call state, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDigester {
    case: HexCase,
}

impl TextDigester {
    /// The configured hex case.
    pub fn hex_case(&self) -> HexCase {
        self.case
    }

    /// Digest of the UTF-8 bytes of `text`.
    pub fn digest(&self, text: &str) -> String {
        md5_digest(text.as_bytes()).to_hex(self.case)
    }

    /// Digests every input in parallel. Output order matches input order.
    pub fn digest_many<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        log::debug!("digesting batch of {} texts", texts.len());
        texts
            .par_iter()
            .map(|text| self.digest(text.as_ref()))
            .collect()
    }

    /// Streams `reader` to the end and returns the digest of everything read.
    ///
    /// Read errors are returned as-is inside [`crate::cs::error::Error::Io`].
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> Result<String> {
        let mut hasher = Md5::new();
        let read = io::copy(&mut reader, &mut hasher)?;
        log::debug!("digested {} bytes from reader", read);
        Ok(hasher.finalize().to_hex(self.case))
    }
}
