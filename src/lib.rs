//! MD5 digests of text.
//!
//! ```rust
//! assert_eq!(textdigest::digest("Hello World!"), "ed076287532e86365e841e92bfc50d8c");
//! ```

pub mod cs;

pub use cs::error::{Error, Result};
pub use cs::security;
pub use cs::security::{
    digest, md5_digest, verify, HexCase, Md5, Md5Digest, TextDigester, TextDigesterBuilder,
};
