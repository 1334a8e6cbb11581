pub mod md5;
pub mod text;

// Re-export MD5 functionality
pub use self::md5::{
    md5_digest, HexCase, Md5, Md5Digest, MD5_BLOCK_SIZE, MD5_HEX_LEN, MD5_OUTPUT_SIZE,
};

// Re-export text digest functionality
pub use self::text::{digest, verify, TextDigester, TextDigesterBuilder};
