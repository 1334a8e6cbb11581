//! MD5 (RFC 1321) message digest in pure Rust.
//!
//! MD5 is broken as a cryptographic hash: collisions are cheap to produce. It is
//! provided for checksums and interoperability with tools that display MD5 digests.
//! Do not use it to protect passwords, sign data, or anything security-sensitive.

use core::fmt;
use core::str::FromStr;
use std::io;

use crate::cs::error::{Error, Result};

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;
/// The size of one compression block in bytes (512 bits).
pub const MD5_BLOCK_SIZE: usize = 64;
/// The length of a digest rendered as hex.
pub const MD5_HEX_LEN: usize = MD5_OUTPUT_SIZE * 2;

/// Offset of the 64-bit length field in the final padded block.
const LENGTH_OFFSET: usize = MD5_BLOCK_SIZE - 8;

/// The initial values for (A, B, C, D) from the MD5 specification.
const INIT_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// The sine table constants (K) in MD5 (32 bits).
/// K[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
#[rustfmt::skip]
static K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// The amount of left rotation performed in each MD5 step, grouped by round.
#[rustfmt::skip]
static S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,
];

/// Letter case used when rendering a digest as hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HexCase {
    /// `0-9a-f`
    #[default]
    Lower,
    /// `0-9A-F`
    Upper,
}

/// A finished 128-bit MD5 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Md5Digest([u8; MD5_OUTPUT_SIZE]);

impl Md5Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; MD5_OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a 32-digit hex digest. Either letter case is accepted.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; MD5_OUTPUT_SIZE];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| Error::InvalidDigest(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// The raw digest bytes: A, B, C, D, each little-endian.
    pub fn as_bytes(&self) -> &[u8; MD5_OUTPUT_SIZE] {
        &self.0
    }

    /// Renders the digest as exactly 32 hex characters in the requested case.
    pub fn to_hex(&self, case: HexCase) -> String {
        match case {
            HexCase::Lower => hex::encode(self.0),
            HexCase::Upper => hex::encode_upper(self.0),
        }
    }
}

impl From<Md5Digest> for [u8; MD5_OUTPUT_SIZE] {
    fn from(digest: Md5Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Md5Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Md5Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::LowerHex for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Md5Digest({:x})", self)
    }
}

/// Streaming MD5 context.
///
/// Feed data with [`Md5::update`] (or through [`std::io::Write`]) and call
/// [`Md5::finalize`] once at the end.
#[derive(Debug, Clone)]
pub struct Md5 {
    /// Working state (A, B, C, D).
    state: [u32; 4],
    /// Bytes of the current, incomplete block.
    buffer: [u8; MD5_BLOCK_SIZE],
    buffer_len: usize,
    /// Total message length in bits mod 2^64
    length_bits: u64,
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Creates a new MD5 context.
    pub fn new() -> Self {
        Self {
            state: INIT_STATE,
            buffer: [0u8; MD5_BLOCK_SIZE],
            buffer_len: 0,
            length_bits: 0,
        }
    }

    /// Discards everything fed so far.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Absorbs `data` into the context.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length_bits = self
            .length_bits
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        if self.buffer_len > 0 {
            let take = (MD5_BLOCK_SIZE - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len < MD5_BLOCK_SIZE {
                return;
            }
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        // whole blocks go straight from the input
        let mut blocks = data.chunks_exact(MD5_BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pads the message, processes the final block(s) and returns the digest.
    pub fn finalize(mut self) -> Md5Digest {
        self.finish()
    }

    /// Like [`Md5::finalize`], but leaves the context reset for a new message.
    pub fn finalize_reset(&mut self) -> Md5Digest {
        let digest = self.finish();
        self.reset();
        digest
    }

    fn finish(&mut self) -> Md5Digest {
        log::trace!("md5: finalizing {} byte message", self.length_bits / 8);

        let mut pos = self.buffer_len;
        self.buffer[pos] = 0x80;
        pos += 1;

        // no room for the length field, spill into one more block
        if pos > LENGTH_OFFSET {
            self.buffer[pos..].fill(0);
            compress(&mut self.state, &self.buffer);
            pos = 0;
        }
        self.buffer[pos..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&self.length_bits.to_le_bytes());
        compress(&mut self.state, &self.buffer);

        let mut output = [0u8; MD5_OUTPUT_SIZE];
        for (chunk, word) in output.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Md5Digest(output)
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Processes one 64-byte block, updating `state`.
/// The block is read as 16 little-endian 32-bit words.
fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), MD5_BLOCK_SIZE);

    let mut w = [0u32; 16];
    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i / 16 {
            // F
            0 => ((b & c) | (!b & d), i),
            // G
            1 => ((b & d) | (c & !d), (5 * i + 1) % 16),
            // H
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            // I
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let temp = a.wrapping_add(f).wrapping_add(w[g]).wrapping_add(K[i]);
        let temp = temp.rotate_left(S[i]).wrapping_add(b);

        a = d;
        d = c;
        c = b;
        b = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// Computes the MD5 digest of `data` in a single shot.
pub fn md5_digest(data: &[u8]) -> Md5Digest {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize()
}
