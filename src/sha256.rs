//! SHA-256 message digests (FIPS 180-2)
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::sha256::Sha256;
//!
//! let mut sha256 = Sha256::default();
//! let result = sha256.calculate_hash(b"abc");
//! assert_eq!(
//!     result,
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
use core::default::Default;
use core::fmt::{Display, Formatter};

use crate::block::{BlockBuffer, LengthOrder, BLOCK_SIZE};
use crate::digest::Digest;
use crate::Checksum;

pub mod constants {
    //! Round constants and initial hash value from FIPS 180-2

    /// The first 32 bits of the fractional parts of the cube roots of
    /// the first 64 primes
    #[rustfmt::skip]
    pub const K: [u32; 64] = [
        0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
        0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
        0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
        0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
        0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
        0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
        0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
        0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
    ];

    /// The first 32 bits of the fractional parts of the square roots
    /// of the first 8 primes
    pub const H: [u32; 8] = [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
    ];
}

use constants::*;

/// Number of rounds and message schedule words per block
const ROUNDS: usize = 64;

#[allow(non_snake_case)]
#[inline(always)]
fn Ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[allow(non_snake_case)]
#[inline(always)]
fn Maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[allow(non_snake_case)]
#[inline(always)]
fn Σ_0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[allow(non_snake_case)]
#[inline(always)]
fn Σ_1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn σ_0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn σ_1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[allow(non_snake_case)]
fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_SIZE]) {
    // The message schedule
    let mut W = [0u32; ROUNDS];

    for (word, chunk) in W.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    // Expand the message into the rest of the schedule
    for t in 16..ROUNDS {
        W[t] = σ_1(W[t - 2])
            .wrapping_add(W[t - 7])
            .wrapping_add(σ_0(W[t - 15]))
            .wrapping_add(W[t - 16]);
    }

    // Working variables
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..ROUNDS {
        let T1 = h
            .wrapping_add(Σ_1(e))
            .wrapping_add(Ch(e, f, g))
            .wrapping_add(K[t])
            .wrapping_add(W[t]);
        let T2 = Σ_0(a).wrapping_add(Maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(T1);
        d = c;
        c = b;
        b = a;
        a = T1.wrapping_add(T2);
    }

    // Compute the intermediate hash values
    for (chaining, working) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *chaining = chaining.wrapping_add(working);
    }
}

/// The data structure used for SHA-256 digests
#[derive(Clone, Debug)]
pub struct Sha256 {
    /// The eight chaining variables H0 through H7
    state: [u32; 8],
    buffer: BlockBuffer,
    digest: Digest,
}

impl Default for Sha256 {
    fn default() -> Sha256 {
        Sha256 {
            state: H,
            buffer: BlockBuffer::default(),
            digest: Digest::new(256),
        }
    }
}

impl PartialEq for Sha256 {
    fn eq(&self, other: &Sha256) -> bool {
        self.digest == other.digest
    }
}

impl Display for Sha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

impl Sha256 {
    /// Create a SHA-256 holding the digest of `data`
    pub fn from_bytes(data: &[u8]) -> Sha256 {
        let mut sha256 = Sha256::default();
        sha256.calculate_hash(data);
        sha256
    }

    /// The digest as 32 bytes, most-significant byte of H0 first
    pub fn as_bytes(&self) -> [u8; 32] {
        let mut bytes = [0; 32];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.digest.words()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl Checksum for Sha256 {
    fn name(&self) -> &'static str {
        "SHA-256"
    }

    fn reset(&mut self) {
        self.state = H;
        self.buffer.clear();
        self.digest.clear();
    }

    fn update(&mut self, byte: u8) {
        let state = &mut self.state;
        self.buffer.push(byte, |block| compress(state, block));
    }

    fn update_slice(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.extend(data, |block| compress(state, block));
    }

    fn finalize(&mut self, message_bits: u32) {
        let state = &mut self.state;
        self.buffer
            .pad(message_bits, LengthOrder::BigEndian, |block| compress(state, block));

        self.digest.words_mut().copy_from_slice(&self.state);
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }
}
