//! MD5 message digests (RFC 1321)
//!
//! MD5 is used here as a file fingerprint.  It is broken as a
//! cryptographic hash and must not be relied on against an adversary.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::md5::Md5;
//!
//! let mut md5 = Md5::default();
//! let result = md5.calculate_hash(b"message digest");
//! assert_eq!(result, "f96b697d7cb7938d525a2f31aaf161d0");
//! ```
use core::default::Default;
use core::fmt::{Display, Formatter};

use crate::block::{BlockBuffer, LengthOrder, BLOCK_SIZE};
use crate::digest::Digest;
use crate::Checksum;

pub mod constants {
    //! Initial chaining values and round tables from RFC 1321

    /// Chaining variable A, the bytes 01 23 45 67 read low-order first
    pub const WORD_A: u32 = u32::from_le_bytes([0x01, 0x23, 0x45, 0x67]);
    /// Chaining variable B
    pub const WORD_B: u32 = u32::from_le_bytes([0x89, 0xab, 0xcd, 0xef]);
    /// Chaining variable C
    pub const WORD_C: u32 = u32::from_le_bytes([0xfe, 0xdc, 0xba, 0x98]);
    /// Chaining variable D
    pub const WORD_D: u32 = u32::from_le_bytes([0x76, 0x54, 0x32, 0x10]);

    /// `T[i]`, the integer part of 2^32 * abs(sin(i + 1))
    #[rustfmt::skip]
    pub const T: [u32; 64] = [
        0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
        0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
        0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
        0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
        0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
        0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
        0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
        0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
    ];

    /// Left-rotate amounts, four per round
    pub const S: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];
}

use constants::*;

// F(X,Y,Z) = XY v not(X) Z
#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

// G(X,Y,Z) = XZ v Y not(Z)
#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

// H(X,Y,Z) = X xor Y xor Z
#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

// I(X,Y,Z) = Y xor (X v not(Z))
#[inline(always)]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Run the four rounds over one block and fold the result into the
/// chaining variables
#[allow(non_snake_case)]
fn compress(state: &mut [u32; 4], block: &[u8; BLOCK_SIZE]) {
    // MD5 reads each word low-order byte first
    let mut X = [0u32; 16];
    for (word, chunk) in X.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for step in 0..64 {
        let round = step / 16;
        let (mix, k) = match round {
            0 => (f(b, c, d), step),
            1 => (g(b, c, d), (5 * step + 1) % 16),
            2 => (h(b, c, d), (3 * step + 5) % 16),
            _ => (i(b, c, d), (7 * step) % 16),
        };

        // [abcd k s i]: a = b + ((a + mix + X[k] + T[i]) <<< s)
        let rotated = a
            .wrapping_add(mix)
            .wrapping_add(X[k])
            .wrapping_add(T[step])
            .rotate_left(S[round][step % 4]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// The data structure used for MD5 digests
#[derive(Clone, Debug)]
pub struct Md5 {
    /// The chaining variables A, B, C and D
    state: [u32; 4],
    /// Message bytes not yet compressed
    buffer: BlockBuffer,
    digest: Digest,
}

impl Default for Md5 {
    fn default() -> Md5 {
        Md5 {
            state: [WORD_A, WORD_B, WORD_C, WORD_D],
            buffer: BlockBuffer::default(),
            digest: Digest::new(128),
        }
    }
}

impl PartialEq for Md5 {
    fn eq(&self, other: &Md5) -> bool {
        self.digest == other.digest
    }
}

impl Display for Md5 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

impl Md5 {
    /// Create an MD5 holding the digest of `data`
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::md5::Md5;
    ///
    /// let md5 = Md5::from_bytes(b"abc");
    /// assert_eq!(md5.to_string(), "900150983cd24fb0d6963f7d28e17f72");
    /// ```
    pub fn from_bytes(data: &[u8]) -> Md5 {
        let mut md5 = Md5::default();
        md5.calculate_hash(data);
        md5
    }

    /// The digest as the 16 bytes defined by RFC 1321
    pub fn as_bytes(&self) -> [u8; 16] {
        let mut bytes = [0; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.digest.words()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl Checksum for Md5 {
    fn name(&self) -> &'static str {
        "MD5"
    }

    fn reset(&mut self) {
        self.state = [WORD_A, WORD_B, WORD_C, WORD_D];
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
            .pad(message_bits, LengthOrder::LittleEndian, |block| compress(state, block));

        // The digest is A, B, C, D written low-order byte first.  Stored
        // as words, that means each word is byte-swapped.
        for (word, chaining) in self.digest.words_mut().iter_mut().zip(self.state.iter()) {
            *word = u32::from_be_bytes(chaining.to_le_bytes());
        }
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }
}

#[cfg(test)]
mod tests {
    use super::Md5;
    use crate::Checksum;

    /// The test suite from RFC 1321 appendix A.5
    #[test]
    fn rfc1321_test_suite() {
        let test_vectors = [
            ("", "d41d8cd98f00b204e9800998ecf8427e"),
            ("a", "0cc175b9c0f1b6a831c399e269772661"),
            ("abc", "900150983cd24fb0d6963f7d28e17f72"),
            ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
            ("abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
            (
                "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "d174ab98d277d9f5a5611c2c9f419d9f",
            ),
            (
                "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "57edf4a22be3c955ac49da2e2107b67a",
            ),
        ];

        let mut md5 = Md5::default();
        for (input, expected) in test_vectors {
            assert_eq!(md5.calculate_hash(input.as_bytes()), expected, "MD5({:?})", input);
        }
    }

    /// Lengths around the padding boundary
    #[test]
    fn block_boundaries() {
        let test_vectors = [
            (55, "ef1772b6dff9a122358552954ad0df65"),
            (56, "3b0c8ac703f828b04c6c197006d17218"),
            (63, "b06521f39153d618550606be297466d5"),
            (64, "014842d480b571495a4a0363793f7367"),
        ];

        let mut md5 = Md5::default();
        for (len, expected) in test_vectors {
            let data = vec![b'a'; len];
            assert_eq!(md5.calculate_hash(&data), expected, "{} bytes", len);
        }
    }

    #[test]
    fn rolling_updates_match_slice() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut md5 = Md5::default();

        md5.reset();
        for &byte in data.iter() {
            md5.update(byte);
        }
        md5.finalize((data.len() * 8) as u32);

        assert_eq!(md5.digest().as_hex_string(), "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(md5, Md5::from_bytes(data));
    }

    #[test]
    fn bytes_match_hex() {
        let md5 = Md5::from_bytes(b"");

        assert_eq!(
            md5.as_bytes(),
            [
                0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8,
                0x42, 0x7e
            ]
        );
    }

    #[test]
    fn second_call_has_no_residue() {
        let mut md5 = Md5::default();

        md5.calculate_hash(&[0x5A; 1000]);
        assert_eq!(md5.calculate_hash(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }
}
