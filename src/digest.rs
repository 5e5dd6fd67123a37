//! Digest storage and formatting shared by every algorithm
//!
//! A digest is an ordered sequence of 32-bit words.  The number of
//! words is fixed when the digest is created from the algorithm's
//! bit-width and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use gash::digest::Digest;
//!
//! let digest = Digest::new(128);
//! assert_eq!(digest.word_count(), 4);
//! assert_eq!(digest.as_hex_string(), "00000000000000000000000000000000");
//! assert!(digest.is_sentinel());
//! ```
use core::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Byte order of a machine
///
/// Word packing in this crate goes through `from_le_bytes` and
/// `from_be_bytes`, so digests are the same on every host.  The host
/// order is still useful in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least-significant byte first
    LittleEndian,
    /// Most-significant byte first
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the machine this crate was compiled for
    pub const HOST: ByteOrder = if cfg!(target_endian = "little") {
        ByteOrder::LittleEndian
    } else {
        ByteOrder::BigEndian
    };
}

/// A fixed-width message digest or checksum value
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest {
    words: Box<[u32]>,
}

impl Digest {
    /// Create an all-zero digest holding `bits` bits
    ///
    /// `bits` is rounded down to a whole number of 32-bit words.
    pub fn new(bits: u32) -> Digest {
        Digest {
            words: vec![0; (bits / 32) as usize].into_boxed_slice(),
        }
    }

    /// Reset every word to zero, the sentinel state
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// The number of 32-bit words in the digest
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The width of the digest in bits
    pub fn bits(&self) -> u32 {
        (self.words.len() * 32) as u32
    }

    /// Borrow the words in storage order
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Mutable access for the engines.  The slice length can't change.
    pub(crate) fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// True if every word is zero
    ///
    /// This is what a hash over an unavailable byte source returns, but
    /// a 32-bit checksum can also legitimately be zero, the CRC-32 of
    /// an empty message for example.
    pub fn is_sentinel(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Lower-case hexadecimal, eight digits per word, no separators
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::Checksum;
    /// use gash::crc32::Crc32;
    ///
    /// let mut crc32 = Crc32::default();
    /// crc32.calculate_hash(b"123456789");
    /// assert_eq!(crc32.digest().as_hex_string(), "cbf43926");
    /// ```
    pub fn as_hex_string(&self) -> String {
        self.to_string()
    }

    /// Copy the words into caller-provided storage
    ///
    /// Only the first `word_count()` elements of `store` are written.
    ///
    /// # Errors
    ///
    /// [`Error::StorageTooSmall`] if `store` has fewer elements than
    /// the digest has words.
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::Checksum;
    /// use gash::adler32::Adler32;
    ///
    /// let mut adler32 = Adler32::default();
    /// adler32.calculate_hash(b"");
    ///
    /// let mut store = [0xFFFF_FFFFu32; 2];
    /// adler32.digest().as_word_array(&mut store).unwrap();
    /// assert_eq!(store, [0x00000001, 0xFFFF_FFFF]);
    /// ```
    pub fn as_word_array(&self, store: &mut [u32]) -> Result<()> {
        if store.len() < self.words.len() {
            return Err(Error::StorageTooSmall {
                needed: self.words.len(),
                available: store.len(),
            });
        }
        store[..self.words.len()].copy_from_slice(&self.words);

        Ok(())
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for word in self.words.iter() {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteOrder, Digest};
    use crate::error::Error;

    #[test]
    fn word_count_follows_bits() {
        assert_eq!(Digest::new(32).word_count(), 1);
        assert_eq!(Digest::new(128).word_count(), 4);
        assert_eq!(Digest::new(256).word_count(), 8);
        assert_eq!(Digest::new(256).bits(), 256);
    }

    #[test]
    fn hex_string_pads_each_word() {
        let mut digest = Digest::new(64);
        digest.words_mut().copy_from_slice(&[0x1, 0xABCDEF]);

        assert_eq!(digest.as_hex_string(), "0000000100abcdef");
        assert_eq!(digest.to_string(), digest.as_hex_string());
        assert!(!digest.is_sentinel());
    }

    #[test]
    fn clear_restores_sentinel() {
        let mut digest = Digest::new(64);
        digest.words_mut()[1] = 7;
        digest.clear();

        assert!(digest.is_sentinel());
        assert_eq!(digest.word_count(), 2);
    }

    #[test]
    fn equality_compares_length_then_words() {
        let mut a = Digest::new(64);
        let mut b = Digest::new(64);
        assert_eq!(a, b);

        a.words_mut()[0] = 1;
        assert_ne!(a, b);

        b.words_mut()[0] = 1;
        assert_eq!(a, b);

        // Same leading word, different width
        let mut c = Digest::new(32);
        c.words_mut()[0] = 1;
        assert_ne!(a, c);
    }

    #[test]
    fn word_array_rejects_short_storage() {
        let digest = Digest::new(128);
        let mut store = [0u32; 3];

        match digest.as_word_array(&mut store) {
            Err(Error::StorageTooSmall { needed, available }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn host_byte_order_matches_target() {
        let probe = 0x89BADCFEu32.to_ne_bytes();
        let expected = if probe[0] == 0xFE {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        };
        assert_eq!(ByteOrder::HOST, expected);
    }
}
