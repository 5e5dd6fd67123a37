//! crate for file integrity digests and checksums
//!
//! This crate reduces a byte buffer or a byte source, such as an open
//! file, to a short fixed-width fingerprint using one of five
//! published algorithms: MD5 (RFC 1321), SHA-256 (FIPS 180-2), CRC-32,
//! Adler-32 and the ELF object-file hash.
//!
//! MD5 and SHA-256 are used here as integrity fingerprints only, no
//! cryptographic guarantees are made.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::algorithm::Algorithm;
//!
//! let mut hasher = Algorithm::Sha256.hasher();
//! let result = hasher.calculate_hash(b"abc");
//! assert_eq!(
//!     result,
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
#![warn(missing_docs)]
#![warn(unsafe_code)]

use tracing::{debug, warn};

pub mod adler32;
pub mod algorithm;
mod block;
pub mod crc32;
pub mod digest;
pub mod elf;
pub mod error;
pub mod md5;
pub mod sha256;
pub mod source;

pub use crate::digest::Digest;
pub use crate::error::{Error, Result};
pub use crate::source::ByteSource;

use crate::digest::ByteOrder;

/// Checksum trait all digest and checksum algorithms implement
///
/// An algorithm is driven through four steps: [`reset`](Self::reset),
/// one or more calls to [`update`](Self::update), [`finalize`](Self::finalize),
/// and reading the [`digest`](Self::digest).  The provided
/// [`calculate_hash`](Self::calculate_hash) and
/// [`calculate_hash_from_source`](Self::calculate_hash_from_source)
/// methods run all of them.
///
/// Every call to a `calculate_hash` method resets the state first, so
/// calling it twice with the same input yields the same result, and
/// nothing from an earlier call leaks into a later one.
pub trait Checksum {
    /// Human-readable algorithm name, "SHA-256" for example
    fn name(&self) -> &'static str;

    /// Reset to the algorithm's initial state and zero the digest
    fn reset(&mut self);

    /// Absorb one byte
    fn update(&mut self, byte: u8);

    /// Absorb a slice of bytes
    ///
    /// Equivalent to calling [`update`](Self::update) for each byte.
    fn update_slice(&mut self, data: &[u8]) {
        for byte in data {
            self.update(*byte);
        }
    }

    /// Finish the computation and store the result in the digest
    ///
    /// `message_bits` is the length of the whole message in bits,
    /// truncated to 32 bits.  Only the block-based algorithms use it,
    /// for their padding length field.
    fn finalize(&mut self, message_bits: u32);

    /// The digest from the last finalized computation
    fn digest(&self) -> &Digest;

    /// Compute the digest of a byte slice, returning it as a hex string
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::Checksum;
    /// use gash::md5::Md5;
    ///
    /// let mut md5 = Md5::default();
    /// assert_eq!(md5.calculate_hash(b""), "d41d8cd98f00b204e9800998ecf8427e");
    /// assert_eq!(md5.calculate_hash(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    /// ```
    fn calculate_hash(&mut self, data: &[u8]) -> String {
        self.reset();
        self.update_slice(data);
        self.finalize(message_bits(data.len() as u64));

        self.digest().as_hex_string()
    }

    /// Compute the digest of everything in a byte source
    ///
    /// The total length is read from the source up front and the
    /// source is rewound before and after hashing, so the same source
    /// can be hashed again by the caller.
    ///
    /// If the source is unavailable, or fails while being read, the
    /// all-zero sentinel digest is returned and the source is left as
    /// it is.  Callers that need to tell that apart from a genuine zero
    /// checksum should check [`ByteSource::is_available`] themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::Checksum;
    /// use gash::crc32::Crc32;
    /// use gash::source::{ByteSource, SliceSource};
    ///
    /// let mut source = SliceSource::new(b"123456789");
    /// let mut crc32 = Crc32::default();
    ///
    /// assert_eq!(crc32.calculate_hash_from_source(&mut source), "cbf43926");
    /// assert_eq!(source.position(), 0);
    /// ```
    fn calculate_hash_from_source(&mut self, source: &mut dyn ByteSource) -> String {
        self.reset();

        if !source.is_available() {
            warn!(algorithm = self.name(), "byte source unavailable, returning sentinel digest");
            return self.digest().as_hex_string();
        }

        let length = source.total_length();
        if !source.is_available() {
            warn!(algorithm = self.name(), "byte source length unknown, returning sentinel digest");
            return self.digest().as_hex_string();
        }

        source.reset_to_start();
        if !source.is_available() {
            warn!(algorithm = self.name(), "byte source could not be rewound, returning sentinel digest");
            return self.digest().as_hex_string();
        }

        debug!(
            algorithm = self.name(),
            length,
            host = ?ByteOrder::HOST,
            "hashing byte source"
        );

        while source.has_more() {
            match source.next_byte() {
                Some(byte) => self.update(byte),
                None => break,
            }
        }

        if !source.is_available() {
            warn!(algorithm = self.name(), "byte source failed while reading, returning sentinel digest");
            self.reset();
            return self.digest().as_hex_string();
        }

        self.finalize(message_bits(length));
        source.reset_to_start();

        self.digest().as_hex_string()
    }
}

/// Message length in bits, keeping only the low 32 bits
pub(crate) fn message_bits(length: u64) -> u32 {
    length.wrapping_mul(8) as u32
}

#[cfg(test)]
mod tests {
    use super::{message_bits, Checksum};
    use crate::algorithm::Algorithm;
    use crate::source::{ByteSource, SliceSource};

    /// A source that reports a failure before anything is read
    struct FailedSource;

    impl ByteSource for FailedSource {
        fn is_available(&self) -> bool {
            false
        }

        fn has_more(&mut self) -> bool {
            panic!("a failed source must not be read")
        }

        fn next_byte(&mut self) -> Option<u8> {
            panic!("a failed source must not be read")
        }

        fn total_length(&mut self) -> u64 {
            panic!("a failed source must not be measured")
        }

        fn reset_to_start(&mut self) {}
    }

    /// A source that fails after handing out a few bytes
    struct BrokenSource {
        remaining: usize,
        failed: bool,
    }

    impl ByteSource for BrokenSource {
        fn is_available(&self) -> bool {
            !self.failed
        }

        fn has_more(&mut self) -> bool {
            !self.failed
        }

        fn next_byte(&mut self) -> Option<u8> {
            if self.remaining == 0 {
                self.failed = true;
                return None;
            }
            self.remaining -= 1;
            Some(b'x')
        }

        fn total_length(&mut self) -> u64 {
            100
        }

        fn reset_to_start(&mut self) {}
    }

    #[test]
    fn unavailable_source_gives_sentinel() {
        for algorithm in Algorithm::ALL {
            let mut hasher = algorithm.hasher();
            let result = hasher.calculate_hash_from_source(&mut FailedSource);

            assert_eq!(result, "0".repeat(algorithm.bits() as usize / 4));
            assert!(hasher.digest().is_sentinel());
        }
    }

    #[test]
    fn failure_mid_stream_gives_sentinel() {
        for algorithm in Algorithm::ALL {
            let mut hasher = algorithm.hasher();
            let mut source = BrokenSource {
                remaining: 10,
                failed: false,
            };
            hasher.calculate_hash_from_source(&mut source);

            assert!(hasher.digest().is_sentinel());
        }
    }

    #[test]
    fn source_and_slice_agree() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        for algorithm in Algorithm::ALL {
            for len in [0, 1, 55, 56, 63, 64, 65, 119, 120, 128, 1000] {
                let mut hasher = algorithm.hasher();
                let expected = hasher.calculate_hash(&data[..len]);

                let mut source = SliceSource::new(&data[..len]);
                let result = hasher.calculate_hash_from_source(&mut source);

                assert_eq!(result, expected, "{} over {} bytes", algorithm, len);
            }
        }
    }

    #[test]
    fn source_is_rewound_for_reuse() {
        let mut source = SliceSource::new(b"reuse me");
        let mut hasher = Algorithm::Sha256.hasher();

        let first = hasher.calculate_hash_from_source(&mut source);
        assert_eq!(source.position(), 0);

        let second = hasher.calculate_hash_from_source(&mut source);
        assert_eq!(first, second);
    }

    #[test]
    fn message_bits_keeps_low_word() {
        assert_eq!(message_bits(3), 24);
        assert_eq!(message_bits(1 << 29), 0);
        assert_eq!(message_bits((1 << 29) + 1), 8);
    }
}
