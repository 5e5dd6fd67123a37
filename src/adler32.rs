//! Adler-32 checksums
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::adler32::Adler32;
//!
//! let string = "It's a tiny change to the code and not completely disgusting. - Bob Manchek";
//! let data = string.as_bytes();
//! let mut adler32 = Adler32::default();
//! let result = adler32.calculate_hash(data);
//! assert_eq!(result, "e4801a6a");
//! ```
use core::default::Default;
use core::fmt::{Display, Formatter};

use crate::digest::Digest;
use crate::Checksum;

/// The largest prime smaller than 2^16
pub const MOD_ADLER: u32 = 65521;

/// The data structure used for the Adler-32 checksums
/// Stores state and the last finalized digest
#[derive(Clone, Debug)]
pub struct Adler32 {
    /// Adler-32 checksum state, the running byte sum
    a: u32,
    /// Adler-32 checksum state, the running sum of `a`
    b: u32,

    digest: Digest,
}

impl Default for Adler32 {
    fn default() -> Adler32 {
        Adler32 {
            a: 1,
            b: 0,
            digest: Digest::new(32),
        }
    }
}

impl PartialEq for Adler32 {
    fn eq(&self, other: &Adler32) -> bool {
        self.digest == other.digest
    }
}

impl Display for Adler32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

impl Adler32 {
    /// Create an Adler-32 holding the checksum of `data`
    pub fn from_bytes(data: &[u8]) -> Adler32 {
        let mut adler32 = Adler32::default();
        adler32.calculate_hash(data);
        adler32
    }

    /// The running checksum, valid after any number of updates
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::Checksum;
    /// use gash::adler32::Adler32;
    ///
    /// let mut adler32 = Adler32::default();
    /// adler32.update(b'a');
    /// assert_eq!(adler32.state(), 0x00620062);
    /// adler32.update(b'b');
    /// assert_eq!(adler32.state(), 0x012600c4);
    /// ```
    pub fn state(&self) -> u32 {
        (self.b << 16) | self.a
    }

    /// The finalized checksum as an integer
    pub fn value(&self) -> u32 {
        self.digest.words()[0]
    }
}

impl Checksum for Adler32 {
    fn name(&self) -> &'static str {
        "Adler-32"
    }

    fn reset(&mut self) {
        self.a = 1;
        self.b = 0;
        self.digest.clear();
    }

    /// From Wikipedia
    /// The formula used is:
    /// `A = 1 + data[0] + data[1] + ... + data[n] (mod 65521)`
    /// `B = A_1 + A_2 + ... + A_n (mod 65521)`
    fn update(&mut self, byte: u8) {
        self.a = (self.a + (byte as u32)) % MOD_ADLER;
        self.b = (self.b + self.a) % MOD_ADLER;
    }

    fn finalize(&mut self, _message_bits: u32) {
        self.digest.words_mut()[0] = self.state();
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }
}
