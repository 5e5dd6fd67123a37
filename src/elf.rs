//! ELF checksums
//!
//! The rolling hash from the System V ABI used for ELF symbol hash
//! tables (`elf_hash`), applied to an arbitrary byte stream.  Bytes are
//! taken as unsigned values.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::elf::Elf;
//!
//! let mut elf = Elf::default();
//! assert_eq!(elf.calculate_hash(b""), "00000000");
//! assert_eq!(elf.calculate_hash(b"abc"), "00006783");
//! ```
use core::default::Default;
use core::fmt::{Display, Formatter};

use crate::digest::Digest;
use crate::Checksum;

/// Bits 28 through 31 of the accumulator
const HIGH_NIBBLE: u32 = 0xF0000000;

/// The data structure used for ELF checksums
#[derive(Clone, Debug)]
pub struct Elf {
    hash: u32,
    digest: Digest,
}

impl Default for Elf {
    fn default() -> Elf {
        Elf {
            hash: 0,
            digest: Digest::new(32),
        }
    }
}

impl PartialEq for Elf {
    fn eq(&self, other: &Elf) -> bool {
        self.digest == other.digest
    }
}

impl Display for Elf {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

impl Elf {
    /// Create an ELF checksum holding the checksum of `data`
    pub fn from_bytes(data: &[u8]) -> Elf {
        let mut elf = Elf::default();
        elf.calculate_hash(data);
        elf
    }

    /// The running checksum
    pub fn state(&self) -> u32 {
        self.hash
    }

    /// The finalized checksum as an integer
    pub fn value(&self) -> u32 {
        self.digest.words()[0]
    }
}

impl Checksum for Elf {
    fn name(&self) -> &'static str {
        "ELF"
    }

    fn reset(&mut self) {
        self.hash = 0;
        self.digest.clear();
    }

    fn update(&mut self, byte: u8) {
        self.hash = (self.hash << 4).wrapping_add(byte as u32);

        let high = self.hash & HIGH_NIBBLE;
        if high != 0 {
            self.hash ^= high >> 24;
        }
        self.hash &= !high;
    }

    fn finalize(&mut self, _message_bits: u32) {
        self.digest.words_mut()[0] = self.hash;
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }
}
