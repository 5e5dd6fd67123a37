//! CRC-32 checksums
//!
//! This is the reflected, table-driven CRC-32 used by zlib, PNG and
//! Ethernet (CRC-32/ISO-HDLC): polynomial 0x04C11DB7 processed
//! least-significant bit first, which is 0xEDB88320 in reflected form,
//! an initial value of all ones and a final complement.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::crc32::Crc32;
//!
//! let mut crc32 = Crc32::default();
//! let result = crc32.calculate_hash(b"123456789");
//! assert_eq!(result, "cbf43926");
//! assert_eq!(crc32.value(), 0xCBF43926);
//! ```
use core::default::Default;
use core::fmt::{Debug, Error, Formatter};

use crate::digest::Digest;
use crate::Checksum;

/// The CRC-32 polynomial in reflected (LSB first) form
pub const POLYNOMIAL: u32 = 0xEDB88320;

/// Initial register value, also XORed into the final value
const INITIAL: u32 = 0xFFFFFFFF;

/// Compute one table entry: the register after shifting `index`
/// through eight rounds of polynomial division
pub const fn table_entry(index: u8) -> u32 {
    let mut crc = index as u32;
    let mut bit = 0;
    while bit < 8 {
        if crc & 1 != 0 {
            crc = (crc >> 1) ^ POLYNOMIAL;
        } else {
            crc >>= 1;
        }
        bit += 1;
    }
    crc
}

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = table_entry(i as u8);
        i += 1;
    }
    table
}

/// The byte-at-a-time lookup table, built at compile time and shared
/// by every [`Crc32`]
pub static TABLE: [u32; 256] = build_table();

/// The data structure used for CRC-32 checksums
#[derive(Clone)]
pub struct Crc32 {
    /// The pre-computed values to speed up computing the CRC
    table: &'static [u32; 256],

    /// state of the CRC for rolling checksums
    crc: u32,

    digest: Digest,
}

impl Debug for Crc32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "crc: 0x{:08X}, digest: {}", self.crc, self.digest)?;

        writeln!(f, "table:")?;
        for (i, &entry) in self.table.iter().enumerate() {
            write!(f, "0x{:08X}, ", entry)?;
            if ((i + 1) % 8) == 0 {
                writeln!(f)?;
            }
        }
        writeln!(f)
    }
}

impl Default for Crc32 {
    fn default() -> Crc32 {
        Crc32 {
            table: &TABLE,
            crc: INITIAL,
            digest: Digest::new(32),
        }
    }
}

impl PartialEq for Crc32 {
    fn eq(&self, other: &Crc32) -> bool {
        self.digest == other.digest
    }
}

impl Crc32 {
    /// Create a CRC-32 holding the checksum of `data`
    ///
    /// # Examples
    ///
    /// ```
    /// use gash::crc32::Crc32;
    ///
    /// assert_eq!(Crc32::from_bytes(b"").to_string(), "00000000");
    /// assert_eq!(Crc32::from_bytes(b"123456789"), Crc32::from_bytes(b"123456789"));
    /// ```
    pub fn from_bytes(data: &[u8]) -> Crc32 {
        let mut crc32 = Crc32::default();
        crc32.calculate_hash(data);
        crc32
    }

    /// Get the current, unfinalized state of the CRC register
    pub fn state(&self) -> u32 {
        self.crc
    }

    /// The finalized checksum as an integer
    pub fn value(&self) -> u32 {
        self.digest.words()[0]
    }
}

impl core::fmt::Display for Crc32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest)
    }
}

impl Checksum for Crc32 {
    fn name(&self) -> &'static str {
        "CRC-32"
    }

    fn reset(&mut self) {
        self.crc = INITIAL;
        self.digest.clear();
    }

    fn update(&mut self, byte: u8) {
        let index = (self.crc ^ (byte as u32)) & 0xFF;
        self.crc = (self.crc >> 8) ^ self.table[index as usize];
    }

    fn finalize(&mut self, _message_bits: u32) {
        self.digest.words_mut()[0] = !self.crc;
    }

    fn digest(&self) -> &Digest {
        &self.digest
    }
}

#[cfg(test)]
mod tests {
    use super::{table_entry, Crc32, POLYNOMIAL, TABLE};
    use crate::Checksum;

    /// The standard check value for CRC-32/ISO-HDLC
    #[test]
    fn check_value_works() {
        let mut crc32 = Crc32::default();

        let result = crc32.calculate_hash(b"123456789");
        assert_eq!(result, "cbf43926");
    }

    #[test]
    fn empty_input_is_zero() {
        let mut crc32 = Crc32::default();

        assert_eq!(crc32.calculate_hash(b""), "00000000");
        assert!(crc32.digest().is_sentinel());
    }

    /// Verified against Python 3 zlib.crc32
    #[test]
    fn test_python3_zlib_result() {
        let mut crc32 = Crc32::default();

        let result =
            crc32.calculate_hash(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(result, "414fa339");
        assert_eq!(crc32.value(), 0x414FA339);
    }

    #[test]
    fn table_known_entries() {
        assert_eq!(TABLE[0], 0);
        assert_eq!(TABLE[1], 0x77073096);
        assert_eq!(TABLE[128], POLYNOMIAL);
        assert_eq!(TABLE[255], 0x2D02EF8D);
    }

    /// Each table entry is the remainder of the index's polynomial
    /// division, so the table is linear over XOR and every entry is
    /// distinct
    #[test]
    fn table_is_linear_and_bijective() {
        for a in 0..=255u8 {
            assert_eq!(TABLE[a as usize], table_entry(a));
            for b in 0..=255u8 {
                assert_eq!(TABLE[(a ^ b) as usize], TABLE[a as usize] ^ TABLE[b as usize]);
            }
        }

        let mut sorted = TABLE.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 256);
    }

    #[test]
    fn rolling_update_matches_compute() {
        let data = b"123456789";
        let mut crc32 = Crc32::default();

        crc32.reset();
        for &byte in data.iter() {
            crc32.update(byte);
        }
        assert_eq!(crc32.state(), !0xCBF43926);

        crc32.finalize(0);
        assert_eq!(crc32.value(), 0xCBF43926);
    }

    #[test]
    fn second_call_has_no_residue() {
        let mut crc32 = Crc32::default();

        crc32.calculate_hash(b"something else entirely");
        assert_eq!(crc32.calculate_hash(b"123456789"), "cbf43926");
    }
}
