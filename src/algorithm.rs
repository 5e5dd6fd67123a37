//! Choosing an algorithm at runtime
//!
//! [`Algorithm`] names one of the five algorithms and [`Hasher`] holds
//! an engine for it, so callers that pick the algorithm from user input
//! can drive any of them through the same [`Checksum`] calls.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::algorithm::Algorithm;
//!
//! let algorithm: Algorithm = "crc32".parse().unwrap();
//! let mut hasher = algorithm.hasher();
//! assert_eq!(hasher.calculate_hash(b"123456789"), "cbf43926");
//!
//! // No selector means MD5
//! assert_eq!(Algorithm::default(), Algorithm::Md5);
//! ```
use core::fmt::{Display, Formatter};
use core::str::FromStr;

use crate::adler32::Adler32;
use crate::crc32::Crc32;
use crate::digest::Digest;
use crate::elf::Elf;
use crate::error::Error;
use crate::md5::Md5;
use crate::sha256::Sha256;
use crate::Checksum;

/// The supported digest and checksum algorithms
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD5, 128 bits
    #[default]
    Md5,
    /// SHA-256, 256 bits
    Sha256,
    /// CRC-32, 32 bits
    Crc32,
    /// Adler-32, 32 bits
    Adler32,
    /// ELF hash, 32 bits
    Elf,
}

impl Algorithm {
    /// Every algorithm, in selector order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Md5,
        Algorithm::Sha256,
        Algorithm::Crc32,
        Algorithm::Adler32,
        Algorithm::Elf,
    ];

    /// The short selector name accepted by [`FromStr`]
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Crc32 => "crc32",
            Algorithm::Adler32 => "adler32",
            Algorithm::Elf => "elf",
        }
    }

    /// Width of the digest in bits
    pub fn bits(self) -> u32 {
        match self {
            Algorithm::Md5 => 128,
            Algorithm::Sha256 => 256,
            Algorithm::Crc32 | Algorithm::Adler32 | Algorithm::Elf => 32,
        }
    }

    /// Create a fresh engine for this algorithm
    pub fn hasher(self) -> Hasher {
        match self {
            Algorithm::Md5 => Hasher::Md5(Md5::default()),
            Algorithm::Sha256 => Hasher::Sha256(Sha256::default()),
            Algorithm::Crc32 => Hasher::Crc32(Crc32::default()),
            Algorithm::Adler32 => Hasher::Adler32(Adler32::default()),
            Algorithm::Elf => Hasher::Elf(Elf::default()),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Crc32 => "CRC-32",
            Algorithm::Adler32 => "Adler-32",
            Algorithm::Elf => "ELF",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse a selector such as `sha256`, `SHA256` or `-sha256`
    fn from_str(s: &str) -> Result<Algorithm, Error> {
        let wanted = s.strip_prefix('-').unwrap_or(s);

        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

/// An engine for one of the supported algorithms
#[derive(Clone, Debug, PartialEq)]
pub enum Hasher {
    /// An MD5 engine
    Md5(Md5),
    /// A SHA-256 engine
    Sha256(Sha256),
    /// A CRC-32 engine
    Crc32(Crc32),
    /// An Adler-32 engine
    Adler32(Adler32),
    /// An ELF hash engine
    Elf(Elf),
}

impl Hasher {
    /// The algorithm this engine implements
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Hasher::Md5(_) => Algorithm::Md5,
            Hasher::Sha256(_) => Algorithm::Sha256,
            Hasher::Crc32(_) => Algorithm::Crc32,
            Hasher::Adler32(_) => Algorithm::Adler32,
            Hasher::Elf(_) => Algorithm::Elf,
        }
    }

    fn engine(&self) -> &dyn Checksum {
        match self {
            Hasher::Md5(engine) => engine,
            Hasher::Sha256(engine) => engine,
            Hasher::Crc32(engine) => engine,
            Hasher::Adler32(engine) => engine,
            Hasher::Elf(engine) => engine,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn Checksum {
        match self {
            Hasher::Md5(engine) => engine,
            Hasher::Sha256(engine) => engine,
            Hasher::Crc32(engine) => engine,
            Hasher::Adler32(engine) => engine,
            Hasher::Elf(engine) => engine,
        }
    }
}

impl Display for Hasher {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.digest())
    }
}

impl Checksum for Hasher {
    fn name(&self) -> &'static str {
        self.engine().name()
    }

    fn reset(&mut self) {
        self.engine_mut().reset()
    }

    fn update(&mut self, byte: u8) {
        self.engine_mut().update(byte)
    }

    fn update_slice(&mut self, data: &[u8]) {
        self.engine_mut().update_slice(data)
    }

    fn finalize(&mut self, message_bits: u32) {
        self.engine_mut().finalize(message_bits)
    }

    fn digest(&self) -> &Digest {
        self.engine().digest()
    }
}

#[cfg(test)]
mod tests {
    use super::Algorithm;
    use crate::error::Error;
    use crate::Checksum;

    #[test]
    fn parse_selectors() {
        assert_eq!("md5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
        assert_eq!("-sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
        assert_eq!("CRC32".parse::<Algorithm>().unwrap(), Algorithm::Crc32);
        assert_eq!("adler32".parse::<Algorithm>().unwrap(), Algorithm::Adler32);
        assert_eq!("elf".parse::<Algorithm>().unwrap(), Algorithm::Elf);

        match "sha1".parse::<Algorithm>() {
            Err(Error::UnknownAlgorithm(name)) => assert_eq!(name, "sha1"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn id_round_trips() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.hasher().algorithm(), algorithm);
        }
    }

    #[test]
    fn hex_length_is_fixed_per_algorithm() {
        for algorithm in Algorithm::ALL {
            let mut hasher = algorithm.hasher();
            for len in [0, 3, 64, 1000] {
                let data = vec![0xA5; len];
                let result = hasher.calculate_hash(&data);
                assert_eq!(result.len(), algorithm.bits() as usize / 4);
                assert_eq!(hasher.digest().word_count() * 8, result.len());
            }
        }
    }

    #[test]
    fn known_vectors_through_dispatch() {
        let test_vectors = [
            (Algorithm::Md5, "", "d41d8cd98f00b204e9800998ecf8427e"),
            (Algorithm::Md5, "abc", "900150983cd24fb0d6963f7d28e17f72"),
            (
                Algorithm::Sha256,
                "abc",
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
            (Algorithm::Crc32, "123456789", "cbf43926"),
            (Algorithm::Crc32, "", "00000000"),
            (Algorithm::Adler32, "", "00000001"),
            (Algorithm::Elf, "abc", "00006783"),
        ];

        for (algorithm, input, expected) in test_vectors {
            let mut hasher = algorithm.hasher();
            assert_eq!(hasher.calculate_hash(input.as_bytes()), expected, "{}", algorithm);
            assert_eq!(hasher.to_string(), expected);
        }
    }

    #[test]
    fn independent_instances_agree() {
        let data = b"determinism";
        for algorithm in Algorithm::ALL {
            let mut first = algorithm.hasher();
            let mut second = algorithm.hasher();
            assert_eq!(first.calculate_hash(data), second.calculate_hash(data));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn names_are_human_readable() {
        assert_eq!(Algorithm::Sha256.to_string(), "SHA-256");
        assert_eq!(Algorithm::Adler32.hasher().name(), "Adler-32");
    }
}
