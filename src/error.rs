//! Error types
//!
//! Hashing itself never fails: an unusable byte source produces the
//! sentinel all-zero digest.  These errors cover the surrounding
//! operations, opening files, copying digests out and parsing
//! algorithm names.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the gash library
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened for hashing
    #[error("could not open file {path:?}")]
    Open {
        /// The path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Caller-provided storage can't hold every word of a digest
    #[error("digest has {needed} words but the output storage holds only {available}")]
    StorageTooSmall {
        /// Number of words in the digest
        needed: usize,
        /// Number of words the caller provided
        available: usize,
    },

    /// The algorithm name wasn't recognized
    #[error("unknown hash algorithm {0:?}, expected one of md5, sha256, crc32, adler32, elf")]
    UnknownAlgorithm(String),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
