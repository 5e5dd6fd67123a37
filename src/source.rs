//! Sequential byte sources
//!
//! The engines read files through the small [`ByteSource`] capability
//! instead of owning file handles.  Two implementations are provided:
//! [`SliceSource`] over an in-memory buffer and [`ReaderSource`] over
//! anything that is `BufRead + Seek`, files included.
//!
//! # Examples
//!
//! ```
//! use gash::Checksum;
//! use gash::md5::Md5;
//! use gash::source::SliceSource;
//!
//! let mut source = SliceSource::new(b"abc");
//! let mut md5 = Md5::default();
//! let result = md5.calculate_hash_from_source(&mut source);
//! assert_eq!(result, "900150983cd24fb0d6963f7d28e17f72");
//! ```
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// A cursor over a sequence of bytes
pub trait ByteSource {
    /// False if the source can't be read, either because it was never
    /// opened or because an earlier operation failed
    fn is_available(&self) -> bool;

    /// True if at least one more byte can be read
    fn has_more(&mut self) -> bool;

    /// Read the next byte, advancing the cursor
    ///
    /// Returns `None` at the end of the data or on a read failure.
    fn next_byte(&mut self) -> Option<u8>;

    /// Total number of bytes in the source, independent of the cursor
    fn total_length(&mut self) -> u64;

    /// Move the cursor back to the first byte and clear any
    /// end-of-data or failure state
    fn reset_to_start(&mut self);
}

/// A byte source over a borrowed slice
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a new source positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> SliceSource<'a> {
        SliceSource { data, position: 0 }
    }

    /// The current cursor position
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn is_available(&self) -> bool {
        true
    }

    fn has_more(&mut self) -> bool {
        self.position < self.data.len()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }

    fn total_length(&mut self) -> u64 {
        self.data.len() as u64
    }

    fn reset_to_start(&mut self) {
        self.position = 0;
    }
}

/// A byte source over a buffered, seekable reader
///
/// Read and seek failures are sticky: once one occurs the source
/// reports itself unavailable until [`ByteSource::reset_to_start`]
/// succeeds.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    failed: bool,
}

impl ReaderSource<BufReader<File>> {
    /// Open a file for hashing
    ///
    /// Files are read as raw bytes, no newline or encoding translation
    /// happens.
    ///
    /// # Errors
    ///
    /// [`Error::Open`] if the file can't be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ReaderSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead + Seek> ReaderSource<R> {
    /// Wrap a reader.  The cursor is not moved.
    pub fn new(reader: R) -> ReaderSource<R> {
        ReaderSource {
            reader,
            failed: false,
        }
    }

    /// Give the reader back
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fail(&mut self, operation: &str, err: std::io::Error) {
        warn!(operation, error = %err, "byte source failed");
        self.failed = true;
    }
}

impl<R: BufRead + Seek> ByteSource for ReaderSource<R> {
    fn is_available(&self) -> bool {
        !self.failed
    }

    fn has_more(&mut self) -> bool {
        if self.failed {
            return false;
        }
        match self.reader.fill_buf() {
            Ok(buf) => !buf.is_empty(),
            Err(err) => {
                self.fail("peek", err);
                false
            }
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.failed {
            return None;
        }
        let byte = match self.reader.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(err) => {
                self.fail("read", err);
                return None;
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
        }
        byte
    }

    fn total_length(&mut self) -> u64 {
        let length = self.reader.stream_position().and_then(|position| {
            let end = self.reader.seek(SeekFrom::End(0))?;
            self.reader.seek(SeekFrom::Start(position))?;
            Ok(end)
        });

        match length {
            Ok(length) => length,
            Err(err) => {
                self.fail("length", err);
                0
            }
        }
    }

    fn reset_to_start(&mut self) {
        match self.reader.seek(SeekFrom::Start(0)) {
            Ok(_) => self.failed = false,
            Err(err) => self.fail("rewind", err),
        }
    }
}
