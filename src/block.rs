//! 512-bit block accumulation and Merkle-Damgard padding for MD5 and
//! SHA-256
//!
//! Both algorithms pad the same way: a single `0x80` byte, zeros until
//! the block holds 56 bytes, then an 8-byte message length in bits.
//! They differ only in the byte order of the length field.
//!
//! The length is carried as a `u32`.  Messages of 2^32 bits (512 MiB)
//! or more have their length truncated to the low 32 bits and will not
//! match other implementations.

/// Size of a message block in bytes
pub const BLOCK_SIZE: usize = 64;

/// Offset of the length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Byte order of the padding length field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthOrder {
    /// MD5: low-order byte first
    LittleEndian,
    /// SHA-256: high-order byte first
    BigEndian,
}

/// A partially filled 64-byte message block
#[derive(Clone, Debug)]
pub struct BlockBuffer {
    block: [u8; BLOCK_SIZE],
    len: usize,
}

impl Default for BlockBuffer {
    fn default() -> BlockBuffer {
        BlockBuffer {
            block: [0; BLOCK_SIZE],
            len: 0,
        }
    }
}

impl BlockBuffer {
    /// Discard any buffered bytes
    pub fn clear(&mut self) {
        self.block = [0; BLOCK_SIZE];
        self.len = 0;
    }

    /// Append one byte, calling `compress` when the block fills up
    pub fn push<F: FnMut(&[u8; BLOCK_SIZE])>(&mut self, byte: u8, mut compress: F) {
        self.block[self.len] = byte;
        self.len += 1;

        if self.len == BLOCK_SIZE {
            compress(&self.block);
            self.len = 0;
        }
    }

    /// Append a slice, compressing every block that fills up
    ///
    /// Whole blocks are handed to `compress` straight from `data`
    /// without being copied when nothing is buffered.
    pub fn extend<F: FnMut(&[u8; BLOCK_SIZE])>(&mut self, mut data: &[u8], mut compress: F) {
        if self.len > 0 {
            let take = (BLOCK_SIZE - self.len).min(data.len());
            self.block[self.len..self.len + take].copy_from_slice(&data[..take]);
            self.len += take;
            data = &data[take..];

            if self.len < BLOCK_SIZE {
                return;
            }
            compress(&self.block);
            self.len = 0;
        }

        let mut chunks = data.chunks_exact(BLOCK_SIZE);
        for chunk in &mut chunks {
            let mut block = [0; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            compress(&block);
        }

        let rest = chunks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.len = rest.len();
    }

    /// Pad the buffered bytes in place and compress the final block,
    /// or two blocks if the terminator and length don't fit
    ///
    /// `message_bits` is the total message length in bits.  The high
    /// 32 bits of the 64-bit length field are always zero.
    pub fn pad<F: FnMut(&[u8; BLOCK_SIZE])>(
        &mut self,
        message_bits: u32,
        order: LengthOrder,
        mut compress: F,
    ) {
        self.block[self.len] = 0x80;
        self.block[self.len + 1..].fill(0);

        if self.len >= LENGTH_OFFSET {
            compress(&self.block);
            self.block = [0; BLOCK_SIZE];
        }

        let length = match order {
            LengthOrder::LittleEndian => (message_bits as u64).to_le_bytes(),
            LengthOrder::BigEndian => (message_bits as u64).to_be_bytes(),
        };
        self.block[LENGTH_OFFSET..].copy_from_slice(&length);
        compress(&self.block);

        self.clear();
    }
}
