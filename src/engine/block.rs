//! Block buffering and Merkle-Damgard padding.
//!
//! [`BlockEngine`] owns everything that is common to compression-function
//! hashes: carrying a partial block across `update` calls, dispatching full
//! blocks to the compression function, counting the message length and
//! handing the tail to the function's padding rule.

use super::{Digest, StreamState};
use crate::error::Result;

/// A compression function with its chaining state.
pub trait BlockFunction: Clone + Send + 'static {
    /// Algorithm name
    fn name(&self) -> String;

    /// Bytes per block
    fn block_size(&self) -> usize;

    /// Digest size in bytes
    fn output_size(&self) -> usize;

    /// Restore the initial chaining values
    fn reset(&mut self);

    /// Absorb exactly one block
    fn transform(&mut self, block: &[u8]);

    /// Pad the trailing partial block (shorter than a block), absorb it and
    /// serialize the chaining state. `total_len` counts every message byte.
    fn finish(&mut self, tail: &[u8], total_len: u64) -> Vec<u8>;
}

/// Drives a [`BlockFunction`] over input of any chunking.
#[derive(Debug, Clone)]
pub struct BlockEngine<F: BlockFunction> {
    function: F,
    buffer: Vec<u8>,
    total_len: u64,
    state: StreamState,
}

impl<F: BlockFunction> BlockEngine<F> {
    /// Wrap a compression function
    pub fn new(function: F) -> Self {
        let capacity = function.block_size();
        Self {
            function,
            buffer: Vec::with_capacity(capacity),
            total_len: 0,
            state: StreamState::Ready,
        }
    }

    /// Bytes consumed since the last reset
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// The wrapped compression function
    pub fn function(&self) -> &F {
        &self.function
    }
}

impl<F: BlockFunction + Default> Default for BlockEngine<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: BlockFunction> Digest for BlockEngine<F> {
    fn name(&self) -> String {
        self.function.name()
    }

    fn block_size(&self) -> usize {
        self.function.block_size()
    }

    fn output_size(&self) -> usize {
        self.function.output_size()
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.begin(|| self.function.name())?;
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let block_size = self.function.block_size();
        let mut input = data;

        if !self.buffer.is_empty() {
            let take = (block_size - self.buffer.len()).min(input.len());
            self.buffer.extend_from_slice(&input[..take]);
            input = &input[take..];
            if self.buffer.len() < block_size {
                return Ok(());
            }
            self.function.transform(&self.buffer);
            self.buffer.clear();
        }

        let mut blocks = input.chunks_exact(block_size);
        for block in &mut blocks {
            self.function.transform(block);
        }
        self.buffer.extend_from_slice(blocks.remainder());
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.state.finish(|| self.function.name())?;
        let digest = self.function.finish(&self.buffer, self.total_len);
        self.buffer.clear();
        Ok(digest)
    }

    fn reset(&mut self) {
        self.function.reset();
        self.buffer.clear();
        self.total_len = 0;
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// Encoding of the message bit length appended by MD-strengthening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// 64-bit little-endian (MD4, MD5)
    Le64,
    /// 64-bit big-endian (SHA-0, SHA-1, SHA-224, SHA-256)
    Be64,
    /// 128-bit big-endian (SHA-384, SHA-512)
    Be128,
}

impl LengthField {
    /// Width of the length field in bytes
    pub fn width(self) -> usize {
        match self {
            LengthField::Le64 | LengthField::Be64 => 8,
            LengthField::Be128 => 16,
        }
    }
}

/// Build the final one or two blocks for `tail`: a 0x80 marker, zero fill
/// and the message length in bits.
pub fn md_padding(tail: &[u8], total_len: u64, block_size: usize, field: LengthField) -> Vec<u8> {
    let width = field.width();
    let padded_len = if tail.len() + 1 + width <= block_size {
        block_size
    } else {
        2 * block_size
    };

    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(tail);
    padded.push(0x80);
    padded.resize(padded_len - width, 0);

    let bits = u128::from(total_len) * 8;
    match field {
        LengthField::Le64 => padded.extend_from_slice(&(bits as u64).to_le_bytes()),
        LengthField::Be64 => padded.extend_from_slice(&(bits as u64).to_be_bytes()),
        LengthField::Be128 => padded.extend_from_slice(&bits.to_be_bytes()),
    }
    padded
}
