//! Byte-oriented counterpart to the block engine.

use crate::engine::{Digest, StreamState};
use crate::error::Result;

/// A checksum that folds input one byte (or one small word) at a time.
pub trait ChecksumFunction: Clone + Send + 'static {
    /// Algorithm name
    fn name(&self) -> String;

    /// Checksum size in bytes
    fn output_size(&self) -> usize;

    /// Restore the initial accumulator
    fn reset(&mut self);

    /// Fold more input into the accumulator
    fn update(&mut self, data: &[u8]);

    /// Serialize the accumulator, big-endian
    fn value(&self) -> Vec<u8>;
}

/// Drives a [`ChecksumFunction`] through the [`Digest`] lifecycle.
#[derive(Debug, Clone)]
pub struct ChecksumEngine<F: ChecksumFunction> {
    function: F,
    state: StreamState,
}

impl<F: ChecksumFunction> ChecksumEngine<F> {
    /// Wrap a checksum function
    pub fn new(function: F) -> Self {
        Self {
            function,
            state: StreamState::Ready,
        }
    }

    /// The wrapped checksum function
    pub fn function(&self) -> &F {
        &self.function
    }
}

impl<F: ChecksumFunction + Default> Default for ChecksumEngine<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: ChecksumFunction> Digest for ChecksumEngine<F> {
    fn name(&self) -> String {
        self.function.name()
    }

    fn block_size(&self) -> usize {
        1
    }

    fn output_size(&self) -> usize {
        self.function.output_size()
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.begin(|| self.function.name())?;
        self.function.update(data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.state.finish(|| self.function.name())?;
        Ok(self.function.value())
    }

    fn reset(&mut self) {
        self.function.reset();
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// The low `bytes` bytes of `value`, most significant first
pub(crate) fn be_bytes(value: u64, bytes: usize) -> Vec<u8> {
    value.to_be_bytes()[8 - bytes..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_be_bytes() {
        assert_eq!(be_bytes(0x1234_5678, 4), vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(be_bytes(0xABCDEF, 3), vec![0xAB, 0xCD, 0xEF]);
        assert_eq!(be_bytes(0x1FF, 1), vec![0xFF]);
        assert_eq!(be_bytes(u64::MAX, 8), vec![0xFF; 8]);
    }
}
