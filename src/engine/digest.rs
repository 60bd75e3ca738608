//! The common digest interface and the computation lifecycle it enforces.

use crate::error::{checked_range, HashError, Result};
use std::fmt;

/// Lifecycle of a single digest computation.
///
/// A computation starts `Ready`, becomes `Streaming` on the first update and
/// `Finished` once finalized. Only `reset` leaves `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// No input has been delivered since construction or reset
    #[default]
    Ready,
    /// At least one update has been delivered
    Streaming,
    /// The digest has been produced
    Finished,
}

impl StreamState {
    /// Record an update, failing if the computation was already finalized.
    pub fn begin(&mut self, algorithm: impl FnOnce() -> String) -> Result<()> {
        if *self == StreamState::Finished {
            let algorithm = algorithm();
            tracing::debug!(%algorithm, "update rejected after finalize");
            return Err(HashError::state_violation(format!(
                "{algorithm}: update after finalize, reset the computation first"
            )));
        }
        *self = StreamState::Streaming;
        Ok(())
    }

    /// Record finalization, failing if it already happened.
    pub fn finish(&mut self, algorithm: impl FnOnce() -> String) -> Result<()> {
        if *self == StreamState::Finished {
            let algorithm = algorithm();
            tracing::debug!(%algorithm, "finalize rejected, already finalized");
            return Err(HashError::state_violation(format!(
                "{algorithm}: computation already finalized"
            )));
        }
        *self = StreamState::Finished;
        Ok(())
    }

    /// True once input has been delivered and the digest is not yet produced
    pub fn is_streaming(&self) -> bool {
        *self == StreamState::Streaming
    }
}

/// A streaming digest computation.
///
/// Implementations accept input in chunks of any size; the chunking never
/// affects the result. After [`Digest::finalize`] the computation rejects
/// further input until [`Digest::reset`] is called.
pub trait Digest: Send {
    /// Algorithm name, e.g. `"MD5"` or `"CRC-32"`
    fn name(&self) -> String;

    /// Size in bytes of the blocks the algorithm consumes (1 for byte-wise checksums)
    fn block_size(&self) -> usize;

    /// Size of the produced digest in bytes
    fn output_size(&self) -> usize;

    /// Feed more input
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Produce the digest and close the computation
    fn finalize(&mut self) -> Result<Vec<u8>>;

    /// Discard all state and return to the initial configuration
    fn reset(&mut self);

    /// Clone this computation, including any buffered state
    fn box_clone(&self) -> Box<dyn Digest>;

    /// A new computation of the same algorithm and parameters, in its initial state
    fn fresh(&self) -> Box<dyn Digest> {
        let mut digest = self.box_clone();
        digest.reset();
        digest
    }

    /// Digest size in bits
    fn output_bits(&self) -> usize {
        self.output_size() * 8
    }

    /// Feed `len` bytes of `data` starting at `offset`
    fn update_range(&mut self, data: &[u8], offset: usize, len: usize) -> Result<()> {
        let slice = checked_range(data, offset, len)?;
        self.update(slice)
    }

    /// Feed a final range of input and produce the digest
    fn finalize_with(&mut self, data: &[u8], offset: usize, len: usize) -> Result<Vec<u8>> {
        self.update_range(data, offset, len)?;
        self.finalize()
    }

    /// One-shot: reset, hash `data` and finalize
    fn compute(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        self.update(data)?;
        self.finalize()
    }
}

impl Clone for Box<dyn Digest> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl fmt::Debug for dyn Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digest")
            .field("name", &self.name())
            .field("output_size", &self.output_size())
            .finish()
    }
}
