//! RustCrypto digests adapted onto the crate's [`Digest`] interface.

use crate::engine::{Digest, StreamState};
use crate::error::{HashError, Result};
use crate::params::TigerParameters;
use digest::core_api::BlockSizeUser;

/// Wraps any RustCrypto hasher, optionally truncating its output.
#[derive(Debug, Clone)]
pub struct External<D> {
    name: String,
    inner: D,
    output_size: usize,
    state: StreamState,
}

impl<D> External<D>
where
    D: digest::Digest + BlockSizeUser + Clone + Send + 'static,
{
    /// Adapt `D` with its full output length
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: D::new(),
            output_size: <D as digest::Digest>::output_size(),
            state: StreamState::Ready,
        }
    }

    /// Adapt `D`, keeping only the first `output_size` bytes of each digest
    pub fn truncated(name: impl Into<String>, output_size: usize) -> Result<Self> {
        let native = <D as digest::Digest>::output_size();
        if output_size == 0 || output_size > native {
            return Err(HashError::validation(format!(
                "truncated length {output_size} must be between 1 and {native} bytes"
            )));
        }
        Ok(Self::with_output_size(name, output_size))
    }

    fn with_output_size(name: impl Into<String>, output_size: usize) -> Self {
        let mut adapted = Self::new(name);
        adapted.output_size = output_size;
        adapted
    }
}

impl<D> Digest for External<D>
where
    D: digest::Digest + BlockSizeUser + Clone + Send + 'static,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn block_size(&self) -> usize {
        <D as BlockSizeUser>::block_size()
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        self.state.begin(|| self.name.clone())?;
        digest::Digest::update(&mut self.inner, data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.state.finish(|| self.name.clone())?;
        let finished = std::mem::replace(&mut self.inner, D::new());
        let mut out = digest::Digest::finalize(finished).to_vec();
        out.truncate(self.output_size);
        Ok(out)
    }

    fn reset(&mut self) {
        self.inner = D::new();
        self.state = StreamState::Ready;
    }

    fn box_clone(&self) -> Box<dyn Digest> {
        Box::new(self.clone())
    }
}

/// Tiger or Tiger2 at the configured length
pub fn tiger(params: TigerParameters) -> Box<dyn Digest> {
    let name = params.to_string();
    let size = params.length() as usize / 8;
    // TigerParameters only admits prefixes of the 192-bit digest
    match params.version() {
        1 => Box::new(External::<tiger::Tiger>::with_output_size(name, size)),
        _ => Box::new(External::<tiger::Tiger2>::with_output_size(name, size)),
    }
}

/// Whirlpool (ISO/IEC 10118-3)
pub fn whirlpool() -> External<whirlpool::Whirlpool> {
    External::new("Whirlpool")
}

/// RIPEMD-128
pub fn ripemd128() -> External<ripemd::Ripemd128> {
    External::new("RIPEMD-128")
}

/// RIPEMD-160
pub fn ripemd160() -> External<ripemd::Ripemd160> {
    External::new("RIPEMD-160")
}

/// RIPEMD-256
pub fn ripemd256() -> External<ripemd::Ripemd256> {
    External::new("RIPEMD-256")
}

/// RIPEMD-320
pub fn ripemd320() -> External<ripemd::Ripemd320> {
    External::new("RIPEMD-320")
}
