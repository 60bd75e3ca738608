use super::{ChecksumEngine, ChecksumFunction};
use crate::params::{GHashParameters, GHashStandard, Standard};

/// Shift-and-add string hash, `h = (h << shift) + h + byte`
#[derive(Debug, Clone)]
pub struct GHashCore {
    params: GHashParameters,
    hash: u32,
}

impl GHashCore {
    /// Start a GHash with `params`
    pub fn new(params: GHashParameters) -> Self {
        Self { params, hash: 0 }
    }
}

impl Default for GHashCore {
    fn default() -> Self {
        Self::new(GHashStandard::default().parameters())
    }
}

impl ChecksumFunction for GHashCore {
    fn name(&self) -> String {
        self.params.to_string()
    }

    fn output_size(&self) -> usize {
        4
    }

    fn reset(&mut self) {
        self.hash = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let shift = self.params.shift();
        for &byte in data {
            self.hash = (self.hash << shift)
                .wrapping_add(self.hash)
                .wrapping_add(u32::from(byte));
        }
    }

    fn value(&self) -> Vec<u8> {
        self.hash.to_be_bytes().to_vec()
    }
}

/// Streaming GHash
pub type GHash = ChecksumEngine<GHashCore>;

/// A GHash running `params`
pub fn ghash(params: GHashParameters) -> GHash {
    ChecksumEngine::new(GHashCore::new(params))
}
