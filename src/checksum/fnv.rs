//! Fowler-Noll-Vo hashes

use super::{be_bytes, ChecksumEngine, ChecksumFunction};
use crate::params::{width_mask, FnvParameters, FnvStandard, FnvVariant, Standard};

/// FNV accumulator
#[derive(Debug, Clone)]
pub struct FnvCore {
    params: FnvParameters,
    hash: u64,
}

impl FnvCore {
    /// Start an FNV hash with `params`
    pub fn new(params: FnvParameters) -> Self {
        Self {
            params,
            hash: params.offset_basis(),
        }
    }
}

impl Default for FnvCore {
    fn default() -> Self {
        Self::new(FnvStandard::default().parameters())
    }
}

impl ChecksumFunction for FnvCore {
    fn name(&self) -> String {
        let kind = match self.params.variant() {
            FnvVariant::Fnv1 if self.params.offset_basis() == 0 => "0",
            FnvVariant::Fnv1 => "1",
            FnvVariant::Fnv1a => "1A",
        };
        format!("FNV-{}-{}", kind, self.params.order())
    }

    fn output_size(&self) -> usize {
        (self.params.order() / 8) as usize
    }

    fn reset(&mut self) {
        self.hash = self.params.offset_basis();
    }

    fn update(&mut self, data: &[u8]) {
        let mask = width_mask(self.params.order());
        let prime = self.params.prime();
        let mut hash = self.hash;
        match self.params.variant() {
            FnvVariant::Fnv1 => {
                for &byte in data {
                    hash = (hash.wrapping_mul(prime) & mask) ^ u64::from(byte);
                }
            }
            FnvVariant::Fnv1a => {
                for &byte in data {
                    hash = (hash ^ u64::from(byte)).wrapping_mul(prime) & mask;
                }
            }
        }
        self.hash = hash;
    }

    fn value(&self) -> Vec<u8> {
        be_bytes(self.hash, self.output_size())
    }
}

/// Streaming FNV
pub type Fnv = ChecksumEngine<FnvCore>;

/// An FNV hash running `params`
pub fn fnv(params: FnvParameters) -> Fnv {
    ChecksumEngine::new(FnvCore::new(params))
}
