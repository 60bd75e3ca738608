//! Additive checksums: the plain modular byte sum and the two Unix `sum`
//! flavours.

use super::{be_bytes, ChecksumEngine, ChecksumFunction};
use crate::params::{width_mask, Standard, SumParameters, SumStandard};

/// Sum of all bytes modulo 2^order
#[derive(Debug, Clone)]
pub struct SumCore {
    params: SumParameters,
    total: u64,
}

impl SumCore {
    /// Start a sum with `params`
    pub fn new(params: SumParameters) -> Self {
        Self { params, total: 0 }
    }
}

impl Default for SumCore {
    fn default() -> Self {
        Self::new(SumStandard::default().parameters())
    }
}

impl ChecksumFunction for SumCore {
    fn name(&self) -> String {
        self.params.to_string()
    }

    fn output_size(&self) -> usize {
        (self.params.order() / 8) as usize
    }

    fn reset(&mut self) {
        self.total = 0;
    }

    fn update(&mut self, data: &[u8]) {
        let mask = width_mask(self.params.order());
        self.total = data
            .iter()
            .fold(self.total, |acc, &b| acc.wrapping_add(u64::from(b)) & mask);
    }

    fn value(&self) -> Vec<u8> {
        be_bytes(self.total, self.output_size())
    }
}

/// BSD `sum`: 16-bit rotate-right then add
#[derive(Debug, Clone, Default)]
pub struct SumBsdCore {
    checksum: u16,
}

impl ChecksumFunction for SumBsdCore {
    fn name(&self) -> String {
        "Sum-BSD".to_string()
    }

    fn output_size(&self) -> usize {
        2
    }

    fn reset(&mut self) {
        self.checksum = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.checksum = self.checksum.rotate_right(1).wrapping_add(u16::from(byte));
        }
    }

    fn value(&self) -> Vec<u8> {
        self.checksum.to_be_bytes().to_vec()
    }
}

/// System V `sum`: 32-bit byte total folded to 16 bits
#[derive(Debug, Clone, Default)]
pub struct SumSysVCore {
    total: u32,
}

impl ChecksumFunction for SumSysVCore {
    fn name(&self) -> String {
        "Sum-SysV".to_string()
    }

    fn output_size(&self) -> usize {
        2
    }

    fn reset(&mut self) {
        self.total = 0;
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.total = self.total.wrapping_add(u32::from(byte));
        }
    }

    fn value(&self) -> Vec<u8> {
        let r = (self.total & 0xFFFF) + (self.total >> 16);
        let folded = (r & 0xFFFF) + (r >> 16);
        be_bytes(u64::from(folded), 2)
    }
}

/// Streaming modular sum
pub type Sum = ChecksumEngine<SumCore>;
/// Streaming BSD sum
pub type SumBsd = ChecksumEngine<SumBsdCore>;
/// Streaming System V sum
pub type SumSysV = ChecksumEngine<SumSysVCore>;

/// A modular sum running `params`
pub fn sum(params: SumParameters) -> Sum {
    ChecksumEngine::new(SumCore::new(params))
}
