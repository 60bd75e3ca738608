//! Fletcher checksums.
//!
//! Fletcher-8 sums nibbles modulo 15, Fletcher-16 sums bytes modulo 255 and
//! Fletcher-32 sums little-endian 16-bit words modulo 65535. An odd trailing
//! byte of a Fletcher-32 stream is held back until its partner arrives, or
//! zero-padded at finalization.

use super::{be_bytes, ChecksumEngine, ChecksumFunction};
use crate::params::{FletcherParameters, FletcherStandard, Standard};

/// Fletcher running sums
#[derive(Debug, Clone)]
pub struct FletcherCore {
    params: FletcherParameters,
    a: u64,
    b: u64,
    pending: Option<u8>,
}

impl FletcherCore {
    /// Start a Fletcher checksum with `params`
    pub fn new(params: FletcherParameters) -> Self {
        Self {
            params,
            a: 0,
            b: 0,
            pending: None,
        }
    }

    fn modulus(&self) -> u64 {
        match self.params.order() {
            8 => 15,
            16 => 255,
            _ => 65535,
        }
    }

    fn add(&mut self, value: u64) {
        let modulus = self.modulus();
        self.a = (self.a + value) % modulus;
        self.b = (self.b + self.a) % modulus;
    }
}

impl Default for FletcherCore {
    fn default() -> Self {
        Self::new(FletcherStandard::default().parameters())
    }
}

impl ChecksumFunction for FletcherCore {
    fn name(&self) -> String {
        self.params.to_string()
    }

    fn output_size(&self) -> usize {
        (self.params.order() / 8) as usize
    }

    fn reset(&mut self) {
        self.a = 0;
        self.b = 0;
        self.pending = None;
    }

    fn update(&mut self, data: &[u8]) {
        match self.params.order() {
            8 => {
                for &byte in data {
                    self.add(u64::from(byte >> 4));
                    self.add(u64::from(byte & 0x0F));
                }
            }
            16 => {
                for &byte in data {
                    self.add(u64::from(byte));
                }
            }
            _ => {
                for &byte in data {
                    match self.pending.take() {
                        Some(low) => self.add(u64::from(u16::from_le_bytes([low, byte]))),
                        None => self.pending = Some(byte),
                    }
                }
            }
        }
    }

    fn value(&self) -> Vec<u8> {
        let half = u64::from(self.params.order() / 2);
        let (mut a, mut b) = (self.a, self.b);
        if let Some(low) = self.pending {
            let modulus = self.modulus();
            a = (a + u64::from(low)) % modulus;
            b = (b + a) % modulus;
        }
        be_bytes((b << half) | a, self.output_size())
    }
}

/// Streaming Fletcher checksum
pub type Fletcher = ChecksumEngine<FletcherCore>;

/// A Fletcher checksum running `params`
pub fn fletcher(params: FletcherParameters) -> Fletcher {
    ChecksumEngine::new(FletcherCore::new(params))
}
