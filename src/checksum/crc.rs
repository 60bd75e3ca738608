//! Table-driven CRC of any byte-multiple width up to 64 bits.

use super::{be_bytes, ChecksumEngine, ChecksumFunction};
use crate::params::{CrcParameters, CrcStandard, Standard};
use std::sync::Arc;

/// Reverse the low `width` bits of `value`
pub fn reflect_bits(value: u64, width: u32) -> u64 {
    value.reverse_bits() >> (64 - width)
}

fn build_table(params: &CrcParameters) -> [u64; 256] {
    let order = params.order();
    let mask = params.mask();
    let mut table = [0u64; 256];

    if params.reflect_in() {
        let poly = reflect_bits(params.polynomial(), order);
        for (i, slot) in table.iter_mut().enumerate() {
            let mut crc = i as u64;
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
            }
            *slot = crc;
        }
    } else {
        let top = 1u64 << (order - 1);
        for (i, slot) in table.iter_mut().enumerate() {
            let mut crc = (i as u64) << (order - 8);
            for _ in 0..8 {
                crc = if crc & top != 0 {
                    (crc << 1) ^ params.polynomial()
                } else {
                    crc << 1
                };
            }
            *slot = crc & mask;
        }
    }
    table
}

/// CRC register and lookup table
#[derive(Debug, Clone)]
pub struct CrcCore {
    name: String,
    params: CrcParameters,
    table: Arc<[u64; 256]>,
    register: u64,
}

impl CrcCore {
    /// Build the lookup table for `params`
    pub fn new(params: CrcParameters) -> Self {
        let table = Arc::new(build_table(&params));
        let name = CrcStandard::ALL
            .iter()
            .find(|s| !s.is_alias() && s.parameters() == params)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| format!("CRC-{}", params.order()));
        let mut core = Self {
            name,
            params,
            table,
            register: 0,
        };
        core.reset();
        core
    }

    /// The configuration this CRC runs
    pub fn parameters(&self) -> &CrcParameters {
        &self.params
    }

    /// The current checksum as an integer
    pub fn checksum(&self) -> u64 {
        let order = self.params.order();
        let value = if self.params.reflect_in() != self.params.reflect_out() {
            reflect_bits(self.register, order)
        } else {
            self.register
        };
        (value ^ self.params.xor_out()) & self.params.mask()
    }
}

impl Default for CrcCore {
    fn default() -> Self {
        Self::new(CrcStandard::default().parameters())
    }
}

impl ChecksumFunction for CrcCore {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn output_size(&self) -> usize {
        (self.params.order() / 8) as usize
    }

    fn reset(&mut self) {
        self.register = if self.params.reflect_in() {
            reflect_bits(self.params.initial(), self.params.order())
        } else {
            self.params.initial()
        };
    }

    fn update(&mut self, data: &[u8]) {
        let mask = self.params.mask();
        if self.params.reflect_in() {
            for &byte in data {
                let index = ((self.register ^ u64::from(byte)) & 0xFF) as usize;
                self.register = (self.register >> 8) ^ self.table[index];
            }
        } else {
            let shift = self.params.order() - 8;
            for &byte in data {
                let index = (((self.register >> shift) ^ u64::from(byte)) & 0xFF) as usize;
                self.register = ((self.register << 8) ^ self.table[index]) & mask;
            }
        }
    }

    fn value(&self) -> Vec<u8> {
        be_bytes(self.checksum(), self.output_size())
    }
}

/// Streaming CRC
pub type Crc = ChecksumEngine<CrcCore>;

/// A CRC running `params`
pub fn crc(params: CrcParameters) -> Crc {
    ChecksumEngine::new(CrcCore::new(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Digest;
    use crate::primitives::vectors::{chunked, hex_digest};

    #[test]
    fn test_reflect_bits() {
        assert_eq!(reflect_bits(0x01, 8), 0x80);
        assert_eq!(reflect_bits(0x04C11DB7, 32), 0xEDB88320);
        assert_eq!(reflect_bits(0x8005, 16), 0xA001);
        assert_eq!(reflect_bits(1, 64), 1 << 63);
    }

    #[test]
    fn test_check_values() {
        for &standard in CrcStandard::ALL {
            let Some(expected) = standard.check_value() else {
                continue;
            };
            let mut digest = crc(standard.parameters());
            digest.update(b"123456789").unwrap();
            let out = digest.finalize().unwrap();
            assert_eq!(out.len(), standard.parameters().order() as usize / 8);
            assert_eq!(
                digest.function().checksum(),
                expected,
                "{standard}: got {}",
                hex::encode_upper(&out)
            );
            assert_eq!(out, be_bytes(expected, out.len()));
        }
    }

    #[test]
    fn test_crc32_chunking() {
        let mut digest = crc(CrcStandard::Crc32.parameters());
        let input = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(hex_digest(&mut digest, input), "414FA339");
        assert_eq!(chunked(&mut digest, input, &[1, 5, 2]), "414FA339");
    }

    #[test]
    fn test_names() {
        assert_eq!(crc(CrcStandard::Crc32Pkzip.parameters()).name(), "CRC-32");
        assert_eq!(crc(CrcStandard::Crc16Kermit.parameters()).name(), "CRC-16-CCITT");
        let custom = CrcParameters::new(40, 0x0004820009, 0, false, false, 0).unwrap();
        assert_eq!(crc(custom).name(), "CRC-40");
    }

    #[test]
    fn test_empty_input_is_initial_xor() {
        let mut digest = crc(CrcStandard::Crc32.parameters());
        assert_eq!(hex_digest(&mut digest, b""), "00000000");
        let mut digest = crc(CrcStandard::Crc16CcittFalse.parameters());
        assert_eq!(hex_digest(&mut digest, b""), "FFFF");
    }
}
