//! SHA-2 family (FIPS 180-2).
//!
//! The compression functions come from the `sha2` crate; buffering, padding
//! and truncation run on our engine so the family behaves like every other
//! block primitive.

use crate::engine::{md_padding, BlockEngine, BlockFunction, LengthField};
use digest::consts::{U128, U64};
use digest::generic_array::GenericArray;

const SHA224_INIT: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939,
    0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

const SHA256_INIT: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SHA384_INIT: [u64; 8] = [
    0xcbbb9d5dc1059ed8, 0x629a292a367cd507, 0x9159015a3070dd17, 0x152fecd8f70e5939,
    0x67332667ffc00b31, 0x8eb44a8768581511, 0xdb0c2e0d64f98fa7, 0x47b5481dbefa4fa4,
];

const SHA512_INIT: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

/// 32-bit SHA-2 compression (SHA-224, SHA-256)
#[derive(Debug, Clone)]
pub struct Sha256Core {
    state: [u32; 8],
    init: [u32; 8],
    output_size: usize,
}

impl Sha256Core {
    /// SHA-224: SHA-256 with distinct initial values, truncated to 28 bytes
    pub fn sha224() -> Self {
        Self {
            state: SHA224_INIT,
            init: SHA224_INIT,
            output_size: 28,
        }
    }

    /// SHA-256
    pub fn sha256() -> Self {
        Self {
            state: SHA256_INIT,
            init: SHA256_INIT,
            output_size: 32,
        }
    }
}

impl Default for Sha256Core {
    fn default() -> Self {
        Self::sha256()
    }
}

impl BlockFunction for Sha256Core {
    fn name(&self) -> String {
        format!("SHA-{}", self.output_size * 8)
    }

    fn block_size(&self) -> usize {
        64
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn reset(&mut self) {
        self.state = self.init;
    }

    fn transform(&mut self, block: &[u8]) {
        let block = GenericArray::<u8, U64>::from_slice(block);
        ::sha2::compress256(&mut self.state, std::slice::from_ref(block));
    }

    fn finish(&mut self, tail: &[u8], total_len: u64) -> Vec<u8> {
        let padded = md_padding(tail, total_len, 64, LengthField::Be64);
        for block in padded.chunks_exact(64) {
            self.transform(block);
        }
        let mut out: Vec<u8> = self.state.iter().flat_map(|w| w.to_be_bytes()).collect();
        out.truncate(self.output_size);
        out
    }
}

/// 64-bit SHA-2 compression (SHA-384, SHA-512)
#[derive(Debug, Clone)]
pub struct Sha512Core {
    state: [u64; 8],
    init: [u64; 8],
    output_size: usize,
}

impl Sha512Core {
    /// SHA-384: SHA-512 with distinct initial values, truncated to 48 bytes
    pub fn sha384() -> Self {
        Self {
            state: SHA384_INIT,
            init: SHA384_INIT,
            output_size: 48,
        }
    }

    /// SHA-512
    pub fn sha512() -> Self {
        Self {
            state: SHA512_INIT,
            init: SHA512_INIT,
            output_size: 64,
        }
    }
}

impl Default for Sha512Core {
    fn default() -> Self {
        Self::sha512()
    }
}

impl BlockFunction for Sha512Core {
    fn name(&self) -> String {
        format!("SHA-{}", self.output_size * 8)
    }

    fn block_size(&self) -> usize {
        128
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn reset(&mut self) {
        self.state = self.init;
    }

    fn transform(&mut self, block: &[u8]) {
        let block = GenericArray::<u8, U128>::from_slice(block);
        ::sha2::compress512(&mut self.state, std::slice::from_ref(block));
    }

    fn finish(&mut self, tail: &[u8], total_len: u64) -> Vec<u8> {
        let padded = md_padding(tail, total_len, 128, LengthField::Be128);
        for block in padded.chunks_exact(128) {
            self.transform(block);
        }
        let mut out: Vec<u8> = self.state.iter().flat_map(|w| w.to_be_bytes()).collect();
        out.truncate(self.output_size);
        out
    }
}

/// Streaming SHA-256
pub type Sha256 = BlockEngine<Sha256Core>;

/// Streaming SHA-512
pub type Sha512 = BlockEngine<Sha512Core>;

/// Streaming SHA-224
pub fn sha224() -> Sha256 {
    BlockEngine::new(Sha256Core::sha224())
}

/// Streaming SHA-384
pub fn sha384() -> Sha512 {
    BlockEngine::new(Sha512Core::sha384())
}
