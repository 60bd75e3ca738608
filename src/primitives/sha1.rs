//! SHA-1 (FIPS 180-1) and its withdrawn predecessor SHA-0.
//!
//! The two differ only in the message schedule: SHA-1 rotates each expanded
//! word left by one bit, SHA-0 does not.

use super::words_be;
use crate::engine::{md_padding, BlockEngine, BlockFunction, LengthField};

const INIT: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// SHA-0/SHA-1 compression function
#[derive(Debug, Clone)]
pub struct Sha1Core {
    state: [u32; 5],
    rotate_schedule: bool,
}

impl Sha1Core {
    /// The SHA-1 compression function
    pub fn sha1() -> Self {
        Self {
            state: INIT,
            rotate_schedule: true,
        }
    }

    /// The SHA-0 compression function
    pub fn sha0() -> Self {
        Self {
            state: INIT,
            rotate_schedule: false,
        }
    }
}

impl Default for Sha1Core {
    fn default() -> Self {
        Self::sha1()
    }
}

impl BlockFunction for Sha1Core {
    fn name(&self) -> String {
        if self.rotate_schedule { "SHA-1" } else { "SHA-0" }.to_string()
    }

    fn block_size(&self) -> usize {
        64
    }

    fn output_size(&self) -> usize {
        20
    }

    fn reset(&mut self) {
        self.state = INIT;
    }

    fn transform(&mut self, block: &[u8]) {
        let head: [u32; 16] = words_be(block);
        let mut w = [0u32; 80];
        w[..16].copy_from_slice(&head);
        for t in 16..80 {
            let mixed = w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16];
            w[t] = if self.rotate_schedule { mixed.rotate_left(1) } else { mixed };
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;
        for (t, word) in w.iter().enumerate() {
            let (f, k) = match t / 20 {
                0 => ((b & c) | (!b & d), 0x5a827999),
                1 => (b ^ c ^ d, 0x6ed9eba1),
                2 => ((b & c) | (b & d) | (c & d), 0x8f1bbcdc),
                _ => (b ^ c ^ d, 0xca62c1d6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(*word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (s, v) in self.state.iter_mut().zip([a, b, c, d, e]) {
            *s = s.wrapping_add(v);
        }
    }

    fn finish(&mut self, tail: &[u8], total_len: u64) -> Vec<u8> {
        let padded = md_padding(tail, total_len, 64, LengthField::Be64);
        for block in padded.chunks_exact(64) {
            self.transform(block);
        }
        self.state.iter().flat_map(|w| w.to_be_bytes()).collect()
    }
}

/// Streaming SHA-1
pub type Sha1 = BlockEngine<Sha1Core>;

/// Streaming SHA-0
pub fn sha0() -> Sha1 {
    BlockEngine::new(Sha1Core::sha0())
}
