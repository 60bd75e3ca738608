//! MD4 (RFC 1320)

use super::words_le;
use crate::engine::{md_padding, BlockEngine, BlockFunction, LengthField};

const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const ROUND2_ORDER: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];
const ROUND3_ORDER: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
const SHIFTS: [[u32; 4]; 3] = [[3, 7, 11, 19], [3, 5, 9, 13], [3, 9, 11, 15]];

/// MD4 compression function
#[derive(Debug, Clone)]
pub struct Md4Core {
    state: [u32; 4],
}

impl Default for Md4Core {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockFunction for Md4Core {
    fn name(&self) -> String {
        "MD4".to_string()
    }

    fn block_size(&self) -> usize {
        64
    }

    fn output_size(&self) -> usize {
        16
    }

    fn reset(&mut self) {
        self.state = INIT;
    }

    fn transform(&mut self, block: &[u8]) {
        let x: [u32; 16] = words_le(block);
        let [mut a, mut b, mut c, mut d] = self.state;

        for i in 0..48 {
            let round = i / 16;
            let (f, k, constant) = match round {
                0 => ((b & c) | (!b & d), i, 0),
                1 => ((b & c) | (b & d) | (c & d), ROUND2_ORDER[i % 16], 0x5a827999),
                _ => (b ^ c ^ d, ROUND3_ORDER[i % 16], 0x6ed9eba1),
            };
            let next = a
                .wrapping_add(f)
                .wrapping_add(x[k])
                .wrapping_add(constant)
                .rotate_left(SHIFTS[round][i % 4]);
            a = d;
            d = c;
            c = b;
            b = next;
        }

        for (s, v) in self.state.iter_mut().zip([a, b, c, d]) {
            *s = s.wrapping_add(v);
        }
    }

    fn finish(&mut self, tail: &[u8], total_len: u64) -> Vec<u8> {
        let padded = md_padding(tail, total_len, 64, LengthField::Le64);
        for block in padded.chunks_exact(64) {
            self.transform(block);
        }
        self.state.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

/// Streaming MD4
pub type Md4 = BlockEngine<Md4Core>;
