//! MD5 (RFC 1321)

use super::words_le;
use crate::engine::{md_padding, BlockEngine, BlockFunction, LengthField};

const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

const SINES: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// MD5 compression function
#[derive(Debug, Clone)]
pub struct Md5Core {
    state: [u32; 4],
}

impl Default for Md5Core {
    fn default() -> Self {
        Self { state: INIT }
    }
}

impl BlockFunction for Md5Core {
    fn name(&self) -> String {
        "MD5".to_string()
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
        let m: [u32; 16] = words_le(block);
        let [mut a, mut b, mut c, mut d] = self.state;

        for i in 0..64 {
            let (f, g) = match i / 16 {
                0 => ((b & c) | (!b & d), i),
                1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                2 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };
            let rotated = a
                .wrapping_add(f)
                .wrapping_add(SINES[i])
                .wrapping_add(m[g])
                .rotate_left(SHIFTS[i]);
            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(rotated);
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

/// Streaming MD5
pub type Md5 = BlockEngine<Md5Core>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::vectors::{chunked, hex_digest};

    #[test]
    fn test_md5_rfc1321_suite() {
        let mut md5 = Md5::default();
        let cases: [(&[u8], &str); 7] = [
            (b"", "D41D8CD98F00B204E9800998ECF8427E"),
            (b"a", "0CC175B9C0F1B6A831C399E269772661"),
            (b"abc", "900150983CD24FB0D6963F7D28E17F72"),
            (b"message digest", "F96B697D7CB7938D525A2F31AAF161D0"),
            (b"abcdefghijklmnopqrstuvwxyz", "C3FCD3D76192E4007DFB496CCA67E13B"),
            (
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "D174AB98D277D9F5A5611C2C9F419D9F",
            ),
            (
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "57EDF4A22BE3C955AC49DA2E2107B67A",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(hex_digest(&mut md5, input), expected);
        }
    }

    #[test]
    fn test_md5_million_a_any_chunking() {
        let input = vec![b'a'; 1_000_000];
        let mut md5 = Md5::default();
        let expected = "7707D6AE4E027C70EEA2A935C2296F21";

        assert_eq!(chunked(&mut md5, &input, &[1_000_000]), expected);
        assert_eq!(chunked(&mut md5, &input, &[1, 999_999]), expected);
        assert_eq!(chunked(&mut md5, &input, &[63, 999_937]), expected);
        assert_eq!(chunked(&mut md5, &input, &[63, 63, 999_874]), expected);
        assert_eq!(chunked(&mut md5, &input, &[20, 20, 86, 999_874]), expected);
    }

    #[test]
    fn test_md5_padding_boundaries() {
        // 55 bytes fit one padding block, 56 and 63 need two, 64 is a full block
        let mut md5 = Md5::default();
        let cases = [
            (55, "EF1772B6DFF9A122358552954AD0DF65"),
            (56, "3B0C8AC703F828B04C6C197006D17218"),
            (63, "B06521F39153D618550606BE297466D5"),
            (64, "014842D480B571495A4A0363793F7367"),
        ];
        for (len, expected) in cases {
            let input = vec![b'a'; len];
            assert_eq!(hex_digest(&mut md5, &input), expected, "length {len}");
            assert_eq!(chunked(&mut md5, &input, &[1]), expected, "length {len}");
        }
    }
}
