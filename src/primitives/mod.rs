//! Block-structured digest primitives
//!
//! MD4, MD5, SHA-0, SHA-1 and the SHA-2 family run on the crate's own
//! [`BlockEngine`](crate::engine::BlockEngine). Tiger, Whirlpool and the
//! RIPEMD family are RustCrypto implementations adapted onto the
//! [`Digest`](crate::engine::Digest) interface.

mod external;
mod md4;
mod md5;
mod sha1;
mod sha2;

pub use external::*;
pub use md4::*;
pub use md5::*;
pub use sha1::*;
pub use self::sha2::*;

/// Read a block as little-endian 32-bit words
pub(crate) fn words_le<const N: usize>(block: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// Read a block as big-endian 32-bit words
pub(crate) fn words_be<const N: usize>(block: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

#[cfg(test)]
pub(crate) mod vectors {
    //! Shared helpers for primitive test vectors.

    use crate::engine::Digest;

    pub fn hex_digest(digest: &mut dyn Digest, input: &[u8]) -> String {
        hex::encode_upper(digest.compute(input).unwrap())
    }

    /// Hash `input` split at every given chunk size, cycling until exhausted.
    pub fn chunked(digest: &mut dyn Digest, input: &[u8], chunks: &[usize]) -> String {
        digest.reset();
        let mut offset = 0;
        for &size in chunks.iter().cycle() {
            if offset >= input.len() {
                break;
            }
            let end = (offset + size).min(input.len());
            digest.update(&input[offset..end]).unwrap();
            offset = end;
        }
        hex::encode_upper(digest.finalize().unwrap())
    }
}
