//! Checksum module
//!
//! Non-cryptographic checksums and string hashes. Each algorithm is a
//! [`ChecksumFunction`] folding bytes into a small accumulator, driven
//! through the [`Digest`](crate::engine::Digest) lifecycle by
//! [`ChecksumEngine`].

mod classic;
mod crc;
mod engine;
mod fletcher;
mod fnv;
mod ghash;
mod sum;

pub use classic::*;
pub use crc::*;
pub use engine::*;
pub use fletcher::*;
pub use fnv::*;
pub use ghash::*;
pub use sum::*;
