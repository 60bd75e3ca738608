//! File and reader hashing helpers
//!
//! Streams files, readers and buffers through any [`Digest`](crate::engine::Digest)
//! and reports the result as a [`DigestResult`].

mod integrity;

pub use integrity::*;
