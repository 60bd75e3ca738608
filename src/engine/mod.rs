//! Streaming digest engine
//!
//! Defines the object-safe [`Digest`] interface every algorithm and
//! composite implements, the [`BlockEngine`] that drives compression
//! functions over arbitrarily chunked input, and a thread-shareable
//! [`SharedDigest`] wrapper.

mod block;
mod digest;
mod shared;

pub use block::*;
pub use digest::*;
pub use shared::*;
