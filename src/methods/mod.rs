//! Composite hashing methods
//!
//! Constructions that run an arbitrary [`Digest`](crate::engine::Digest)
//! primitive over structured input:
//! - [`HashList`]: independent digests of fixed-size blocks plus a top digest
//! - [`HashTree`]: Merkle tree of block digests
//! - [`MultiHash`] / [`ParallelHash`]: several digests of the same input,
//!   concatenated or XOR-folded

mod fanout;
mod list;
mod node;
mod tree;

pub use fanout::*;
pub use list::*;
pub use node::*;
pub use tree::*;

/// Block size used by lists and trees when none is given
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Input length from which work is spread across the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64 * 1024;
