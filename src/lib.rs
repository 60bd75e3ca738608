//! # HashKit - Streaming Digests and Composite Hash Constructions
//!
//! HashKit computes cryptographic and non-cryptographic digests over byte
//! streams delivered in chunks of any size. On top of the individual
//! algorithms it builds composite constructions that work with any of them.
//!
//! ## Features
//!
//! - **Streaming engine**: chunking never changes a digest
//! - **Algorithms**: MD4, MD5, SHA-0/1/2, RIPEMD, Tiger, Whirlpool, CRC, FNV,
//!   Fletcher, Adler-32, Sum and the classic string hashes
//! - **Standards**: validated parameter sets with published names and aliases
//! - **Hash lists and Merkle trees** over any primitive
//! - **Fan-out**: several digests of one stream, concatenated or XOR-folded
//! - **HMAC** over any primitive
//!
//! ## Quick Start
//!
//! ```no_run
//! use hashkit::prelude::*;
//!
//! let mut crc = registry::create("CRC-32").unwrap();
//! crc.update(b"12345").unwrap();
//! crc.update(b"6789").unwrap();
//! assert_eq!(hex::encode(crc.finalize().unwrap()), "cbf43926");
//! ```
//!
//! ## Merkle Trees
//!
//! ```no_run
//! use hashkit::prelude::*;
//!
//! let mut tree = HashTree::new(registry::create("Tiger").unwrap(), 1024).unwrap();
//! let root = tree.compute(&[b'A'; 1025]).unwrap();
//! println!("{} leaves, root {}", tree.leaf_ids().len(), hex::encode(root));
//! ```
//!
//! ## Fan-out and HMAC
//!
//! ```no_run
//! use hashkit::prelude::*;
//!
//! let members = vec![registry::create("MD5").unwrap(), registry::create("SHA-1").unwrap()];
//! let mut both = MultiHash::new(members).unwrap();
//! assert_eq!(both.compute(b"abc").unwrap().len(), 36);
//!
//! let mut hmac = Hmac::new(registry::create("SHA-256").unwrap(), Some(&b"Jefe"[..]));
//! let tag = hmac.compute(b"what do ya want for nothing?").unwrap();
//! # let _ = tag;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
pub mod config;
pub mod engine;
pub mod error;
pub mod hash;
pub mod mac;
pub mod methods;
pub mod params;
pub mod primitives;
pub mod registry;

// Re-export commonly used types
pub use config::Settings;
pub use engine::Digest;
pub use error::{HashError, Result};
pub use registry::{create, Factory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use hashkit::prelude::*;
    //! ```

    pub use crate::config::Settings;
    pub use crate::engine::{Digest, SharedDigest};
    pub use crate::error::{HashError, Result};
    pub use crate::hash::{digest_bytes, digest_file, DigestResult};
    pub use crate::mac::Hmac;
    pub use crate::methods::{HashList, HashNode, HashTree, MultiHash, ParallelHash};
    pub use crate::params::{CrcParameters, CrcStandard, Standard};
    pub use crate::registry::{self, Factory};
}
