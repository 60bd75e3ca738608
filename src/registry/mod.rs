//! Name-based algorithm lookup
//!
//! Names are matched case-insensitively with `-`, `_`, `/` and spaces
//! ignored, so `"Crc32"`, `"Crc-32"` and `"CRC-32"` are the same algorithm.
//! A family name alone (`"Crc"`, `"Tiger"`, `"Fnv"`) selects that family's
//! default standard. The table is built once and read-only afterwards.
//!
//! ```no_run
//! use hashkit::registry;
//!
//! let mut crc = registry::create("Crc-16-Arc").unwrap();
//! assert_eq!(crc.compute(b"123456789").unwrap(), vec![0xBB, 0x3D]);
//! assert_eq!(registry::parameters("Crc16Arc"), registry::parameters("Crc16"));
//! ```

mod factory;
mod names;

pub use factory::*;
pub use names::{lookup, Algorithm, AnyParameters, AnyStandard};

use crate::engine::Digest;

/// A fresh digest for `name` using default settings, or `None` if unknown
pub fn create(name: &str) -> Option<Box<dyn Digest>> {
    Factory::default().create(name)
}

/// The published standard `name` refers to, aliases included
pub fn standard(name: &str) -> Option<AnyStandard> {
    match lookup(name)? {
        Algorithm::Standard(standard) => Some(standard),
        _ => None,
    }
}

/// Parameters of the standard `name` refers to
///
/// An alias yields the same value as its canonical standard.
pub fn parameters(name: &str) -> Option<AnyParameters> {
    standard(name).map(AnyStandard::parameters)
}

/// Canonical name behind an alias such as `"CRC-16-ARC"`
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    standard(name).map(|s| s.canonical().name())
}

/// Canonical names of every known algorithm
pub fn names() -> Vec<String> {
    Algorithm::all().into_iter().map(|a| a.name()).collect()
}
