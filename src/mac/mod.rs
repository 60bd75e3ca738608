//! Message authentication codes
//!
//! Keyed constructions layered over the crate's digest primitives.

mod hmac;

pub use hmac::*;
