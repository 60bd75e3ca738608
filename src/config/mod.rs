//! Configuration module for HashKit
//!
//! Provides library defaults ([`Settings`]), JSON settings files, and the
//! CLI arguments of the `hashkit` binary.

mod settings;

pub use settings::*;
