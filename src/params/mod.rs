//! Validated algorithm parameters and published standards
//!
//! Every parameterized algorithm family has a parameter set whose
//! constructor rejects out-of-domain values, and an enumeration of the
//! standards published for it. Aliased standards (e.g. CRC-16/ARC for
//! CRC-16) resolve to their canonical entry in a single hop.

use crate::error::{HashError, Result};
use std::fmt::Display;

/// Generates the parameter-set struct, read accessors, and a serde
/// representation whose deserialization re-runs `new`.
macro_rules! parameter_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "Raw")]
        pub struct $name {
            $( $field: $ty, )+
        }

        #[derive(serde::Deserialize)]
        struct Raw {
            $( $field: $ty, )+
        }

        impl TryFrom<Raw> for $name {
            type Error = $crate::error::HashError;

            fn try_from(raw: Raw) -> $crate::error::Result<Self> {
                Self::new($( raw.$field ),+)
            }
        }

        impl $name {
            $(
                $(#[$fmeta])*
                pub fn $field(&self) -> $ty {
                    self.$field
                }
            )+

            /// Build from values already known to be valid (standard tables).
            const fn unchecked($( $field: $ty ),+) -> Self {
                Self { $( $field ),+ }
            }
        }
    };
}

/// Generates a standards enumeration with its [`Standard`] implementation.
///
/// Canonical entries carry the arguments of their parameter set; aliases
/// name the canonical entry they stand for.
macro_rules! standards {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $params:ident {
            $( $variant:ident = $label:literal ( $($arg:expr),+ ), )+
        }
        aliases {
            $( $alias:ident = $alias_label:literal => $canon:ident, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( #[doc = $label] $variant, )+
            $( #[doc = $alias_label] $alias, )*
        }

        impl $crate::params::Standard for $name {
            type Parameters = $params;

            const ALL: &'static [Self] = &[ $( Self::$variant, )+ $( Self::$alias, )* ];

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    $( Self::$alias => $alias_label, )*
                }
            }

            fn parameters(self) -> $params {
                match self {
                    $( Self::$variant => $params::unchecked($($arg),+), )+
                    $( Self::$alias => <Self as $crate::params::Standard>::parameters(Self::$canon), )*
                }
            }

            fn canonical(self) -> Self {
                match self {
                    $( Self::$alias => Self::$canon, )*
                    other => other,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(<Self as $crate::params::Standard>::name(*self))
            }
        }
    };
}

mod crc;
mod fletcher;
mod fnv;
mod ghash;
mod haval;
mod snefru;
mod sum;
mod tiger;

pub use crc::*;
pub use fletcher::*;
pub use fnv::*;
pub use ghash::*;
pub use haval::*;
pub use snefru::*;
pub use sum::*;
pub use tiger::*;

/// A published, named configuration of a parameterized algorithm.
pub trait Standard: Copy + Eq + std::fmt::Debug + 'static {
    /// The parameter set this standard names
    type Parameters: Copy + PartialEq + std::fmt::Debug;

    /// Every standard of the family, aliases included
    const ALL: &'static [Self];

    /// Display name, e.g. `"CRC-16-ARC"`
    fn name(self) -> &'static str;

    /// The parameters of this standard
    fn parameters(self) -> Self::Parameters;

    /// The standard this one is an alias of, or itself
    fn canonical(self) -> Self {
        self
    }

    /// True when this standard is another name for a canonical one
    fn is_alias(self) -> bool {
        self.canonical() != self
    }
}

/// All-ones mask for an `order`-bit register
pub(crate) fn width_mask(order: u32) -> u64 {
    if order >= 64 {
        u64::MAX
    } else {
        (1u64 << order) - 1
    }
}

fn ensure_one_of<T: PartialEq + Display>(what: &str, value: T, allowed: &[T]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let allowed: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
    Err(HashError::validation(format!(
        "{what} must be one of {}, got {value}",
        allowed.join(", ")
    )))
}

fn ensure_byte_multiple(what: &str, order: u32) -> Result<()> {
    if order == 0 || order > 64 || order % 8 != 0 {
        return Err(HashError::validation(format!(
            "{what} order must be a multiple of 8 between 8 and 64, got {order}"
        )));
    }
    Ok(())
}

fn ensure_fits(what: &str, value: u64, order: u32) -> Result<()> {
    if value & !width_mask(order) != 0 {
        return Err(HashError::validation(format!(
            "{what} {value:#x} does not fit in {order} bits"
        )));
    }
    Ok(())
}
