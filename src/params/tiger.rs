use super::ensure_one_of;
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of Tiger
    ///
    /// Version 1 pads with `0x01`, version 2 (Tiger2) with `0x80`. Shorter
    /// lengths are prefixes of the 192-bit digest.
    pub struct TigerParameters {
        /// Digest length in bits (128, 160 or 192)
        length: u32,
        /// Padding version (1 or 2)
        version: u32,
    }
}

impl TigerParameters {
    /// Validate and build a Tiger configuration
    pub fn new(length: u32, version: u32) -> Result<Self> {
        ensure_one_of("Tiger length", length, &[128, 160, 192])?;
        ensure_one_of("Tiger version", version, &[1, 2])?;
        Ok(Self::unchecked(length, version))
    }
}

impl fmt::Display for TigerParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            1 => write!(f, "Tiger-{}", self.length),
            v => write!(f, "Tiger{}-{}", v, self.length),
        }
    }
}

standards! {
    /// Published Tiger configurations
    pub enum TigerStandard: TigerParameters {
        Tiger128 = "TIGER-128" (128, 1),
        Tiger160 = "TIGER-160" (160, 1),
        Tiger192 = "TIGER-192" (192, 1),
        Tiger2_128 = "TIGER2-128" (128, 2),
        Tiger2_160 = "TIGER2-160" (160, 2),
        Tiger2_192 = "TIGER2-192" (192, 2),
    }
    aliases {}
}

impl Default for TigerStandard {
    fn default() -> Self {
        TigerStandard::Tiger192
    }
}
