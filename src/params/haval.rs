use super::ensure_one_of;
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of HAVAL
    pub struct HavalParameters {
        /// Number of passes (3, 4 or 5)
        passes: u32,
        /// Digest length in bits (128, 160, 192, 224 or 256)
        length: u32,
    }
}

impl HavalParameters {
    /// Validate and build a HAVAL configuration
    pub fn new(passes: u32, length: u32) -> Result<Self> {
        ensure_one_of("HAVAL passes", passes, &[3, 4, 5])?;
        ensure_one_of("HAVAL length", length, &[128, 160, 192, 224, 256])?;
        Ok(Self::unchecked(passes, length))
    }
}

impl fmt::Display for HavalParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAVAL-{}-{}", self.passes, self.length)
    }
}

standards! {
    /// Published HAVAL configurations
    pub enum HavalStandard: HavalParameters {
        Haval128Pass3 = "HAVAL-3-128" (3, 128),
        Haval160Pass3 = "HAVAL-3-160" (3, 160),
        Haval192Pass3 = "HAVAL-3-192" (3, 192),
        Haval224Pass3 = "HAVAL-3-224" (3, 224),
        Haval256Pass3 = "HAVAL-3-256" (3, 256),
        Haval128Pass4 = "HAVAL-4-128" (4, 128),
        Haval160Pass4 = "HAVAL-4-160" (4, 160),
        Haval192Pass4 = "HAVAL-4-192" (4, 192),
        Haval224Pass4 = "HAVAL-4-224" (4, 224),
        Haval256Pass4 = "HAVAL-4-256" (4, 256),
        Haval128Pass5 = "HAVAL-5-128" (5, 128),
        Haval160Pass5 = "HAVAL-5-160" (5, 160),
        Haval192Pass5 = "HAVAL-5-192" (5, 192),
        Haval224Pass5 = "HAVAL-5-224" (5, 224),
        Haval256Pass5 = "HAVAL-5-256" (5, 256),
    }
    aliases {}
}

impl Default for HavalStandard {
    fn default() -> Self {
        HavalStandard::Haval256Pass5
    }
}
