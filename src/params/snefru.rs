use super::ensure_one_of;
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of Snefru (revision 2)
    pub struct SnefruParameters {
        /// Number of passes (4 or 8)
        passes: u32,
        /// Digest length in bits (128 or 256)
        length: u32,
    }
}

impl SnefruParameters {
    /// Validate and build a Snefru configuration
    pub fn new(passes: u32, length: u32) -> Result<Self> {
        ensure_one_of("Snefru passes", passes, &[4, 8])?;
        ensure_one_of("Snefru length", length, &[128, 256])?;
        Ok(Self::unchecked(passes, length))
    }
}

impl fmt::Display for SnefruParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SNEFRU2-{}-{}", self.passes, self.length)
    }
}

standards! {
    /// Published Snefru configurations
    pub enum SnefruStandard: SnefruParameters {
        Snefru128Pass4 = "SNEFRU2-4-128" (4, 128),
        Snefru256Pass4 = "SNEFRU2-4-256" (4, 256),
        Snefru128Pass8 = "SNEFRU2-8-128" (8, 128),
        Snefru256Pass8 = "SNEFRU2-8-256" (8, 256),
    }
    aliases {}
}

impl Default for SnefruStandard {
    fn default() -> Self {
        SnefruStandard::Snefru256Pass8
    }
}
