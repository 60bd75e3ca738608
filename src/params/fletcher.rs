use super::ensure_one_of;
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of a Fletcher checksum
    pub struct FletcherParameters {
        /// Checksum width in bits (8, 16 or 32)
        order: u32,
    }
}

impl FletcherParameters {
    /// Validate and build a Fletcher configuration
    pub fn new(order: u32) -> Result<Self> {
        ensure_one_of("Fletcher order", order, &[8, 16, 32])?;
        Ok(Self::unchecked(order))
    }
}

impl fmt::Display for FletcherParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fletcher-{}", self.order)
    }
}

standards! {
    /// Published Fletcher widths
    pub enum FletcherStandard: FletcherParameters {
        Fletcher8 = "FLETCHER-8" (8),
        Fletcher16 = "FLETCHER-16" (16),
        Fletcher32 = "FLETCHER-32" (32),
    }
    aliases {}
}

impl Default for FletcherStandard {
    fn default() -> Self {
        FletcherStandard::Fletcher32
    }
}
