use super::{ensure_fits, ensure_one_of};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

const PRIME_32: u64 = 0x0100_0193;
const PRIME_64: u64 = 0x0000_0100_0000_01B3;
const BASIS_32: u64 = 0x811C_9DC5;
const BASIS_64: u64 = 0xCBF2_9CE4_8422_2325;

/// Order of the multiply and XOR steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FnvVariant {
    /// Multiply, then XOR the byte
    Fnv1,
    /// XOR the byte, then multiply
    Fnv1a,
}

parameter_set! {
    /// Configuration of a Fowler-Noll-Vo hash
    pub struct FnvParameters {
        /// Hash width in bits (32 or 64)
        order: u32,
        /// FNV prime
        prime: u64,
        /// Initial hash value (zero for FNV-0)
        offset_basis: u64,
        /// Step ordering
        variant: FnvVariant,
    }
}

impl FnvParameters {
    /// Validate and build an FNV configuration
    pub fn new(order: u32, prime: u64, offset_basis: u64, variant: FnvVariant) -> Result<Self> {
        ensure_one_of("FNV order", order, &[32, 64])?;
        ensure_fits("FNV prime", prime, order)?;
        ensure_fits("FNV offset basis", offset_basis, order)?;
        Ok(Self::unchecked(order, prime, offset_basis, variant))
    }
}

impl fmt::Display for FnvParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FNV-{} {:?} prime={:#x} basis={:#x}",
            self.order, self.variant, self.prime, self.offset_basis
        )
    }
}

standards! {
    /// Published FNV configurations
    pub enum FnvStandard: FnvParameters {
        Fnv32Type0 = "FNV-0-32" (32, PRIME_32, 0, FnvVariant::Fnv1),
        Fnv32Type1 = "FNV-1-32" (32, PRIME_32, BASIS_32, FnvVariant::Fnv1),
        Fnv32Type1a = "FNV-1A-32" (32, PRIME_32, BASIS_32, FnvVariant::Fnv1a),
        Fnv64Type0 = "FNV-0-64" (64, PRIME_64, 0, FnvVariant::Fnv1),
        Fnv64Type1 = "FNV-1-64" (64, PRIME_64, BASIS_64, FnvVariant::Fnv1),
        Fnv64Type1a = "FNV-1A-64" (64, PRIME_64, BASIS_64, FnvVariant::Fnv1a),
    }
    aliases {}
}

impl Default for FnvStandard {
    fn default() -> Self {
        FnvStandard::Fnv32Type1a
    }
}
