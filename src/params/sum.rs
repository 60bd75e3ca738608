use super::ensure_byte_multiple;
use crate::error::Result;
use std::fmt;

parameter_set! {
    /// Configuration of a plain additive checksum
    pub struct SumParameters {
        /// Accumulator width in bits
        order: u32,
    }
}

impl SumParameters {
    /// Validate and build a sum configuration
    pub fn new(order: u32) -> Result<Self> {
        ensure_byte_multiple("Sum", order)?;
        Ok(Self::unchecked(order))
    }
}

impl fmt::Display for SumParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sum-{}", self.order)
    }
}

standards! {
    /// Common accumulator widths
    pub enum SumStandard: SumParameters {
        Sum8 = "SUM-8" (8),
        Sum16 = "SUM-16" (16),
        Sum24 = "SUM-24" (24),
        Sum32 = "SUM-32" (32),
        Sum64 = "SUM-64" (64),
    }
    aliases {}
}

impl Default for SumStandard {
    fn default() -> Self {
        SumStandard::Sum32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Standard;

    #[test]
    fn test_order_domain() {
        for order in [0, 4, 9, 65, 72] {
            assert!(SumParameters::new(order).is_err(), "order {order}");
        }
        assert_eq!(SumParameters::new(40).unwrap().order(), 40);
        assert_eq!(SumStandard::Sum24.parameters().order(), 24);
    }
}
