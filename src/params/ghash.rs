use crate::error::{HashError, Result};
use std::fmt;

parameter_set! {
    /// Configuration of the shift-and-add GHash family
    pub struct GHashParameters {
        /// Left shift applied to the running value per byte
        shift: u32,
    }
}

impl GHashParameters {
    /// Validate and build a GHash configuration
    pub fn new(shift: u32) -> Result<Self> {
        if !(1..32).contains(&shift) {
            return Err(HashError::validation(format!(
                "GHash shift must be between 1 and 31, got {shift}"
            )));
        }
        Ok(Self::unchecked(shift))
    }
}

impl fmt::Display for GHashParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GHash-{}", self.shift)
    }
}

standards! {
    /// Published GHash shifts
    pub enum GHashStandard: GHashParameters {
        GHash3 = "GHASH-3" (3),
        GHash5 = "GHASH-5" (5),
    }
    aliases {}
}

impl Default for GHashStandard {
    fn default() -> Self {
        GHashStandard::GHash5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Standard;

    #[test]
    fn test_shift_domain() {
        assert!(GHashParameters::new(0).is_err());
        assert!(GHashParameters::new(32).is_err());
        assert_eq!(GHashParameters::new(3).unwrap(), GHashStandard::GHash3.parameters());
    }
}
