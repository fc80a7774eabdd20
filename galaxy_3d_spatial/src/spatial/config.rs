/// Build configuration for a spatial index.

use crate::error::{Error, Result};

/// Spatial index build configuration
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Split boundaries closer than `range / balance_divisor` to either end of
    /// a range are replaced by the exact midpoint (3 = "outer third")
    pub balance_divisor: usize,
    /// Recursion levels the temporary box pool is allocated for up front.
    /// The pool grows if the tree turns out deeper.
    pub depth_pool_levels: usize,
    /// Log node count and depth after each build
    pub log_statistics: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            balance_divisor: 3,
            depth_pool_levels: 32,
            log_statistics: true,
        }
    }
}

impl IndexConfig {
    /// Check that the configuration can drive a build.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `balance_divisor` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.balance_divisor == 0 {
            return Err(Error::InvalidConfig(
                "balance_divisor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
