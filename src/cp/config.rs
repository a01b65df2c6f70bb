//! Search configuration.

use crate::error::{CpError, Result};

/// Configuration for a depth-first CP search.
///
/// # Examples
///
/// ```
/// use u_nqueens::cp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_solution_limit(0)
///     .with_time_limit_ms(5_000);
/// assert_eq!(config.solution_limit, 0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Stop after this many solutions. 0 = enumerate all.
    pub solution_limit: usize,
    /// Maximum solve time in milliseconds. 0 = no limit.
    pub time_limit_ms: u64,
    /// Maximum number of search nodes. 0 = no limit.
    pub node_limit: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            solution_limit: 1,
            time_limit_ms: 0,
            node_limit: 0,
        }
    }
}

impl SolverConfig {
    /// Sets the solution limit (0 = all).
    pub fn with_solution_limit(mut self, n: usize) -> Self {
        self.solution_limit = n;
        self
    }

    /// Sets the time limit in milliseconds (0 = none).
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the node limit (0 = none).
    pub fn with_node_limit(mut self, n: u64) -> Self {
        self.node_limit = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Limits above what `Instant` arithmetic can represent are rejected.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit_ms > i64::MAX as u64 {
            return Err(CpError::InvalidConfig(format!(
                "time_limit_ms too large: {}",
                self.time_limit_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.solution_limit, 1);
        assert_eq!(config.time_limit_ms, 0);
        assert_eq!(config.node_limit, 0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_huge_time_limit() {
        let config = SolverConfig::default().with_time_limit_ms(u64::MAX);
        assert!(matches!(config.validate(), Err(CpError::InvalidConfig(_))));
    }

    #[test]
    fn test_builders() {
        let config = SolverConfig::default()
            .with_solution_limit(3)
            .with_node_limit(100);
        assert_eq!(config.solution_limit, 3);
        assert_eq!(config.node_limit, 100);
    }
}
