//! Error types for the action engine.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

/// Errors surfaced by [`ActionEngine`](super::ActionEngine).
///
/// Only wiring problems are errors. Everything that can go wrong while a
/// record runs (filter misses, dead handles, content mismatches) is logged
/// and skipped so a single bad record never stops the simulation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("engine environment incomplete: {0}")]
    Oracle(#[from] OracleError),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_errors_keep_their_code() {
        let error = ExecuteError::from(OracleError::ActionsNotAvailable);
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert_eq!(error.error_code(), "ORACLE_ACTIONS_NOT_AVAILABLE");
        assert_eq!(
            error.to_string(),
            "engine environment incomplete: ActionOracle not available"
        );
    }
}
