//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle means the engine was wired incorrectly; evaluation cannot
/// start without it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// BaseObjectOracle is not available in the environment.
    #[error("BaseObjectOracle not available")]
    BasesNotAvailable,

    /// LevelOracle is not available in the environment.
    #[error("LevelOracle not available")]
    LevelNotAvailable,

    /// ActionOracle is not available in the environment.
    #[error("ActionOracle not available")]
    ActionsNotAvailable,

    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            BasesNotAvailable => "ORACLE_BASES_NOT_AVAILABLE",
            LevelNotAvailable => "ORACLE_LEVEL_NOT_AVAILABLE",
            ActionsNotAvailable => "ORACLE_ACTIONS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
