//! State management errors.
//!
//! Errors related to object allocation and level setup capacity limits.

use crate::error::{ErrorSeverity, GameError};
use crate::state::InitialId;

/// Errors that occur during game state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Object table is full (max capacity reached).
    #[error("Object table is full (max: {max})")]
    ObjectTableFull {
        /// Maximum capacity.
        max: usize,
    },

    /// Admiral ledger is full (max capacity reached).
    #[error("Admiral ledger is full (max: {max}, requested: {requested})")]
    AdmiralLedgerFull {
        /// Maximum capacity.
        max: usize,
        /// Number of admirals the level asked for.
        requested: usize,
    },

    /// A level initial refers to a base type the base oracle does not know.
    #[error("Initial {initial:?} refers to unknown base type {base}")]
    UnknownInitialBase {
        /// The offending initial.
        initial: InitialId,
        /// Raw base handle.
        base: u32,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // Capacity limits may clear once objects are removed
            ObjectTableFull { .. } => ErrorSeverity::Recoverable,

            // Level content does not fit the engine
            AdmiralLedgerFull { .. } | UnknownInitialBase { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            ObjectTableFull { .. } => "STATE_OBJECT_TABLE_FULL",
            AdmiralLedgerFull { .. } => "STATE_ADMIRAL_LEDGER_FULL",
            UnknownInitialBase { .. } => "STATE_UNKNOWN_INITIAL_BASE",
        }
    }
}
