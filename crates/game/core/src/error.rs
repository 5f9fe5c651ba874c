//! Shared error classification for fleet-core.
//!
//! Each domain error (`FormatError`, `OracleError`, `StateError`,
//! `ExecuteError`) lives next to the code that produces it and implements
//! [`GameError`] so hosts can route failures without matching on every enum.
//!
//! Decoding is strict: one malformed record rejects its whole content unit.
//! Evaluation is lenient: filter misses and dead handles are ordinary outcomes
//! and never reach this module.

use crate::action::RecordIndex;

/// How a host should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// A capacity limit that may clear on its own (object table full).
    Recoverable,

    /// Content that does not decode or does not fit the engine. Fix the data.
    Validation,

    /// The engine itself reached an inconsistent state.
    Internal,

    /// The engine was wired without something it needs.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for errors that point at the host or the engine rather than at
    /// content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all fleet-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier, e.g. `FORMAT_UNKNOWN_VERB`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Action record the error concerns, when there is one.
    fn record(&self) -> Option<RecordIndex> {
        None
    }
}
