//! Deterministic action execution for a fleet-combat simulation.
//!
//! `fleet-core` decodes scripted action records, binds them to the objects
//! involved in a game event, filters them, and applies their verbs to the
//! world state. All state mutation during evaluation flows through
//! [`engine::ActionEngine`]; content reaches it only through the read-only
//! oracles in [`env`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod math;
pub mod state;

pub use action::{
    ActionRecord, ActionTable, AlterVerb, Effect, FollowUp, FormatError, OwnerRelation,
    RecordIndex, ResolvedRoles, TriggerContext, Verb, VerbId, decode_records, encode_records,
};
pub use config::EngineConfig;
pub use engine::{ActionEngine, ExecuteError, ExecutionOutcome};
pub use env::{
    ActionOracle, ActionPool, BaseHandle, BaseObject, BaseObjectOracle, ConfigOracle, Env,
    GameEnv, InitialObject, LevelOracle, OracleError, PcgRng, RngOracle, TriggerKind,
};
pub use error::{ErrorSeverity, GameError};
pub use math::{Fixed, FixedPoint, Point, PointOffset};
#[cfg(feature = "serde")]
pub use state::compute_state_root;
pub use state::{AdmiralId, Attributes, GameState, InitialId, ObjectHandle, SpaceObject, Tick};
