//! Action domain: scripted records and everything needed to run them.
//!
//! Content describes object behavior as tables of [`ActionRecord`]s. Running
//! a table walks its records in order:
//!
//! 1. [`resolve_roles`] binds the trigger's subject, focus and direct object,
//!    applying level-initial overrides and reflexivity.
//! 2. [`passes_filters`] checks the record's attribute and owner filters
//!    against the focus. A miss skips the record; it is not an error.
//! 3. Records with a delay are parked in the [`DelayScheduler`]; the rest
//!    are handed to [`apply`] immediately.
//!
//! # Module Structure
//!
//! - `record`: records, tables and the owner relation filter
//! - `verb`: the closed verb set and per-verb arguments
//! - `codec`: the 48-byte on-disk record layout
//! - `resolve`: role binding and filtering
//! - `dispatch`: verb execution against live state
//! - `effect`: host-visible side effects and engine follow-ups
//! - `schedule`: the tick-indexed delay queue

pub mod codec;
pub mod dispatch;
pub mod effect;
pub mod record;
pub mod resolve;
pub mod schedule;
pub mod verb;

pub use codec::{
    FormatError, decode_pool, decode_record, decode_records, encode_record, encode_records,
};
pub use dispatch::{DispatchContext, apply};
pub use effect::{Effect, FollowUp, Removal};
pub use record::{ActionRecord, ActionTable, OwnerRelation, RecordIndex};
pub use resolve::{
    ResolvedRoles, TriggerContext, attributes_match, owner_relation_holds, passes_filters,
    resolve_roles,
};
pub use schedule::{DelayScheduler, DelayState, PendingDelayedApplication};
pub use verb::{
    AlterId, AlterVerb, ChangeScore, ColorFlash, CreateObject, DeclareWinner, DieKind,
    DisplayMessage, MakeSparks, PlaySound, TickRange, VelocityKind, Verb, VerbId,
};
