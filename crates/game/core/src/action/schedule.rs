//! Tick-indexed queue of delayed record applications.
//!
//! A record with a non-zero delay is filtered when its table runs, then parked
//! here with the roles it resolved to. The engine polls the queue once per tick
//! and hands back everything due, oldest first.

use super::{RecordIndex, ResolvedRoles};
use crate::math::PointOffset;
use crate::state::{ObjectTable, Tick};

/// How a due application was settled. Parking is reported separately, as
/// [`ExecutionOutcome::scheduled`](crate::engine::ExecutionOutcome::scheduled).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DelayState {
    Fired,
    /// The captured subject died before the fire tick.
    Cancelled,
}

/// A record waiting for its fire tick, with a snapshot of its trigger roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingDelayedApplication {
    pub record: RecordIndex,
    pub roles: ResolvedRoles,
    pub offset: Option<PointOffset>,
    pub fire_at: Tick,
    /// Enqueue order; breaks ties between applications due on the same tick.
    pub sequence: u64,
}

impl PendingDelayedApplication {
    /// Decides the application's fate and re-validates its roles.
    ///
    /// A subject that was captured but is no longer live cancels the
    /// application. Other roles that died simply resolve to `None`.
    pub fn settle(&self, objects: &ObjectTable) -> (DelayState, ResolvedRoles) {
        let roles = ResolvedRoles {
            subject: objects.live(self.roles.subject),
            focus: objects.live(self.roles.focus),
            direct: objects.live(self.roles.direct),
        };
        if self.roles.subject.is_some() && roles.subject.is_none() {
            (DelayState::Cancelled, roles)
        } else {
            (DelayState::Fired, roles)
        }
    }
}

/// Pending delayed applications, owned by the game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayScheduler {
    pending: Vec<PendingDelayedApplication>,
    next_sequence: u64,
}

impl DelayScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an application due at `fire_at`.
    ///
    /// Returns `None` without enqueuing when `capacity` applications are
    /// already pending.
    pub fn try_schedule(
        &mut self,
        record: RecordIndex,
        roles: ResolvedRoles,
        offset: Option<PointOffset>,
        fire_at: Tick,
        capacity: usize,
    ) -> Option<&PendingDelayedApplication> {
        if self.pending.len() >= capacity {
            return None;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(PendingDelayedApplication {
            record,
            roles,
            offset,
            fire_at,
            sequence,
        });
        self.pending.last()
    }

    /// Removes and returns every application due at or before `now`, ordered by
    /// fire tick and then enqueue order.
    pub fn take_due(&mut self, now: Tick) -> Vec<PendingDelayedApplication> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|pending| pending.fire_at <= now);
        self.pending = waiting;
        due.sort_by_key(|pending| (pending.fire_at, pending.sequence));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingDelayedApplication> {
        self.pending.iter()
    }
}
