//! Table execution and the per-tick delay step.
//!
//! The [`ActionEngine`] is the only writer of [`GameState`] during action
//! evaluation. Hosts call it in three situations:
//!
//! - [`ActionEngine::execute`] when something runs an arbitrary table now,
//! - [`ActionEngine::trigger`] when a game event fires one of an object's
//!   base tables (collision, arrival, activation, ...),
//! - [`ActionEngine::step`] exactly once per simulation tick, to advance the
//!   clock and fire delayed records that came due.
//!
//! Each call evaluates its records in order, then drains the removals and
//! creations they queued before returning.

mod cascade;
mod errors;
mod runner;

pub use errors::ExecuteError;

use runner::TableRunner;

use crate::action::{
    self, ActionTable, DelayState, DispatchContext, Effect, RecordIndex, TriggerContext,
};
use crate::env::{GameEnv, TriggerKind};
use crate::state::{GameState, ObjectHandle, Tick};

/// Everything an engine call did, in order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Host-visible side effects, in the order they happened.
    pub effects: Vec<Effect>,

    /// Records dispatched, including delayed ones that fired.
    pub fired: Vec<RecordIndex>,

    /// Records skipped by their attribute or owner filter.
    pub filtered: Vec<RecordIndex>,

    /// Records parked in the delay queue, with their fire tick.
    pub scheduled: Vec<(RecordIndex, Tick)>,

    /// Delayed applications that came due, and whether they fired.
    pub delayed: Vec<(RecordIndex, DelayState)>,
}

impl ExecutionOutcome {
    /// True if nothing fired, was scheduled, or came due.
    pub fn is_quiet(&self) -> bool {
        self.effects.is_empty()
            && self.fired.is_empty()
            && self.scheduled.is_empty()
            && self.delayed.is_empty()
    }
}

/// Runs action tables against a game state.
pub struct ActionEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> ActionEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Evaluates `table` against `trigger` right now.
    ///
    /// Tables reaching past the action pool are logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if `env` is missing an oracle.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        table: ActionTable,
        trigger: &TriggerContext,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let runner = TableRunner::new(&env)?;
        let mut ctx = DispatchContext::new(self.state, &env)?;
        let mut outcome = ExecutionOutcome::default();

        runner.run(&mut ctx, table, trigger, &mut outcome);
        runner.drain(&mut ctx, &mut outcome);

        outcome.effects = ctx.effects;
        Ok(outcome)
    }

    /// Runs `object`'s base table for `kind`, with `direct` as the direct
    /// object when the event involves one.
    ///
    /// A dead `object` runs nothing.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if `env` is missing an oracle.
    pub fn trigger(
        &mut self,
        env: GameEnv<'_>,
        object: ObjectHandle,
        kind: TriggerKind,
        direct: Option<ObjectHandle>,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let Some(base) = self.state.objects.get(object).map(|object| object.base) else {
            tracing::trace!("{} trigger on dead {}", kind, object);
            return Ok(ExecutionOutcome::default());
        };
        let Some(definition) = env.bases()?.base(base) else {
            tracing::warn!("{} has unknown {}; {} trigger ignored", object, base, kind);
            return Ok(ExecutionOutcome::default());
        };

        let table = definition.tables.table(kind);
        tracing::debug!("{} trigger on {}", kind, object);
        self.execute(env, table, &TriggerContext::between(object, direct))
    }

    /// Advances the clock one tick and settles every delayed application
    /// that is now due.
    ///
    /// An application whose captured subject died is cancelled; otherwise it
    /// dispatches against its re-validated roles. Filters were already
    /// checked when it was scheduled and are not checked again.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if `env` is missing an oracle.
    pub fn step(&mut self, env: GameEnv<'_>) -> Result<ExecutionOutcome, ExecuteError> {
        let runner = TableRunner::new(&env)?;
        let mut ctx = DispatchContext::new(self.state, &env)?;
        let mut outcome = ExecutionOutcome::default();

        ctx.state.clock = ctx.state.clock + 1;
        let now = ctx.state.clock;

        for pending in ctx.state.delayed.take_due(now) {
            let (fate, roles) = pending.settle(&ctx.state.objects);
            outcome.delayed.push((pending.record, fate));

            if fate == DelayState::Cancelled {
                tracing::debug!("delayed record {} cancelled at {}", pending.record.0, now);
                continue;
            }
            let Some(record) = runner.actions.record(pending.record) else {
                tracing::warn!("delayed record {} is outside the action pool", pending.record.0);
                continue;
            };
            tracing::debug!("delayed record {} fired at {}", pending.record.0, now);
            action::apply(&mut ctx, pending.record, record, roles, pending.offset);
            outcome.fired.push(pending.record);
        }
        runner.drain(&mut ctx, &mut outcome);

        outcome.effects = ctx.effects;
        Ok(outcome)
    }
}
