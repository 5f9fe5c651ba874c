//! Follow-up processing.
//!
//! Verbs never run tables themselves. Removals and creations are queued on
//! the dispatch context and drained here in waves: each wave may run destroy
//! and create tables, which queue the next wave. Once the wave count reaches
//! the configured cascade depth, remaining removals still happen but no more
//! tables run, so a chain of objects destroying each other always terminates.

use super::ExecutionOutcome;
use super::runner::TableRunner;
use crate::action::{DispatchContext, Effect, FollowUp, Removal, TriggerContext};
use crate::env::TriggerKind;
use crate::state::ObjectHandle;

impl TableRunner<'_> {
    pub fn drain(&self, ctx: &mut DispatchContext<'_, '_>, outcome: &mut ExecutionOutcome) {
        let mut depth = 0;
        while !ctx.follow_ups.is_empty() {
            let wave = std::mem::take(&mut ctx.follow_ups);
            let run_tables = depth < self.max_cascade_depth;
            if depth == self.max_cascade_depth {
                tracing::warn!(
                    "cascade depth {} reached; {} follow-ups applied without tables",
                    depth,
                    wave.len()
                );
            }

            for follow_up in wave {
                match follow_up {
                    FollowUp::Remove { object, removal } => {
                        self.remove(ctx, object, removal, run_tables, outcome);
                    }
                    FollowUp::Created { object } if run_tables => {
                        self.run_object_table(ctx, object, TriggerKind::Create, outcome);
                    }
                    FollowUp::Created { .. } => {}
                }
            }
            depth += 1;
        }
    }

    /// Removes `object`, running its destroy table first when asked to.
    ///
    /// The destroy table sees the object still alive, so records can read its
    /// owner and location. An object already gone is skipped, which also
    /// absorbs duplicate removals queued within one wave.
    fn remove(
        &self,
        ctx: &mut DispatchContext<'_, '_>,
        object: ObjectHandle,
        removal: Removal,
        run_tables: bool,
        outcome: &mut ExecutionOutcome,
    ) {
        if !ctx.state.objects.contains(object) {
            tracing::trace!("{} already removed", object);
            return;
        }
        if removal == Removal::Destroy && run_tables {
            self.run_object_table(ctx, object, TriggerKind::Destroy, outcome);
        }
        if ctx.state.objects.remove(object).is_none() {
            return;
        }
        tracing::debug!("{} removed ({})", object, removal);
        ctx.emit(Effect::ObjectRemoved {
            object,
            destroyed: removal == Removal::Destroy,
        });
    }

    /// Runs one of `object`'s base tables with the object as subject.
    pub fn run_object_table(
        &self,
        ctx: &mut DispatchContext<'_, '_>,
        object: ObjectHandle,
        kind: TriggerKind,
        outcome: &mut ExecutionOutcome,
    ) {
        let Some(base) = ctx.object(Some(object)).map(|object| object.base) else {
            tracing::trace!("{} table skipped: {} is gone", kind, object);
            return;
        };
        let Some(definition) = self.bases.base(base) else {
            tracing::warn!("{} has unknown {}; {} table skipped", object, base, kind);
            return;
        };
        let table = definition.tables.table(kind);
        self.run(ctx, table, &TriggerContext::object(object), outcome);
    }
}
