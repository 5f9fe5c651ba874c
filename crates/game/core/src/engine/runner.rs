//! Table evaluation: resolve, filter, then dispatch or park each record.

use super::ExecutionOutcome;
use crate::action::{
    self, ActionTable, DispatchContext, TriggerContext, passes_filters, resolve_roles,
};
use crate::env::{ActionOracle, BaseObjectOracle, GameEnv, OracleError};

/// Oracles and limits shared by every table run within one engine call.
pub(super) struct TableRunner<'e> {
    pub actions: &'e dyn ActionOracle,
    pub bases: &'e dyn BaseObjectOracle,
    pub delay_capacity: usize,
    pub max_cascade_depth: u32,
}

impl<'e> TableRunner<'e> {
    pub fn new(env: &GameEnv<'e>) -> Result<Self, OracleError> {
        let config = env.config()?;
        Ok(Self {
            actions: env.actions()?,
            bases: env.bases()?,
            delay_capacity: config.max_delayed_actions(),
            max_cascade_depth: config.max_cascade_depth(),
        })
    }

    /// Evaluates every record of `table` in order.
    ///
    /// A filter miss skips only its own record; later records still run and
    /// see whatever earlier ones changed.
    pub fn run(
        &self,
        ctx: &mut DispatchContext<'_, '_>,
        table: ActionTable,
        trigger: &TriggerContext,
        outcome: &mut ExecutionOutcome,
    ) {
        if table.is_empty() {
            return;
        }
        let Some(records) = self.actions.records(table) else {
            tracing::warn!(
                "table {}..{} reaches past the action pool; skipping",
                table.begin,
                table.end
            );
            return;
        };

        for (index, record) in table.indices().zip(records) {
            let roles = resolve_roles(record, trigger, ctx.state);
            if !passes_filters(record, &roles, &ctx.state.objects) {
                tracing::trace!("record {} filtered out", index.0);
                outcome.filtered.push(index);
                continue;
            }

            if record.delay > 0 {
                let fire_at = ctx.state.clock + u64::from(record.delay);
                let scheduled = ctx.state.delayed.try_schedule(
                    index,
                    roles,
                    trigger.offset,
                    fire_at,
                    self.delay_capacity,
                );
                if scheduled.is_some() {
                    tracing::debug!("record {} scheduled for {}", index.0, fire_at);
                    outcome.scheduled.push((index, fire_at));
                } else {
                    tracing::warn!(
                        "delay queue full ({} pending); dropping record {}",
                        self.delay_capacity,
                        index.0
                    );
                }
                continue;
            }

            tracing::debug!("record {} fired: {}", index.0, record.verb.id());
            action::apply(ctx, index, record, roles, trigger.offset);
            outcome.fired.push(index);
        }
    }
}
