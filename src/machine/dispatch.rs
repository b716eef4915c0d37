//! The dispatcher: resolve, run hooks in phase order, commit once.

use super::error::FireError;
use super::instance::Machine;
use crate::core::{State, StateTransition, TransitionContext};
use crate::hooks::{HookOutcome, HookRegistry, Phase};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, trace, warn};

impl<S: State> Machine<S> {
    /// Fire `event` with `args`, blocking while another transition on this
    /// machine is in flight.
    ///
    /// On success returns the new state. On [`FireError::NotFound`] no hook
    /// has run; on [`FireError::Canceled`] only `before` hooks have run. In
    /// both cases the state is unchanged.
    ///
    /// A panicking hook unwinds through this call. The machine stays usable
    /// afterwards; the state has changed only if the panic came from an
    /// `enter` or `after` hook.
    pub fn fire(&self, event: &str, args: &[Value]) -> Result<S, FireError> {
        let _guard = self.dispatch.lock();
        self.transition(event, args)
    }

    /// Like [`fire`](Self::fire), but fails with [`FireError::InTransition`]
    /// instead of waiting for an in-flight transition.
    pub fn try_fire(&self, event: &str, args: &[Value]) -> Result<S, FireError> {
        let Some(_guard) = self.dispatch.try_lock() else {
            debug!(event, "transition already in progress");
            return Err(FireError::InTransition {
                event: event.to_string(),
            });
        };
        self.transition(event, args)
    }

    // Caller holds the dispatch guard.
    fn transition(&self, event: &str, args: &[Value]) -> Result<S, FireError> {
        let definition = &*self.definition;
        let from = self.current_state();

        let Some(to) = definition.table.resolve(event, &from) else {
            debug!(event, state = from.name(), "no transition for event");
            return Err(FireError::NotFound {
                event: event.to_string(),
                state: from.name().to_string(),
            });
        };

        let ctx = TransitionContext::new(event, &from, to, args);
        let hooks = &definition.hooks;

        trace!(event, phase = ?Phase::Before, "running hooks");
        for hook in hooks.phase(Phase::Before, event) {
            if let HookOutcome::Cancel { reason } = hook(&ctx) {
                debug!(event, from = from.name(), to = to.name(), ?reason, "transition canceled");
                return Err(FireError::Canceled {
                    event: event.to_string(),
                    reason,
                });
            }
        }

        observe(hooks, Phase::Leave, from.name(), &ctx);

        {
            let mut cell = self.write();
            cell.current = to.clone();
            cell.history.record(StateTransition {
                event: event.to_string(),
                from: from.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
            });
        }
        debug!(event, from = from.name(), to = to.name(), "transition committed");

        observe(hooks, Phase::Enter, to.name(), &ctx);
        observe(hooks, Phase::After, event, &ctx);

        Ok(to.clone())
    }
}

/// Run a phase that cannot veto; cancellation requests are logged and dropped.
fn observe<S: State>(
    hooks: &HookRegistry<S>,
    phase: Phase,
    name: &str,
    ctx: &TransitionContext<'_, S>,
) {
    trace!(event = ctx.event, ?phase, name, "running hooks");
    for hook in hooks.phase(phase, name) {
        if let HookOutcome::Cancel { reason } = hook(ctx) {
            warn!(
                event = ctx.event,
                ?phase,
                ?reason,
                "cancellation ignored outside the before phase"
            );
        }
    }
}
