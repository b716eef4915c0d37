//! Builder for constructing state machine definitions.

use crate::builder::transition::TransitionBuilder;
use crate::core::{
    settle, ConfigError, Guard, State, TransitionContext, TransitionSpec, TransitionTable,
    Violation,
};
use crate::hooks::{Hook, HookKey, HookOutcome, HookRegistry};
use crate::machine::Fsm;
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::debug;

enum PendingKey {
    Typed(HookKey),
    Raw(String),
}

impl PendingKey {
    fn resolve<S: State>(
        self,
        table: &TransitionTable<S>,
    ) -> Result<HookKey, Violation> {
        match self {
            PendingKey::Typed(key) => key.validate(table).map(|()| key),
            PendingKey::Raw(raw) => HookKey::parse(&raw, table),
        }
    }
}

/// Builder for an [`Fsm`] with a fluent API.
///
/// Transitions and hooks are collected in order and validated together by
/// [`build`](Self::build). Hooks bound to the same key run in the order they
/// were added here.
pub struct FsmBuilder<S: State = String> {
    transitions: Vec<TransitionSpec<S>>,
    hooks: Vec<(PendingKey, Hook<S>)>,
    history_limit: Option<usize>,
}

impl<S: State> FsmBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            hooks: Vec::new(),
            history_limit: None,
        }
    }

    /// Declare `name` as moving from any of `sources` to `destination`.
    pub fn event(
        mut self,
        name: impl Into<String>,
        sources: impl IntoIterator<Item = impl Into<S>>,
        destination: impl Into<S>,
    ) -> Self {
        self.transitions.push(TransitionSpec::new(
            name,
            sources.into_iter().map(Into::into).collect(),
            destination.into(),
        ));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S>) -> Result<Self, ConfigError> {
        let spec = builder.build()?;
        self.transitions.push(spec);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, spec: TransitionSpec<S>) -> Self {
        self.transitions.push(spec);
        self
    }

    /// Add multiple transitions at once, e.g. loaded with serde.
    pub fn transitions(mut self, specs: impl IntoIterator<Item = TransitionSpec<S>>) -> Self {
        self.transitions.extend(specs);
        self
    }

    /// Bind a hook to a typed key.
    pub fn on<F>(mut self, key: HookKey, hook: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.push((PendingKey::Typed(key), Arc::new(hook)));
        self
    }

    /// Bind a hook to a key string such as `before_pay` or `enter_state`.
    ///
    /// The key is resolved against the declared events and states when the
    /// machine is built; see [`HookKey::parse`] for the accepted forms.
    pub fn hook<F>(mut self, key: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.push((PendingKey::Raw(key.into()), Arc::new(hook)));
        self
    }

    /// Bind a hook that only watches and never cancels.
    pub fn observe<F>(self, key: impl Into<String>, observer: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) + Send + Sync + 'static,
    {
        self.hook(key, move |ctx: &TransitionContext<'_, S>| {
            observer(ctx);
            HookOutcome::Continue
        })
    }

    /// Cancel `event` with `reason` whenever `guard` rejects it.
    ///
    /// Runs as a `before_<event>` hook, in order with the other hooks on that
    /// key.
    pub fn guard(self, event: impl Into<String>, guard: Guard<S>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.on(HookKey::before(event), move |ctx: &TransitionContext<'_, S>| {
            if guard.check(ctx) {
                HookOutcome::Continue
            } else {
                HookOutcome::cancel(reason.clone())
            }
        })
    }

    /// Keep at most `limit` transitions in each machine's history.
    pub fn max_history(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Validate the table and hook keys and build the shared definition.
    ///
    /// Hook keys are checked against the declared labels even when the table
    /// itself is invalid, so one error lists every problem.
    pub fn build(self) -> Result<Fsm<S>, ConfigError> {
        let (table, mut checks) = TransitionTable::assemble(self.transitions);

        let mut registry = HookRegistry::new();
        for (key, hook) in self.hooks {
            checks.push(match key.resolve(&table) {
                Ok(key) => {
                    registry.register(key, hook);
                    Validation::success(())
                }
                Err(violation) => Validation::fail(violation),
            });
        }
        settle(checks)?;

        debug!(
            events = table.events().len(),
            states = table.states().len(),
            hooks = registry.len(),
            "state machine built"
        );
        Ok(Fsm::from_parts(table, registry, self.history_limit))
    }
}

impl<S: State> Default for FsmBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
