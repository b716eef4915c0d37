//! Ordered hook storage, keyed by phase and scope.

use super::key::{HookKey, Phase, Scope};
use crate::core::{State, TransitionContext};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a hook asks the dispatcher to do next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HookOutcome {
    /// Carry on with the transition.
    #[default]
    Continue,
    /// Veto the transition. Honored only in the `before` phase.
    Cancel { reason: Option<String> },
}

impl HookOutcome {
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::Cancel {
            reason: Some(reason.into()),
        }
    }

    pub fn cancel_silently() -> Self {
        Self::Cancel { reason: None }
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Self::Cancel { .. })
    }
}

/// Callback run at one phase of a transition.
pub type Hook<S> = Arc<dyn Fn(&TransitionContext<'_, S>) -> HookOutcome + Send + Sync>;

/// Hooks grouped by phase, named hooks separate from any-scope hooks.
///
/// Within one key, hooks run in the order they were registered.
pub struct HookRegistry<S: State> {
    named: [HashMap<String, Vec<Hook<S>>>; 4],
    any: [Vec<Hook<S>>; 4],
}

impl<S: State> Default for HookRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HookRegistry<S> {
    pub fn new() -> Self {
        Self {
            named: Default::default(),
            any: Default::default(),
        }
    }

    pub fn register(&mut self, key: HookKey, hook: Hook<S>) {
        let slot = key.phase.index();
        match key.scope {
            Scope::Any => self.any[slot].push(hook),
            Scope::Named(target) => self.named[slot].entry(target).or_default().push(hook),
        }
    }

    /// Hooks bound to exactly this key, in registration order.
    pub fn hooks_for(&self, key: &HookKey) -> &[Hook<S>] {
        let slot = key.phase.index();
        match &key.scope {
            Scope::Any => self.any[slot].as_slice(),
            Scope::Named(target) => self.named[slot]
                .get(target)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Everything that runs for `phase` on `target`: the hooks named for it
    /// first, then the any-scope hooks.
    pub fn phase<'a>(&'a self, phase: Phase, target: &str) -> impl Iterator<Item = &'a Hook<S>> {
        let slot = phase.index();
        let named = self.named[slot]
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        named.iter().chain(self.any[slot].iter())
    }

    pub fn len(&self) -> usize {
        let named: usize = self
            .named
            .iter()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum();
        named + self.any.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: State> fmt::Debug for HookRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.len())
            .finish_non_exhaustive()
    }
}
