//! Hook keys: a lifecycle phase plus the event or state it is bound to.

use crate::core::{State, TransitionTable, Violation};
use std::fmt;

/// Lifecycle phase of a transition, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the transition; the only phase whose hooks can cancel.
    Before,
    /// Leaving the source state, before commit.
    Leave,
    /// Entering the destination state, after commit.
    Enter,
    /// After the transition has completed.
    After,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Before, Phase::Leave, Phase::Enter, Phase::After];

    pub fn can_cancel(self) -> bool {
        matches!(self, Phase::Before)
    }

    /// Before/after hooks are qualified by event name, leave/enter by state name.
    pub fn qualifies_events(self) -> bool {
        matches!(self, Phase::Before | Phase::After)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Phase::Before => 0,
            Phase::Leave => 1,
            Phase::Enter => 2,
            Phase::After => 3,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Phase::Before => "before_",
            Phase::Leave => "leave_",
            Phase::Enter => "enter_",
            Phase::After => "after_",
        }
    }

    fn any_target(self) -> &'static str {
        if self.qualifies_events() {
            "event"
        } else {
            "state"
        }
    }
}

/// Which events or states a hook applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Any,
    Named(String),
}

/// One of the eight hook categories: [`Phase`] times [`Scope`].
///
/// Renders as the conventional key string, e.g. `before_pay`,
/// `before_event`, `leave_created`, `enter_state`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HookKey {
    pub phase: Phase,
    pub scope: Scope,
}

impl HookKey {
    pub fn new(phase: Phase, scope: Scope) -> Self {
        Self { phase, scope }
    }

    pub fn before(event: impl Into<String>) -> Self {
        Self::new(Phase::Before, Scope::Named(event.into()))
    }

    pub fn before_any() -> Self {
        Self::new(Phase::Before, Scope::Any)
    }

    pub fn leave(state: impl Into<String>) -> Self {
        Self::new(Phase::Leave, Scope::Named(state.into()))
    }

    pub fn leave_any() -> Self {
        Self::new(Phase::Leave, Scope::Any)
    }

    pub fn enter(state: impl Into<String>) -> Self {
        Self::new(Phase::Enter, Scope::Named(state.into()))
    }

    pub fn enter_any() -> Self {
        Self::new(Phase::Enter, Scope::Any)
    }

    pub fn after(event: impl Into<String>) -> Self {
        Self::new(Phase::After, Scope::Named(event.into()))
    }

    pub fn after_any() -> Self {
        Self::new(Phase::After, Scope::Any)
    }

    /// Resolve a key string against the declared events and states.
    ///
    /// Accepts the eight prefixed forms. A bare state name is shorthand for
    /// `enter_<state>` and a bare event name for `after_<event>`; a name that
    /// is both resolves to the state. `before_event`, `leave_state`,
    /// `enter_state` and `after_event` always mean the any-scope key.
    pub fn parse<S: State>(key: &str, table: &TransitionTable<S>) -> Result<Self, Violation> {
        for phase in Phase::ALL {
            let Some(target) = key.strip_prefix(phase.prefix()) else {
                continue;
            };
            if target == phase.any_target() {
                return Ok(Self::new(phase, Scope::Any));
            }
            if is_declared(phase, target, table) {
                return Ok(Self::new(phase, Scope::Named(target.to_string())));
            }
        }

        if table.contains_state(key) {
            Ok(Self::enter(key))
        } else if table.contains_event(key) {
            Ok(Self::after(key))
        } else {
            Err(Violation::UnknownHookKey {
                key: key.to_string(),
            })
        }
    }

    /// Check that a named scope refers to something the table declares.
    pub fn validate<S: State>(&self, table: &TransitionTable<S>) -> Result<(), Violation> {
        match &self.scope {
            Scope::Any => Ok(()),
            Scope::Named(target) if is_declared(self.phase, target, table) => Ok(()),
            Scope::Named(_) => Err(Violation::UnknownHookKey {
                key: self.to_string(),
            }),
        }
    }
}

fn is_declared<S: State>(phase: Phase, target: &str, table: &TransitionTable<S>) -> bool {
    if phase.qualifies_events() {
        table.contains_event(target)
    } else {
        table.contains_state(target)
    }
}

impl fmt::Display for HookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::Any => write!(f, "{}{}", self.phase.prefix(), self.phase.any_target()),
            Scope::Named(target) => write!(f, "{}{}", self.phase.prefix(), target),
        }
    }
}
