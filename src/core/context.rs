//! Context handed to every hook during a transition.

use super::state::State;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// What is happening right now: which event, from where, to where, and with
/// which arguments.
///
/// Hooks only ever see a shared reference, so the argument payload cannot be
/// mutated by one hook behind the back of the next.
#[derive(Clone, Debug)]
pub struct TransitionContext<'a, S: State> {
    pub event: &'a str,
    pub from: &'a S,
    pub to: &'a S,
    pub args: &'a [Value],
    pub started_at: DateTime<Utc>,
}

impl<'a, S: State> TransitionContext<'a, S> {
    pub fn new(event: &'a str, from: &'a S, to: &'a S, args: &'a [Value]) -> Self {
        Self {
            event,
            from,
            to,
            args,
            started_at: Utc::now(),
        }
    }

    /// Positional argument, if the caller supplied one.
    pub fn arg(&self, position: usize) -> Option<&Value> {
        self.args.get(position)
    }

    /// Whether the transition returns to the state it started from.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}
