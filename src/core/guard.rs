//! Guard predicates for vetoing transitions.
//!
//! A guard is a pure boolean function over the transition in progress. When
//! registered through `FsmBuilder::guard` it runs as a `before_<event>` hook
//! and cancels the transition whenever the predicate returns `false`.

use super::context::TransitionContext;
use super::state::State;

/// Pure predicate that determines if a transition may proceed.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Guard, TransitionContext};
/// use serde_json::json;
///
/// let has_payment_details =
///     Guard::new(|ctx: &TransitionContext<'_, String>| ctx.args.len() >= 2);
///
/// let (from, to) = ("created".to_string(), "paid".to_string());
/// let args = [json!("card"), json!(100)];
///
/// assert!(has_payment_details.check(&TransitionContext::new("pay", &from, &to, &args)));
/// assert!(!has_payment_details.check(&TransitionContext::new("pay", &from, &to, &[])));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&TransitionContext<'_, S>) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows this transition.
    pub fn check(&self, ctx: &TransitionContext<'_, S>) -> bool {
        (self.predicate)(ctx)
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
