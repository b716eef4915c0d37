//! Machines: the mutable half of the engine.
//!
//! An [`Fsm`] is the shared, read-only definition (transition table plus
//! hooks). Each tracked entity gets its own [`Machine`] from
//! [`Fsm::machine`], which owns the entity's current state and serializes
//! the transitions fired against it.
//!
//! # Example
//!
//! ```rust
//! use waypoint::{FsmBuilder, HookOutcome, TransitionContext};
//!
//! let fsm = FsmBuilder::<String>::new()
//!     .event("pay", ["created"], "paid")
//!     .event("ship", ["paid"], "shipped")
//!     .hook("before_pay", |ctx: &TransitionContext<'_, String>| {
//!         if ctx.args.len() < 2 {
//!             HookOutcome::cancel("invalid payment details")
//!         } else {
//!             HookOutcome::Continue
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! let order = fsm.machine("created".to_string());
//!
//! let err = order.fire("pay", &[]).unwrap_err();
//! assert_eq!(err.reason(), Some("invalid payment details"));
//! assert_eq!(order.current_state(), "created");
//!
//! let paid = order
//!     .fire("pay", &[serde_json::json!("card"), serde_json::json!(100)])
//!     .unwrap();
//! assert_eq!(paid, "paid");
//! ```

mod dispatch;
mod error;
mod instance;

pub use error::FireError;
pub use instance::Machine;

use crate::core::{State, TransitionTable};
use crate::hooks::HookRegistry;
use std::sync::Arc;

pub(crate) struct Definition<S: State> {
    pub(crate) table: TransitionTable<S>,
    pub(crate) hooks: HookRegistry<S>,
    pub(crate) history_limit: Option<usize>,
}

/// Shared state machine definition.
///
/// Cloning is cheap; every clone and every machine built from it refer to
/// the same table and hooks.
pub struct Fsm<S: State = String> {
    definition: Arc<Definition<S>>,
}

impl<S: State> Fsm<S> {
    pub(crate) fn from_parts(
        table: TransitionTable<S>,
        hooks: HookRegistry<S>,
        history_limit: Option<usize>,
    ) -> Self {
        Self {
            definition: Arc::new(Definition {
                table,
                hooks,
                history_limit,
            }),
        }
    }

    /// Create a machine for one entity, starting in `initial`.
    ///
    /// `initial` is not checked against the table: a state with no
    /// outgoing transitions is a valid terminal starting point.
    pub fn machine(&self, initial: S) -> Machine<S> {
        Machine::new(Arc::clone(&self.definition), initial)
    }

    pub fn table(&self) -> &TransitionTable<S> {
        &self.definition.table
    }

    pub fn hooks(&self) -> &HookRegistry<S> {
        &self.definition.hooks
    }
}

impl<S: State> Clone for Fsm<S> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
        }
    }
}

impl<S: State> std::fmt::Debug for Fsm<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("events", &self.definition.table.events())
            .field("hooks", &self.definition.hooks)
            .finish()
    }
}
