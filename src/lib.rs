//! Waypoint: an embeddable finite state machine engine with lifecycle hooks.
//!
//! A host declares events and the transitions they cause, binds hooks to the
//! phases around each transition, then drives any number of entities through
//! the resulting machine. Any `before` hook may veto a transition; otherwise
//! the new state is committed exactly once.
//!
//! # Core Concepts
//!
//! - **State**: an opaque label via the `State` trait (`String` works as is)
//! - **Transition table**: validated `(event, state) -> state` mapping
//! - **Hooks**: `before`, `leave`, `enter`, `after` phases, per name or for all
//! - **Fsm / Machine**: shared definition, and one machine per entity
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use waypoint::{FsmBuilder, FireError, HookOutcome, TransitionContext};
//!
//! let fsm = FsmBuilder::<String>::new()
//!     .event("pay", ["created"], "paid")
//!     .event("ship", ["paid"], "shipped")
//!     .event("complete", ["shipped"], "completed")
//!     .hook("before_ship", |ctx: &TransitionContext<'_, String>| {
//!         if ctx.args.is_empty() {
//!             HookOutcome::cancel("no tracking number")
//!         } else {
//!             HookOutcome::Continue
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! let order = fsm.machine("created".to_string());
//!
//! assert!(matches!(order.fire("ship", &[]), Err(FireError::NotFound { .. })));
//! assert_eq!(order.fire("pay", &[]).unwrap(), "paid");
//! assert!(order.fire("ship", &[]).unwrap_err().is_canceled());
//! assert_eq!(order.fire("ship", &[json!("1Z999")]).unwrap(), "shipped");
//! assert_eq!(order.current_state(), "shipped");
//! ```

pub mod builder;
pub mod core;
pub mod hooks;
pub mod machine;

// Re-export commonly used types
pub use builder::{FsmBuilder, TransitionBuilder};
pub use crate::core::{
    ConfigError, Guard, State, StateHistory, StateTransition, TransitionContext, TransitionSpec,
    TransitionTable, Violation,
};
pub use hooks::{HookKey, HookOutcome, Phase, Scope};
pub use machine::{FireError, Fsm, Machine};
