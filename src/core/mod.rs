//! Core state machine types.
//!
//! This module contains the pieces that never touch a machine's mutable
//! state:
//! - State labels via the `State` trait
//! - The validated, immutable transition table
//! - The context passed to hooks, and guard predicates over it
//! - History records of committed transitions

mod context;
mod error;
mod guard;
mod history;
mod state;
mod table;

pub use context::TransitionContext;
pub use error::{ConfigError, Violation};
pub(crate) use error::{settle, Check};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
pub use table::{TransitionSpec, TransitionTable};
