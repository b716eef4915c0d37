//! Builder API for constructing state machine definitions.
//!
//! This module provides fluent builders and macros for declaring transition
//! tables and binding hooks, with every problem reported at build time.

pub mod machine;
pub mod macros;
pub mod transition;

pub use machine::FsmBuilder;
pub use transition::TransitionBuilder;
