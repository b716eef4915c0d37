//! Lifecycle hooks run around each transition.
//!
//! Every transition passes through four phases in a fixed order:
//!
//! ```text
//! before_<event>, before_event      may cancel
//! leave_<src>,    leave_state
//!         -- state committed --
//! enter_<dst>,    enter_state
//! after_<event>,  after_event
//! ```
//!
//! Each phase has a named scope and an any-scope, giving eight hook keys.
//! Hooks are bound at build time and never change while machines run.

mod key;
mod registry;

pub use key::{HookKey, Phase, Scope};
pub use registry::{Hook, HookOutcome, HookRegistry};
