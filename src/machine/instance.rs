//! A single entity's state machine.

use super::Definition;
use crate::core::{State, StateHistory, StateTransition};
use std::fmt;
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

pub(super) struct Cell<S: State> {
    pub(super) current: S,
    pub(super) history: StateHistory<S>,
}

/// One entity's lifecycle: its current state plus a dispatch guard.
///
/// `Machine` is `Send + Sync`; wrap it in an `Arc` to fire events from
/// several threads. Transitions on one machine are strictly serialized,
/// while machines built from the same [`Fsm`](super::Fsm) run
/// independently.
///
/// Hooks must not call [`fire`](Machine::fire) on the machine that is running
/// them: the dispatch guard is not reentrant and the call never returns.
/// [`try_fire`](Machine::try_fire) is safe there and reports
/// [`FireError::InTransition`](super::FireError::InTransition). Reading
/// [`current_state`](Machine::current_state) from a hook is always fine.
pub struct Machine<S: State = String> {
    pub(super) definition: Arc<Definition<S>>,
    pub(super) dispatch: Mutex<()>,
    pub(super) cell: RwLock<Cell<S>>,
}

impl<S: State> Machine<S> {
    pub(super) fn new(definition: Arc<Definition<S>>, initial: S) -> Self {
        let history = match definition.history_limit {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        };
        Self {
            definition,
            dispatch: Mutex::new(()),
            cell: RwLock::new(Cell {
                current: initial,
                history,
            }),
        }
    }

    /// Snapshot of the current state.
    ///
    /// Never waits on hooks; it observes either the state before an
    /// in-flight transition or the state after it, nothing in between.
    pub fn current_state(&self) -> S {
        self.read().current.clone()
    }

    pub fn is(&self, state: &S) -> bool {
        self.read().current == *state
    }

    /// Whether the current state is flagged final by [`State::is_final`].
    pub fn is_final(&self) -> bool {
        self.read().current.is_final()
    }

    /// Whether no event is legal from the current state.
    pub fn is_terminal(&self) -> bool {
        let cell = self.read();
        self.definition
            .table
            .available_events(&cell.current)
            .is_empty()
    }

    /// Whether `event` is legal from the current state. Hooks are not
    /// consulted, so a legal event may still be canceled.
    pub fn can(&self, event: &str) -> bool {
        let cell = self.read();
        self.definition.table.resolve(event, &cell.current).is_some()
    }

    pub fn cannot(&self, event: &str) -> bool {
        !self.can(event)
    }

    /// Events legal from the current state, in declaration order.
    pub fn available_events(&self) -> Vec<String> {
        let cell = self.read();
        self.definition
            .table
            .available_events(&cell.current)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Committed transitions so far, oldest first.
    ///
    /// Returns a copy of the whole record. Unless the definition was built
    /// with [`max_history`](crate::FsmBuilder::max_history), the record grows
    /// by one entry per commit for the life of the machine.
    pub fn history(&self) -> StateHistory<S> {
        self.read().history.clone()
    }

    /// The most recent committed transition, copying only that entry.
    pub fn last_transition(&self) -> Option<StateTransition<S>> {
        self.read().history.last().cloned()
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, Cell<S>> {
        self.cell.read()
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, Cell<S>> {
        self.cell.write()
    }
}

impl<S: State> fmt::Debug for Machine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.read();
        f.debug_struct("Machine")
            .field("current", &cell.current)
            .field("transitions", &cell.history.len())
            .finish_non_exhaustive()
    }
}
