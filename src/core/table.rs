//! Static transition table: `(event, source state) -> destination state`.
//!
//! The table is validated once when it is built and never changes afterwards,
//! so any number of machines can read it concurrently without locking.

use super::error::{settle, Check, ConfigError, Violation};
use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;

// Labels that hook keys reserve for the any-scope forms
// (`before_event`, `after_event`, `leave_state`, `enter_state`).
const ANY_EVENT: &str = "event";
const ANY_STATE: &str = "state";

/// Declaration of one event: from any of `sources`, move to `destination`.
///
/// Deserializes from `{"event": .., "src": [..], "dst": ..}` as well as the
/// long field names.
///
/// # Example
///
/// ```rust
/// use waypoint::core::TransitionSpec;
///
/// let spec: TransitionSpec<String> =
///     serde_json::from_str(r#"{"event": "pay", "src": ["created"], "dst": "paid"}"#).unwrap();
///
/// assert_eq!(spec.event, "pay");
/// assert_eq!(spec.destination, "paid");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionSpec<S: State> {
    pub event: String,
    #[serde(alias = "src")]
    pub sources: Vec<S>,
    #[serde(alias = "dst")]
    pub destination: S,
}

impl<S: State> TransitionSpec<S> {
    pub fn new(event: impl Into<String>, sources: Vec<S>, destination: S) -> Self {
        Self {
            event: event.into(),
            sources,
            destination,
        }
    }
}

/// Validated, immutable transition table.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State> {
    index: HashMap<String, HashMap<S, S>>,
    events: Vec<String>,
    states: Vec<S>,
}

impl<S: State> TransitionTable<S> {
    /// Build and validate a table from declarations in order.
    ///
    /// All problems are collected before failing, so the returned
    /// [`ConfigError`] lists every empty label, every reserved label and
    /// every overlapping source.
    pub fn new(specs: Vec<TransitionSpec<S>>) -> Result<Self, ConfigError> {
        let (table, checks) = Self::assemble(specs);
        settle(checks).map(|()| table)
    }

    /// Index the declarations without failing, returning the checks that
    /// decide whether the table is usable.
    ///
    /// The labels are indexed even when a check fails, so hook keys can still
    /// be validated against them in the same pass.
    pub(crate) fn assemble(specs: Vec<TransitionSpec<S>>) -> (Self, Vec<Check>) {
        let mut checks: Vec<Check> = Vec::new();
        let mut index: HashMap<String, HashMap<S, S>> = HashMap::new();
        let mut events = Vec::new();
        let mut states = Vec::new();
        let mut seen_states = HashSet::new();

        let mut note_state = |state: &S, checks: &mut Vec<Check>| {
            if seen_states.insert(state.clone()) {
                checks.push(check_reserved(state.name(), ANY_STATE));
                states.push(state.clone());
            }
        };

        for (position, spec) in specs.into_iter().enumerate() {
            checks.push(check_labels(position, &spec));
            if spec.sources.is_empty() {
                checks.push(Validation::fail(Violation::NoSources {
                    event: spec.event.clone(),
                }));
            }

            if !index.contains_key(&spec.event) {
                checks.push(check_reserved(&spec.event, ANY_EVENT));
                events.push(spec.event.clone());
            }
            let by_state = index.entry(spec.event.clone()).or_default();

            let mut own_sources = HashSet::new();
            for source in spec.sources {
                if !own_sources.insert(source.clone()) {
                    continue;
                }
                note_state(&source, &mut checks);
                match by_state.entry(source) {
                    Entry::Occupied(taken) => {
                        checks.push(Validation::fail(Violation::AmbiguousSource {
                            event: spec.event.clone(),
                            state: taken.key().name().to_string(),
                        }));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(spec.destination.clone());
                    }
                }
            }

            note_state(&spec.destination, &mut checks);
        }

        let table = Self {
            index,
            events,
            states,
        };
        (table, checks)
    }

    /// Destination for `event` fired from `current`, or `None` if the event
    /// is not legal there.
    pub fn resolve(&self, event: &str, current: &S) -> Option<&S> {
        self.index.get(event)?.get(current)
    }

    /// Declared events, in first-declaration order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Every state used as a source or destination, in first-seen order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn contains_event(&self, event: &str) -> bool {
        self.index.contains_key(event)
    }

    /// Whether some state with this label appears in the table.
    pub fn contains_state(&self, name: &str) -> bool {
        self.states.iter().any(|s| s.name() == name)
    }

    /// Events that are legal from `state`, in declaration order.
    pub fn available_events(&self, state: &S) -> Vec<&str> {
        self.events
            .iter()
            .filter(|event| self.resolve(event, state).is_some())
            .map(String::as_str)
            .collect()
    }
}

fn check_reserved(label: &str, reserved: &str) -> Check {
    if label == reserved {
        Validation::fail(Violation::ReservedLabel {
            label: label.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn check_labels<S: State>(position: usize, spec: &TransitionSpec<S>) -> Check {
    if spec.event.is_empty() {
        return Validation::fail(Violation::EmptyEventName { position });
    }
    let empty_state = spec
        .sources
        .iter()
        .chain(std::iter::once(&spec.destination))
        .any(|s| s.name().is_empty());
    if empty_state {
        Validation::fail(Violation::EmptyStateName {
            event: spec.event.clone(),
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(event: &str, sources: &[&str], destination: &str) -> TransitionSpec<String> {
        TransitionSpec::new(
            event,
            sources.iter().map(|s| s.to_string()).collect(),
            destination.to_string(),
        )
    }

    fn order_table() -> TransitionTable<String> {
        TransitionTable::new(vec![
            spec("pay", &["created"], "paid"),
            spec("ship", &["paid"], "shipped"),
            spec("complete", &["shipped"], "completed"),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_legal_pairs() {
        let table = order_table();

        assert_eq!(
            table.resolve("pay", &"created".to_string()),
            Some(&"paid".to_string())
        );
        assert_eq!(
            table.resolve("complete", &"shipped".to_string()),
            Some(&"completed".to_string())
        );
    }

    #[test]
    fn illegal_pairs_are_not_found() {
        let table = order_table();

        assert!(table.resolve("pay", &"paid".to_string()).is_none());
        assert!(table.resolve("ship", &"created".to_string()).is_none());
        assert!(table.resolve("refund", &"created".to_string()).is_none());
    }

    #[test]
    fn one_event_may_leave_several_states() {
        let table = TransitionTable::new(vec![
            spec("cancel", &["created", "paid"], "canceled"),
            spec("cancel", &["shipped"], "returning"),
        ])
        .unwrap();

        assert_eq!(
            table.resolve("cancel", &"paid".to_string()),
            Some(&"canceled".to_string())
        );
        assert_eq!(
            table.resolve("cancel", &"shipped".to_string()),
            Some(&"returning".to_string())
        );
        assert_eq!(table.events(), &["cancel".to_string()]);
    }

    #[test]
    fn overlapping_sources_are_rejected() {
        let result = TransitionTable::new(vec![
            spec("cancel", &["created", "paid"], "canceled"),
            spec("cancel", &["paid"], "refunded"),
        ]);

        let error = result.unwrap_err();
        assert_eq!(
            error.violations,
            vec![Violation::AmbiguousSource {
                event: "cancel".to_string(),
                state: "paid".to_string(),
            }]
        );
    }

    #[test]
    fn repeated_source_within_one_transition_is_collapsed() {
        let table = TransitionTable::new(vec![spec("pay", &["created", "created"], "paid")]);
        assert!(table.is_ok());
    }

    #[test]
    fn same_source_under_different_events_is_fine() {
        let table = TransitionTable::new(vec![
            spec("pay", &["created"], "paid"),
            spec("cancel", &["created"], "canceled"),
        ])
        .unwrap();

        assert_eq!(
            table.available_events(&"created".to_string()),
            vec!["pay", "cancel"]
        );
    }

    #[test]
    fn all_violations_are_accumulated() {
        let result = TransitionTable::new(vec![
            spec("", &["a"], "b"),
            spec("go", &[""], "b"),
            spec("stop", &[], "b"),
            spec("go", &["a"], "c"),
            spec("go", &["a"], "d"),
        ]);

        let error = result.unwrap_err();
        assert_eq!(error.violations.len(), 4);
        assert!(error.has(|v| matches!(v, Violation::EmptyEventName { position: 0 })));
        assert!(error.has(|v| matches!(v, Violation::EmptyStateName { .. })));
        assert!(error.has(|v| matches!(v, Violation::NoSources { .. })));
        assert!(error.has(|v| matches!(v, Violation::AmbiguousSource { .. })));
    }

    #[test]
    fn labels_shadowed_by_any_scope_keys_are_rejected() {
        let result = TransitionTable::new(vec![
            spec("event", &["idle"], "state"),
            spec("reset", &["state"], "idle"),
        ]);

        let error = result.unwrap_err();
        assert_eq!(
            error.violations,
            vec![
                Violation::ReservedLabel {
                    label: "event".to_string()
                },
                Violation::ReservedLabel {
                    label: "state".to_string()
                },
            ]
        );
    }

    #[test]
    fn reserved_words_in_the_other_namespace_are_fine() {
        let table = TransitionTable::new(vec![spec("state", &["event"], "done")]).unwrap();
        assert!(table.contains_event("state"));
        assert!(table.contains_state("event"));
    }

    #[test]
    fn assemble_indexes_labels_of_an_invalid_table() {
        let (table, checks) = TransitionTable::assemble(vec![
            spec("pay", &["created"], "paid"),
            spec("pay", &["created"], "refunded"),
        ]);

        assert!(settle(checks).is_err());
        assert!(table.contains_event("pay"));
        assert!(table.contains_state("refunded"));
    }

    #[test]
    fn states_are_listed_in_first_seen_order() {
        let table = order_table();
        assert_eq!(
            table.states(),
            &["created", "paid", "shipped", "completed"].map(String::from)
        );
        assert!(table.contains_state("shipped"));
        assert!(!table.contains_state("lost"));
        assert!(table.contains_event("ship"));
    }

    #[test]
    fn terminal_state_has_no_available_events() {
        let table = order_table();
        assert!(table.available_events(&"completed".to_string()).is_empty());
    }

    #[test]
    fn specs_load_from_json() {
        let specs: Vec<TransitionSpec<String>> = serde_json::from_str(
            r#"[
                {"event": "pay", "src": ["created"], "dst": "paid"},
                {"event": "ship", "sources": ["paid"], "destination": "shipped"}
            ]"#,
        )
        .unwrap();

        let table = TransitionTable::new(specs).unwrap();
        assert_eq!(
            table.resolve("ship", &"paid".to_string()),
            Some(&"shipped".to_string())
        );
    }
}
