//! Configuration errors raised while building a state machine definition.

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Outcome of one validation step; failures accumulate across steps.
pub(crate) type Check = Validation<(), NonEmptyVec<Violation>>;

/// A single problem found while validating a state machine definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("transition #{position} has an empty event name")]
    EmptyEventName { position: usize },

    #[error("event '{event}' uses an empty state name")]
    EmptyStateName { event: String },

    #[error("event '{event}' declares a transition with no source states")]
    NoSources { event: String },

    #[error("event '{event}' lists source state '{state}' in more than one transition")]
    AmbiguousSource { event: String, state: String },

    #[error("transition event not specified. Call .event(name)")]
    MissingEvent,

    #[error("transition for '{event}' has no destination. Call .to(state)")]
    MissingDestination { event: String },

    #[error("transition for '{event}' has no source states. Call .from(state)")]
    MissingSources { event: String },

    #[error("hook key '{key}' does not name a phase of a declared event or state")]
    UnknownHookKey { key: String },

    #[error("'{label}' is reserved for any-scope hook keys and cannot name an event or state")]
    ReservedLabel { label: String },
}

/// Construction failed; carries every violation found, not just the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid state machine configuration: {}", summarize(.violations))]
pub struct ConfigError {
    pub violations: Vec<Violation>,
}

impl ConfigError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Whether any of the violations matches the predicate.
    pub fn has(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

impl From<Violation> for ConfigError {
    fn from(violation: Violation) -> Self {
        Self::new(vec![violation])
    }
}

/// Fold every check into one result, keeping all violations in order.
pub(crate) fn settle(checks: Vec<Check>) -> Result<(), ConfigError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::new(errors.into_vec())),
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_violation() {
        let error = ConfigError::new(vec![
            Violation::NoSources {
                event: "pay".to_string(),
            },
            Violation::AmbiguousSource {
                event: "ship".to_string(),
                state: "paid".to_string(),
            },
        ]);

        let message = error.to_string();
        assert!(message.contains("'pay' declares a transition with no source states"));
        assert!(message.contains("source state 'paid' in more than one transition"));
    }

    #[test]
    fn settle_keeps_every_failure_in_order() {
        let checks: Vec<Check> = vec![
            Validation::fail(Violation::MissingEvent),
            Validation::success(()),
            Validation::fail(Violation::UnknownHookKey {
                key: "before_refund".to_string(),
            }),
        ];

        let error = settle(checks).unwrap_err();
        assert_eq!(
            error.violations,
            vec![
                Violation::MissingEvent,
                Violation::UnknownHookKey {
                    key: "before_refund".to_string()
                },
            ]
        );
        assert!(settle(vec![Validation::success(())]).is_ok());
    }

    #[test]
    fn single_violation_converts() {
        let error: ConfigError = Violation::MissingEvent.into();
        assert_eq!(error.violations, vec![Violation::MissingEvent]);
        assert!(error.has(|v| matches!(v, Violation::MissingEvent)));
    }
}
