//! Errors returned by `Machine::fire`.

use thiserror::Error;

/// Why a fired event did not change the machine's state.
///
/// In every case the state is exactly what it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FireError {
    #[error("event '{event}' inappropriate in current state '{state}'")]
    NotFound { event: String, state: String },

    #[error("transition '{event}' canceled{}", describe(.reason))]
    Canceled {
        event: String,
        reason: Option<String>,
    },

    #[error("event '{event}' rejected: another transition is in progress")]
    InTransition { event: String },
}

impl FireError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Reason attached by the hook that canceled the transition.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Canceled { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

fn describe(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {r}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_event_and_state() {
        let not_found = FireError::NotFound {
            event: "pay".to_string(),
            state: "paid".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "event 'pay' inappropriate in current state 'paid'"
        );

        let canceled = FireError::Canceled {
            event: "pay".to_string(),
            reason: Some("invalid payment details".to_string()),
        };
        assert_eq!(
            canceled.to_string(),
            "transition 'pay' canceled: invalid payment details"
        );
        assert_eq!(canceled.reason(), Some("invalid payment details"));

        let silent = FireError::Canceled {
            event: "pay".to_string(),
            reason: None,
        };
        assert_eq!(silent.to_string(), "transition 'pay' canceled");
        assert!(silent.is_canceled());
        assert!(!silent.is_not_found());
    }
}
