//! Builder for constructing transition declarations.

use crate::core::{ConfigError, State, TransitionSpec, Violation};

/// Builder for one event's transition with a fluent API.
///
/// # Example
///
/// ```
/// use waypoint::builder::TransitionBuilder;
///
/// let spec = TransitionBuilder::<String>::new()
///     .event("cancel")
///     .from("created")
///     .from("paid")
///     .to("canceled")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.sources, vec!["created", "paid"]);
/// ```
pub struct TransitionBuilder<S: State> {
    event: Option<String>,
    sources: Vec<S>,
    destination: Option<S>,
}

impl<S: State> TransitionBuilder<S> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            event: None,
            sources: Vec::new(),
            destination: None,
        }
    }

    /// Set the event name (required).
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.event = Some(name.into());
        self
    }

    /// Add a source state (at least one required).
    pub fn from(mut self, state: impl Into<S>) -> Self {
        self.sources.push(state.into());
        self
    }

    /// Add several source states at once.
    pub fn from_any(mut self, states: impl IntoIterator<Item = impl Into<S>>) -> Self {
        self.sources.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<S>) -> Self {
        self.destination = Some(state.into());
        self
    }

    /// Build the declaration, reporting every missing part at once.
    pub fn build(self) -> Result<TransitionSpec<S>, ConfigError> {
        let mut violations = Vec::new();
        let event = self.event.unwrap_or_default();
        if event.is_empty() {
            violations.push(Violation::MissingEvent);
        }
        if self.sources.is_empty() {
            violations.push(Violation::MissingSources {
                event: event.clone(),
            });
        }
        let Some(destination) = self.destination else {
            violations.push(Violation::MissingDestination { event });
            return Err(ConfigError::new(violations));
        };
        if !violations.is_empty() {
            return Err(ConfigError::new(violations));
        }

        Ok(TransitionSpec {
            event,
            sources: self.sources,
            destination,
        })
    }
}

impl<S: State> Default for TransitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
