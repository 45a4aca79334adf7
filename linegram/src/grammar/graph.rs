//! State graph storage and the enable/disable switchboard

use super::handler::StateController;
use crate::config::GrammarPreferences;
use crate::parsers::BoxedParser;
use crate::values::ValueMap;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Anything usable as a state identifier
pub trait StateId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> StateId for T {}

/// Runs after a transition is accepted, with the source, target and values
pub type TransitionCallback<S> = Box<dyn FnMut(&S, &S, &ValueMap)>;

// ============================================================================
// STATE SWITCHES
// ============================================================================

/// Set of disabled states; everything else is enabled
#[derive(Debug, Clone)]
pub struct StateSwitches<S> {
    disabled: HashSet<S>,
}

impl<S> Default for StateSwitches<S> {
    fn default() -> Self {
        Self {
            disabled: HashSet::new(),
        }
    }
}

impl<S: StateId> StateSwitches<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled_count(&self) -> usize {
        self.disabled.len()
    }
}

impl<S: StateId> StateController<S> for StateSwitches<S> {
    fn enable_state(&mut self, id: &S) {
        self.disabled.remove(id);
    }

    fn disable_state(&mut self, id: &S) {
        self.disabled.insert(id.clone());
    }

    fn enable_all_states(&mut self) {
        self.disabled.clear();
    }

    fn is_enabled(&self, id: &S) -> bool {
        !self.disabled.contains(id)
    }
}

// ============================================================================
// STATE GRAPH
// ============================================================================

/// Directed graph of states, each entered by matching its bound parser.
///
/// Built with [`StateGraphBuilder`](super::StateGraphBuilder) and walked
/// with [`StateGraph::apply`].
pub struct StateGraph<S: StateId> {
    pub(super) start: S,
    pub(super) end: S,
    pub(super) states: HashSet<S>,
    pub(super) transitions: HashMap<S, Vec<S>>,
    pub(super) parsers: HashMap<S, BoxedParser>,
    pub(super) callbacks: HashMap<(S, S), Vec<TransitionCallback<S>>>,
    pub(super) switches: StateSwitches<S>,
    pub(super) preferences: GrammarPreferences,
}

impl<S: StateId> StateGraph<S> {
    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn end(&self) -> &S {
        &self.end
    }

    pub fn contains_state(&self, id: &S) -> bool {
        self.states.contains(id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Outgoing targets of `id` in declaration order
    pub fn targets(&self, id: &S) -> &[S] {
        self.transitions.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_parser(&self, id: &S) -> bool {
        self.parsers.contains_key(id)
    }

    /// Values captured by the last match of the parser bound to `id`
    pub fn values(&self, id: &S) -> Option<&ValueMap> {
        self.parsers.get(id).map(|p| p.values())
    }

    pub fn controller(&mut self) -> &mut dyn StateController<S> {
        &mut self.switches
    }

    pub fn is_enabled(&self, id: &S) -> bool {
        self.switches.is_enabled(id)
    }

    /// Re-enable every state
    pub fn reset_states(&mut self) {
        self.switches.enable_all_states();
    }

    pub fn preferences(&self) -> &GrammarPreferences {
        &self.preferences
    }
}

impl<S: StateId> fmt::Debug for StateGraph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateGraph")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("transitions", &self.transitions)
            .field("disabled", &self.switches.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches() {
        let mut switches = StateSwitches::new();
        assert!(switches.is_enabled(&"a"));

        switches.disable_state(&"a");
        switches.disable_state(&"b");
        assert!(!switches.is_enabled(&"a"));
        assert_eq!(switches.disabled_count(), 2);

        switches.enable_state(&"a");
        assert!(switches.is_enabled(&"a"));

        switches.enable_all_states();
        assert!(switches.is_enabled(&"b"));
        assert_eq!(switches.disabled_count(), 0);
    }
}
