//! Validating construction of state graphs

use super::error::{GrammarError, GrammarResult};
use super::graph::{StateGraph, StateId, StateSwitches, TransitionCallback};
use crate::config::compile_time::grammar::MAX_STATES;
use crate::config::GrammarPreferences;
use crate::logging::codes;
use crate::parsers::BoxedParser;
use crate::values::ValueMap;
use crate::{log_error, log_success};
use std::collections::{HashMap, HashSet};

/// Collects states, parsers and transitions, then checks them in `build`
pub struct StateGraphBuilder<S: StateId> {
    start: Option<S>,
    end: Option<S>,
    parsers: HashMap<S, BoxedParser>,
    transitions: Vec<(S, S)>,
    callbacks: Vec<(S, S, TransitionCallback<S>)>,
    preferences: Option<GrammarPreferences>,
}

impl<S: StateId> Default for StateGraphBuilder<S> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            parsers: HashMap::new(),
            transitions: Vec::new(),
            callbacks: Vec::new(),
            preferences: None,
        }
    }
}

impl<S: StateId> StateGraphBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, id: S) -> Self {
        self.start = Some(id);
        self
    }

    pub fn end(mut self, id: S) -> Self {
        self.end = Some(id);
        self
    }

    /// Bind the parser matched on entering `id`; rebinding replaces it
    pub fn state(mut self, id: S, parser: BoxedParser) -> Self {
        self.parsers.insert(id, parser);
        self
    }

    /// Add an edge; targets of one source are tried in the order added
    pub fn transition(mut self, from: S, to: S) -> Self {
        self.transitions.push((from, to));
        self
    }

    pub fn transitions(mut self, edges: &[(S, S)]) -> Self {
        self.transitions.extend(edges.iter().cloned());
        self
    }

    /// Run `callback` each time the `from -> to` edge is accepted
    pub fn on_transition<F>(mut self, from: S, to: S, callback: F) -> Self
    where
        F: FnMut(&S, &S, &ValueMap) + 'static,
    {
        self.callbacks.push((from, to, Box::new(callback)));
        self
    }

    pub fn preferences(mut self, preferences: GrammarPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn build(self) -> GrammarResult<StateGraph<S>> {
        let result = self.assemble();
        match &result {
            Ok(graph) => {
                log_success!(codes::success::GRAMMAR_BUILT, "State graph built",
                    "states" => graph.state_count(),
                    "start" => format!("{:?}", graph.start),
                    "end" => format!("{:?}", graph.end)
                );
            }
            Err(e) => {
                log_error!(e.error_code(), "State graph rejected", "error" => e);
            }
        }
        result
    }

    fn assemble(self) -> GrammarResult<StateGraph<S>> {
        let start = self.start.ok_or(GrammarError::MissingStartState)?;
        let end = self.end.ok_or(GrammarError::MissingEndState)?;

        let mut states: HashSet<S> = HashSet::new();
        states.insert(start.clone());
        states.insert(end.clone());
        states.extend(self.parsers.keys().cloned());
        for (from, to) in &self.transitions {
            states.insert(from.clone());
            states.insert(to.clone());
        }
        if states.len() > MAX_STATES {
            return Err(GrammarError::TooManyStates {
                count: states.len(),
                limit: MAX_STATES,
            });
        }

        let mut transitions: HashMap<S, Vec<S>> = HashMap::new();
        for (from, to) in self.transitions {
            if !self.parsers.contains_key(&to) {
                return Err(GrammarError::MissingParser {
                    state: format!("{:?}", to),
                });
            }
            let targets = transitions.entry(from.clone()).or_default();
            if targets.contains(&to) {
                return Err(GrammarError::DuplicateTransition {
                    from: format!("{:?}", from),
                    to: format!("{:?}", to),
                });
            }
            targets.push(to);
        }

        let mut callbacks: HashMap<(S, S), Vec<TransitionCallback<S>>> = HashMap::new();
        for (from, to, callback) in self.callbacks {
            let declared = transitions
                .get(&from)
                .is_some_and(|targets| targets.contains(&to));
            if !declared {
                return Err(GrammarError::UndefinedTransition {
                    from: format!("{:?}", from),
                    to: format!("{:?}", to),
                });
            }
            callbacks.entry((from, to)).or_default().push(callback);
        }

        Ok(StateGraph {
            start,
            end,
            states,
            transitions,
            parsers: self.parsers,
            callbacks,
            switches: StateSwitches::new(),
            preferences: self.preferences.unwrap_or_default(),
        })
    }
}
