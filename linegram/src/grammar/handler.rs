//! Collaborator interfaces for the state graph walk

use crate::values::ValueMap;

/// Enables and disables states while a walk is in progress.
///
/// A disabled state is skipped as a transition target until re-enabled.
pub trait StateController<S> {
    fn enable_state(&mut self, id: &S);
    fn disable_state(&mut self, id: &S);
    fn enable_all_states(&mut self);
    fn is_enabled(&self, id: &S) -> bool;
}

/// Receives what a walk matched and where it stopped
pub trait GrammarHandler<S> {
    /// Values captured on entering `state`; `false` rejects the transition
    fn handle_values(&mut self, state: &S, values: &ValueMap) -> bool;

    /// The walk could not continue from `state`; `line` is 1-based
    fn handle_error(&mut self, state: &S, line: usize);

    /// Called after each accepted transition into `current`
    fn update_state(&mut self, _controller: &mut dyn StateController<S>, _current: &S) {}
}
