//! Walking a state graph over a stream

use super::error::{GrammarError, GrammarResult};
use super::graph::{StateGraph, StateId};
use super::handler::{GrammarHandler, StateController};
use crate::config::compile_time::grammar::MAX_WALK_STEPS;
use crate::logging::{codes, try_get_global_logger, Code, LogEvent};
use crate::stream::Stream;
use crate::{log_debug, log_error, log_success};

/// Record where and why a walk stopped short of the end state
fn report_stop(code: Code, message: &str, state: &str, stream: &Stream) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(
            LogEvent::warning_with_code(code, message)
                .with_position(stream.location())
                .with_context("state", state),
        );
    }
}

impl<S: StateId> StateGraph<S> {
    /// Walk from `current` until the end state, a state without outgoing
    /// edges, or a point where the walk cannot continue.
    ///
    /// At each step the enabled targets of the current state are tried in
    /// declaration order and the first whose parser matches is handed to
    /// `handler`. Returns `Ok(true)` when the walk finished, `Ok(false)` after
    /// `handler.handle_error` was told where it stopped. Committed
    /// transitions are never revisited.
    pub fn apply<H>(&mut self, stream: &mut Stream, current: S, handler: &mut H) -> GrammarResult<bool>
    where
        H: GrammarHandler<S> + ?Sized,
    {
        if !self.states.contains(&current) {
            let error = GrammarError::UndefinedState {
                state: format!("{:?}", current),
            };
            log_error!(error.error_code(), "Walk started from an unknown state", "state" => format!("{:?}", current));
            return Err(error);
        }
        if self.preferences.reset_states_on_apply {
            self.switches.enable_all_states();
        }

        let mut current = current;
        let mut steps = 0usize;
        loop {
            let targets = match self.transitions.get(&current) {
                Some(targets) if current != self.end => targets.clone(),
                _ => {
                    log_success!(codes::success::WALK_COMPLETE, "State graph walk complete",
                        "state" => format!("{:?}", current),
                        "transitions" => steps,
                        "line" => stream.line()
                    );
                    return Ok(true);
                }
            };

            if steps >= MAX_WALK_STEPS {
                let error = GrammarError::StepLimitExceeded {
                    limit: MAX_WALK_STEPS,
                };
                log_error!(error.error_code(), "State graph walk did not terminate",
                    position = stream.location(),
                    "state" => format!("{:?}", current)
                );
                return Err(error);
            }

            let mut matched = None;
            for target in &targets {
                if !self.switches.is_enabled(target) {
                    continue;
                }
                let parser = self.parsers.get_mut(target).ok_or_else(|| GrammarError::MissingParser {
                    state: format!("{:?}", target),
                })?;
                if self.preferences.trace_attempts {
                    log_debug!("Trying transition",
                        "from" => format!("{:?}", current),
                        "to" => format!("{:?}", target),
                        "parser" => parser.describe()
                    );
                }
                let before = stream.position();
                if parser.parse(stream)? {
                    matched = Some((target.clone(), before));
                    break;
                }
            }

            let Some((target, before)) = matched else {
                report_stop(
                    codes::grammar::NO_TRANSITION,
                    "No transition matched",
                    &format!("{:?}", current),
                    stream,
                );
                handler.handle_error(&current, stream.line());
                return Ok(false);
            };

            let parser = self.parsers.get(&target).ok_or_else(|| GrammarError::MissingParser {
                state: format!("{:?}", target),
            })?;
            if !handler.handle_values(&target, parser.values()) {
                stream.rewind_to(before);
                report_stop(
                    codes::grammar::VALUES_REJECTED,
                    "Transition rejected by handler",
                    &format!("{:?}", target),
                    stream,
                );
                handler.handle_error(&current, stream.line());
                return Ok(false);
            }

            if let Some(callbacks) = self.callbacks.get_mut(&(current.clone(), target.clone())) {
                for callback in callbacks.iter_mut() {
                    callback(&current, &target, parser.values());
                }
            }
            if self.preferences.log_transitions && crate::logging::is_initialized() {
                log_success!(codes::success::TRANSITION_COMMITTED, "Transition committed",
                    "from" => format!("{:?}", current),
                    "to" => format!("{:?}", target),
                    "line" => stream.line()
                );
            }

            handler.update_state(&mut self.switches, &target);
            steps += 1;
            current = target;
        }
    }
}
