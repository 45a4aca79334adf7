//! State graph grammars
//!
//! A [`StateGraph`] describes a line-oriented format as states joined by
//! transitions. Entering a state means matching its parser; a
//! [`GrammarHandler`] sees every match and decides whether the walk may
//! continue.

pub mod builder;
pub mod driver;
pub mod error;
pub mod graph;
pub mod handler;

pub use builder::StateGraphBuilder;
pub use error::{GrammarError, GrammarResult};
pub use graph::{StateGraph, StateId, StateSwitches, TransitionCallback};
pub use handler::{GrammarHandler, StateController};
