//! Named rules for recursive grammars
//!
//! A [`Rule`] owns a settable slot holding a parser. [`RuleRef`] is a
//! non-owning reference to that slot, resolved each time it parses, so a
//! rule's parser can refer to the rule itself without an ownership cycle.
//! Keep the `Rule` (or a clone of it) alive for as long as its references
//! are used; a reference whose rule is gone behaves like an unbound one.
//!
//! A match borrows a parser instance from the slot's idle pool and returns
//! it afterwards. Only when the pool is empty, as happens once per nesting
//! level of a recursive grammar, is the bound parser cloned.

use super::{BoxedParser, ParseError, ParseResult, Parser};
use crate::config::compile_time::parsers::MAX_RULE_DEPTH;
use crate::logging::codes;
use crate::stream::Stream;
use crate::values::ValueMap;
use crate::{log_debug, log_error};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Bound parser plus idle instances ready to run
#[derive(Default)]
struct Slot {
    template: Option<BoxedParser>,
    idle: Vec<BoxedParser>,
    generation: u64,
}

impl Slot {
    fn bind(&mut self, parser: BoxedParser) {
        self.template = Some(parser);
        self.idle.clear();
        self.generation += 1;
    }

    fn is_bound(&self) -> bool {
        self.template.is_some()
    }

    fn acquire(&mut self) -> Option<(BoxedParser, u64)> {
        let parser = match self.idle.pop() {
            Some(parser) => parser,
            None => self.template.as_ref()?.box_clone(),
        };
        Some((parser, self.generation))
    }

    /// Instances of a replaced binding are dropped
    fn release(&mut self, parser: BoxedParser, generation: u64) {
        if generation == self.generation {
            self.idle.push(parser);
        }
    }
}

type SharedSlot = RefCell<Slot>;

thread_local! {
    static RULE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Decrements the nesting counter however the nested parse ends
struct DepthGuard;

impl DepthGuard {
    fn enter(name: &str) -> ParseResult<Self> {
        let depth = RULE_DEPTH.with(|d| d.get());
        if depth >= MAX_RULE_DEPTH {
            let error = ParseError::RecursionLimit {
                name: name.to_string(),
                limit: MAX_RULE_DEPTH,
            };
            log_error!(error.error_code(), "Rule nesting limit reached",
                "rule" => name,
                "limit" => MAX_RULE_DEPTH
            );
            return Err(error);
        }
        RULE_DEPTH.with(|d| d.set(depth + 1));
        Ok(DepthGuard)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        RULE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Parse through whatever parser is currently bound in `slot`
fn parse_slot(
    name: &str,
    slot: Option<Rc<SharedSlot>>,
    stream: &mut Stream,
    values: &mut ValueMap,
) -> ParseResult<bool> {
    values.clear();

    let Some(slot) = slot.filter(|slot| slot.borrow().is_bound()) else {
        let error = ParseError::UnboundRule {
            name: name.to_string(),
        };
        log_error!(codes::parser::UNBOUND_RULE, "Rule used before definition",
            position = stream.location(),
            "rule" => name
        );
        return Err(error);
    };

    let _depth = DepthGuard::enter(name)?;

    // The slot must not stay borrowed while the target recurses into it
    let acquired = slot.borrow_mut().acquire();
    let Some((mut target, generation)) = acquired else {
        return Err(ParseError::UnboundRule {
            name: name.to_string(),
        });
    };

    let result = target.parse(stream);
    if matches!(result, Ok(true)) {
        values.merge(target.values());
    }
    slot.borrow_mut().release(target, generation);
    result
}

// ============================================================================
// RULE
// ============================================================================

/// Owner of a named, settable parser slot
#[derive(Clone)]
pub struct Rule {
    name: String,
    slot: Rc<SharedSlot>,
    values: ValueMap,
}

impl Rule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slot: Rc::new(RefCell::new(Slot::default())),
            values: ValueMap::new(),
        }
    }

    /// Bind (or rebind) the parser this rule stands for
    pub fn define(&self, parser: BoxedParser) {
        log_debug!("Defining rule", "rule" => self.name, "parser" => parser.describe());
        self.slot.borrow_mut().bind(parser);
    }

    pub fn is_defined(&self) -> bool {
        self.slot.borrow().is_bound()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-owning reference for use inside parser trees
    pub fn reference(&self) -> BoxedParser {
        Box::new(RuleRef {
            name: self.name.clone(),
            slot: Rc::downgrade(&self.slot),
            values: ValueMap::new(),
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

impl Parser for Rule {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        parse_slot(&self.name, Some(self.slot.clone()), stream, &mut self.values)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!("Rule({})", self.name)
    }
}

// ============================================================================
// RULE REFERENCE
// ============================================================================

/// Deferred reference to a [`Rule`], looked up at match time
#[derive(Clone)]
pub struct RuleRef {
    name: String,
    slot: Weak<SharedSlot>,
    values: ValueMap,
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRef").field("name", &self.name).finish()
    }
}

impl Parser for RuleRef {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        parse_slot(&self.name, self.slot.upgrade(), stream, &mut self.values)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!("RuleRef({})", self.name)
    }
}
