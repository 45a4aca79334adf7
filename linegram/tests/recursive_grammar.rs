//! Recursive grammars through named rules

use assert_matches::assert_matches;
use linegram::combinators::{and, or, Tuple};
use linegram::parsers::{Chars, Eof, UnsignedInt};
use linegram::{ParseError, Parser, Rule, Stream};

/// list := '(' item (',' item)* ')'     item := integer | list
fn nested_list() -> Rule {
    let list = Rule::new("list");
    let item = or(vec![Box::new(UnsignedInt::new("")), list.reference()]);
    list.define(Box::new(
        Tuple::parenthesized("items", item).skip_blanks(true),
    ));
    list
}

fn leaves(rule: &Rule) -> Vec<u64> {
    rule.values()
        .list_as::<u64>("items")
        .unwrap()
        .into_iter()
        .copied()
        .collect()
}

#[test]
fn test_flat_list() {
    let mut list = nested_list();
    let mut stream = Stream::new("(1, 2, 3)");
    assert!(list.parse(&mut stream).unwrap());
    assert_eq!(leaves(&list), vec![1, 2, 3]);
}

#[test]
fn test_nested_lists_collect_leaves_in_order() {
    let mut list = nested_list();
    let mut stream = Stream::new("(1, (2, (3, 4)), 5)");
    assert!(list.parse(&mut stream).unwrap());
    assert!(stream.eof());
    assert_eq!(leaves(&list), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_unbalanced_input_is_rejected_without_consuming() {
    let mut list = nested_list();
    let mut stream = Stream::new("(1, (2, 3)");
    assert!(!list.parse(&mut stream).unwrap());
    assert_eq!(stream.position(), 0);
    assert!(list.values().is_empty());
}

#[test]
fn test_deep_nesting() {
    let depth = 50;
    let text = format!("{}7{}", "(".repeat(depth), ")".repeat(depth));

    let mut whole = and(vec![nested_list().reference(), Box::new(Eof::new())], false);
    // The rule above is already dropped, so its reference is unbound
    let mut stream = Stream::new(&text);
    assert_matches!(whole.parse(&mut stream), Err(ParseError::UnboundRule { .. }));

    let list = nested_list();
    let mut whole = and(vec![list.reference(), Box::new(Eof::new())], false);
    let mut stream = Stream::new(&text);
    assert!(whole.parse(&mut stream).unwrap());
    assert_eq!(*whole.values().list_as::<u64>("items").unwrap()[0], 7);
}

#[test]
fn test_mutually_recursive_rules() {
    // expr := term ('+' expr)?    term := integer | '[' expr ']'
    let expr = Rule::new("expr");
    let term = Rule::new("term");

    term.define(or(vec![
        Box::new(UnsignedInt::new("value")),
        and(
            vec![
                Box::new(Chars::constant("", "[")),
                expr.reference(),
                Box::new(Chars::constant("", "]")),
            ],
            false,
        ),
    ]));
    expr.define(and(
        vec![
            term.reference(),
            linegram::combinators::optional(and(
                vec![Box::new(Chars::constant("op", "+")), expr.reference()],
                false,
            )),
        ],
        false,
    ));

    let mut top = expr.reference();
    let mut stream = Stream::new("1+[2+3]+4]");
    assert!(top.parse(&mut stream).unwrap());
    // Stops before the unmatched bracket
    assert_eq!(stream.position(), 9);
    assert!(top.values().contains("op"));
}
