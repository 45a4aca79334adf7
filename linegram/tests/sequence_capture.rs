//! Whole-line captures built from combinators

use linegram::combinators::{and, greedy, optional, or, repeat, Tuple};
use linegram::parsers::{Chars, Eol, Float, SignedInt, UnsignedInt};
use linegram::{BoxedParser, Parser, Stream};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
}

/// `name count element x y z`, as found in atom records
fn atom_record() -> BoxedParser {
    and(
        vec![
            Box::new(Chars::alphanumeric("n")),
            Box::new(UnsignedInt::new("#")),
            Box::new(UnsignedInt::new("e")),
            Box::new(Float::new("x")),
            Box::new(Float::new("y")),
            Box::new(Float::new("z")),
        ],
        true,
    )
}

#[test]
fn test_sequence_captures_every_field() {
    let mut parser = atom_record();
    let mut stream = Stream::new("c 1 6 0.4 -2.3 1.1");
    assert!(parser.parse(&mut stream).unwrap());
    assert!(stream.eof());

    let values = parser.values();
    assert_eq!(values.get_as::<String>("n").unwrap(), "c");
    assert_eq!(*values.get_as::<u64>("#").unwrap(), 1);
    assert_eq!(*values.get_as::<u64>("e").unwrap(), 6);
    assert_close(*values.get_as::<f64>("x").unwrap(), 0.4);
    assert_close(*values.get_as::<f64>("y").unwrap(), -2.3);
    assert_close(*values.get_as::<f64>("z").unwrap(), 1.1);
}

#[test]
fn test_sequence_failure_restores_stream() {
    let mut parser = atom_record();
    let mut stream = Stream::new("c 1 6 0.4 oops 1.1");
    assert!(!parser.parse(&mut stream).unwrap());
    assert_eq!(stream.position(), 0);
    assert_eq!((stream.line(), stream.column()), (1, 1));
    assert!(parser.values().is_empty());
}

#[test]
fn test_records_across_lines() {
    let mut record = and(vec![atom_record(), Box::new(Eol::new())], false);
    let mut stream = Stream::new("c 1 6 0 0 0\nh 2 1 1 0 0\nbad line\n");

    let mut names = Vec::new();
    while record.parse(&mut stream).unwrap() {
        names.push(record.values().get_as::<String>("n").unwrap().clone());
    }
    assert_eq!(names, vec!["c", "h"]);
    assert_eq!(stream.line(), 3);
    assert_eq!(stream.column(), 1);
}

#[test]
fn test_ordered_versus_greedy_choice() {
    // "12.5": the integer alternative matches first but is shorter
    let alternatives = || -> Vec<BoxedParser> {
        vec![Box::new(SignedInt::new("int")), Box::new(Float::new("float"))]
    };

    let mut first = or(alternatives());
    let mut stream = Stream::new("12.5");
    assert!(first.parse(&mut stream).unwrap());
    assert!(first.values().contains("int"));
    assert_eq!(stream.position(), 2);

    let mut longest = greedy(alternatives());
    let mut stream = Stream::new("12.5");
    assert!(longest.parse(&mut stream).unwrap());
    assert!(longest.values().contains("float"));
    assert!(stream.eof());
}

#[test]
fn test_keyword_with_optional_vector() {
    // "origin" alone, or followed by a (x, y, z) triple
    let triple = Tuple::parenthesized("xyz", Box::new(Float::new("")))
        .arity(3)
        .skip_blanks(true);
    let mut parser = and(
        vec![
            Box::new(Chars::constant_nocase("kw", "origin")),
            optional(Box::new(triple)),
            Box::new(Eol::new()),
        ],
        true,
    );

    let mut stream = Stream::new("ORIGIN ( 1.0, -2 , 3.5 )\norigin\n");
    assert!(parser.parse(&mut stream).unwrap());
    let xyz: Vec<f64> = parser
        .values()
        .list_as::<f64>("xyz")
        .unwrap()
        .into_iter()
        .copied()
        .collect();
    assert_eq!(xyz, vec![1.0, -2.0, 3.5]);

    assert!(parser.parse(&mut stream).unwrap());
    assert!(!parser.values().contains("xyz"));
    assert!(stream.eof());
}

#[test]
fn test_repeated_columns() {
    let mut row = and(
        vec![
            Box::new(Chars::identifier("label")),
            repeat(
                and(vec![Box::new(Chars::one_of("", " \t")), Box::new(SignedInt::new("col"))], false),
                2,
                Some(4),
            ),
            Box::new(Eol::new()),
        ],
        false,
    );

    let mut stream = Stream::new("r1 3 -4 5\n");
    assert!(row.parse(&mut stream).unwrap());
    let cols: Vec<i64> = row
        .values()
        .list_as::<i64>("col")
        .unwrap()
        .into_iter()
        .copied()
        .collect();
    assert_eq!(cols, vec![3, -4, 5]);

    // Too few columns
    let mut stream = Stream::new("r2 3\n");
    assert!(!row.parse(&mut stream).unwrap());
    assert_eq!(stream.position(), 0);
}
