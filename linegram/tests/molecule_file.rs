//! A small XYZ-style molecule format driven by a state graph:
//!
//! ```text
//! <atom count>
//! <title line>
//! <symbol> <x> <y> <z>      (atom count times)
//! ```

use linegram::combinators::{and, not, or};
use linegram::parsers::{Blanks, Chars, Eof, Eol, Float, UnsignedInt};
use linegram::values::ValueMap;
use linegram::{GrammarHandler, StateController, StateGraph, StateGraphBuilder, Stream};
use std::io::Write;

const WATER: &str = "3\nwater\nO 0.0 0.0 0.117\nH 0.0 0.757 -0.467\nH 0.0 -0.757 -0.467\n";

#[derive(Debug, Default, PartialEq)]
struct Atom {
    symbol: String,
    xyz: [f64; 3],
}

#[derive(Debug, Default)]
struct Molecule {
    expected: usize,
    title: String,
    atoms: Vec<Atom>,
    error: Option<(&'static str, usize)>,
}

impl GrammarHandler<&'static str> for Molecule {
    fn handle_values(&mut self, state: &&'static str, values: &ValueMap) -> bool {
        match *state {
            "count" => {
                let Ok(count) = values.get_as::<u64>("count") else {
                    return false;
                };
                self.expected = *count as usize;
            }
            "title" => {
                self.title = values.get_as::<String>("title").cloned().unwrap_or_default();
            }
            "atom" => {
                let (Ok(symbol), Ok(x), Ok(y), Ok(z)) = (
                    values.get_as::<String>("symbol"),
                    values.get_as::<f64>("x"),
                    values.get_as::<f64>("y"),
                    values.get_as::<f64>("z"),
                ) else {
                    return false;
                };
                // Element symbols are one capital and at most one lower-case letter
                if symbol.len() > 2 || !symbol.starts_with(|c: char| c.is_ascii_uppercase()) {
                    return false;
                }
                self.atoms.push(Atom {
                    symbol: symbol.clone(),
                    xyz: [*x, *y, *z],
                });
            }
            _ => {}
        }
        true
    }

    fn handle_error(&mut self, state: &&'static str, line: usize) {
        self.error = Some((*state, line));
    }

    fn update_state(&mut self, controller: &mut dyn StateController<&'static str>, current: &&'static str) {
        match *current {
            "count" | "title" => controller.enable_state(&"atom"),
            _ => {}
        }
        if self.atoms.len() >= self.expected {
            controller.disable_state(&"atom");
        }
    }
}

fn line_end() -> linegram::BoxedParser {
    or(vec![Box::new(Eol::new()), Box::new(Eof::new())])
}

fn molecule_grammar() -> StateGraph<&'static str> {
    let count = and(
        vec![Box::new(Blanks::new()), Box::new(UnsignedInt::new("count")), line_end()],
        false,
    );
    let title = or(vec![
        and(vec![not("title", Box::new(Eol::new())), Box::new(Eol::new())], false),
        Box::new(Eol::new()),
    ]);
    let atom = and(
        vec![
            Box::new(Chars::alphanumeric("symbol")),
            Box::new(Float::new("x")),
            Box::new(Float::new("y")),
            Box::new(Float::new("z")),
            line_end(),
        ],
        true,
    );

    StateGraphBuilder::new()
        .start("start")
        .end("end")
        .state("count", count)
        .state("title", title)
        .state("atom", atom)
        .state("end", Box::new(Eof::new()))
        .transitions(&[
            ("start", "count"),
            ("count", "title"),
            ("title", "atom"),
            ("title", "end"),
            ("atom", "atom"),
            ("atom", "end"),
        ])
        .build()
        .unwrap()
}

fn read(text: &str) -> (bool, Molecule) {
    let mut graph = molecule_grammar();
    let mut molecule = Molecule::default();
    let mut stream = Stream::new(text);
    let complete = graph.apply(&mut stream, "start", &mut molecule).unwrap();
    (complete, molecule)
}

#[test]
fn test_reads_water() {
    let (complete, molecule) = read(WATER);
    assert!(complete);
    assert_eq!(molecule.expected, 3);
    assert_eq!(molecule.title, "water");
    assert_eq!(molecule.atoms.len(), 3);
    assert_eq!(
        molecule.atoms[1],
        Atom {
            symbol: "H".to_string(),
            xyz: [0.0, 0.757, -0.467],
        }
    );
    assert!(molecule.error.is_none());
}

#[test]
fn test_missing_trailing_newline() {
    let (complete, molecule) = read(WATER.trim_end());
    assert!(complete);
    assert_eq!(molecule.atoms.len(), 3);
}

#[test]
fn test_empty_title_and_no_atoms() {
    let (complete, molecule) = read("0\n\n");
    assert!(complete);
    assert!(molecule.title.is_empty());
    assert!(molecule.atoms.is_empty());
}

#[test]
fn test_extra_atom_is_reported_on_its_line() {
    let text = format!("{}C 1.0 1.0 1.0\n", WATER);
    let (complete, molecule) = read(&text);
    assert!(!complete);
    assert_eq!(molecule.atoms.len(), 3);
    assert_eq!(molecule.error, Some(("atom", 6)));
}

#[test]
fn test_malformed_coordinates() {
    let (complete, molecule) = read("2\nbroken\nO 0.0 0.0 0.0\nH 0.0 abc 1.0\n");
    assert!(!complete);
    assert_eq!(molecule.atoms.len(), 1);
    assert_eq!(molecule.error, Some(("atom", 4)));
}

#[test]
fn test_rejected_symbol_reports_previous_state() {
    let (complete, molecule) = read("1\nbad\nxyz 0 0 0\n");
    assert!(!complete);
    assert!(molecule.atoms.is_empty());
    assert_eq!(molecule.error, Some(("title", 3)));
}

#[test]
fn test_reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WATER.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut stream = Stream::from_path(file.path()).unwrap();
    let mut graph = molecule_grammar();
    let mut molecule = Molecule::default();
    assert!(graph.apply(&mut stream, "start", &mut molecule).unwrap());
    assert_eq!(molecule.atoms.len(), 3);
    assert_eq!(stream.line_count(), 6);
}
