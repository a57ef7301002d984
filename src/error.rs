//! Error types used in the crate.
//!
//! Failure inside the search is not an error: a dead branch is reported with
//! [`Unsat`](crate::data::Unsat) and the search backtracks. The types here are
//! for problems with the input, which stop a solve before it starts.

use std::fmt;
use std::io;

/// A formula that breaks the CNF invariants
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormulaError {
    /// A literal names a variable outside `1..=variable_count`
    LiteralOutOfRange {
        clause: usize,
        literal: i64,
        variable_count: u32,
    },

    /// `0` terminates clauses in DIMACS and is never a literal
    ZeroLiteral { clause: usize },

    /// Variable ids are packed into 31 bits
    TooManyVariables(u64),
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::LiteralOutOfRange {
                clause,
                literal,
                variable_count,
            } => write!(
                f,
                "literal {} in clause {} is outside the declared {} variables",
                literal,
                clause + 1,
                variable_count
            ),
            FormulaError::ZeroLiteral { clause } => {
                write!(f, "clause {} contains the literal 0", clause + 1)
            }
            FormulaError::TooManyVariables(n) => {
                write!(f, "{} variables is more than the solver supports", n)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// Problems reading a DIMACS file
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Clauses (or the end of input) came before any `p cnf` line
    MissingHeader,

    /// A `p` line that isn't `p cnf <vars> <clauses>`
    BadHeader { line: usize, text: String },

    /// A second `p` line
    DuplicateHeader { line: usize },

    /// A token in a clause that isn't an integer
    BadLiteral { line: usize, token: String },

    /// The number of clauses read differs from the header
    ClauseCountMismatch { declared: usize, found: usize },

    Formula(FormulaError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader => write!(f, "no 'p cnf' header line found"),
            ParseError::BadHeader { line, text } => {
                write!(f, "line {}: malformed header \"{}\"", line, text)
            }
            ParseError::DuplicateHeader { line } => {
                write!(f, "line {}: more than one header line", line)
            }
            ParseError::BadLiteral { line, token } => {
                write!(f, "line {}: \"{}\" is not a literal", line, token)
            }
            ParseError::ClauseCountMismatch { declared, found } => write!(
                f,
                "header declares {} clauses but {} were found",
                declared, found
            ),
            ParseError::Formula(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Formula(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormulaError> for ParseError {
    fn from(e: FormulaError) -> Self {
        ParseError::Formula(e)
    }
}

/// Anything that can go wrong loading a formula
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<FormulaError> for Error {
    fn from(e: FormulaError) -> Self {
        Error::Parse(ParseError::Formula(e))
    }
}
