//! Read data from a file in the simplified DIMACS format used by the SAT competition
//!
//! See
//! [http://www.satcompetition.org/2011/format-benchmarks2011.html](http://www.satcompetition.org/2011/format-benchmarks2011.html)
//! for a description of the format.
//!
//! Clauses may span lines. A line starting with `%` ends the clause list, as
//! in the SATLIB benchmark files.

use crate::data::*;
use crate::error::{Error, ParseError};
use crate::formula::Formula;

use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::Path;
use tinyvec::TinyVec;

pub fn read_from_file<P: AsRef<Path>>(filename: P) -> Result<Formula, Error> {
    let file = File::open(filename)?;
    parse_dimacs(BufReader::new(file))
}

/// Parse a whole DIMACS problem
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Formula, Error> {
    let mut header: Option<(u32, usize)> = None;
    let mut clauses = Vec::new();
    let mut clause: Clause = TinyVec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            // comments
            continue;
        } else if trimmed.starts_with('%') {
            break;
        } else if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(ParseError::DuplicateHeader { line: line_no }.into());
            }
            header = Some(parse_header(trimmed, line_no)?);
            continue;
        }

        let (nvars, _) = header.ok_or(ParseError::MissingHeader)?;

        for chunk in trimmed.split_whitespace() {
            let lit_id: i32 = chunk.parse().map_err(|_| ParseError::BadLiteral {
                line: line_no,
                token: chunk.to_string(),
            })?;
            match Literal::from_dimacs(lit_id) {
                Some(lit) => {
                    if lit.var_id().0 >= nvars {
                        return Err(crate::error::FormulaError::LiteralOutOfRange {
                            clause: clauses.len(),
                            literal: i64::from(lit_id),
                            variable_count: nvars,
                        }
                        .into());
                    }
                    clause.push(lit);
                }
                // zero marks the end of the clause
                None => clauses.push(std::mem::take(&mut clause)),
            }
        }
    }

    let (nvars, declared) = header.ok_or(ParseError::MissingHeader)?;

    if !clause.is_empty() {
        log::warn!("Last clause has no terminating 0");
        clauses.push(clause);
    }

    if clauses.len() != declared {
        return Err(ParseError::ClauseCountMismatch {
            declared,
            found: clauses.len(),
        }
        .into());
    }

    log::debug!("Read {} vars and {} clauses", nvars, clauses.len());
    Ok(Formula::from_clauses(nvars, clauses)?)
}

/// example line:
/// p cnf 5 3
fn parse_header(line: &str, line_no: usize) -> Result<(u32, usize), ParseError> {
    let bad = || ParseError::BadHeader {
        line: line_no,
        text: line.trim_end().to_string(),
    };

    let parts: Vec<_> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let vars = vars.parse().map_err(|_| bad())?;
            let clauses = clauses.parse().map_err(|_| bad())?;
            Ok((vars, clauses))
        }
        _ => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;

    fn parse(text: &str) -> Result<Formula, Error> {
        parse_dimacs(text.as_bytes())
    }

    fn parse_err(text: &str) -> ParseError {
        match parse(text) {
            Err(Error::Parse(e)) => e,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn simple_problem() {
        let f = parse("c a comment\np cnf 3 2\n1 -3 0\n2 3 -1 0\n").unwrap();
        assert_eq!(f.variable_count(), 3);
        assert_eq!(f.clause_count(), 2);
        let first: Vec<_> = f.clauses()[0].iter().map(|l| l.to_dimacs()).collect();
        assert_eq!(first, vec![1, -3]);
    }

    #[test]
    fn clauses_span_lines() {
        let f = parse("p cnf 3 2\n1 -3\n 0 2\n3 -1 0\n").unwrap();
        assert_eq!(f.clause_count(), 2);
        assert_eq!(f.clauses()[1].len(), 3);
    }

    #[test]
    fn satlib_trailer() {
        let f = parse("p cnf 2 1\n1 2 0\n%\n0\n\n").unwrap();
        assert_eq!(f.clause_count(), 1);
    }

    #[test]
    fn unterminated_last_clause() {
        let f = parse("p cnf 2 2\n1 0\n-2").unwrap();
        assert_eq!(f.clause_count(), 2);
    }

    #[test]
    fn empty_problem() {
        let f = parse("p cnf 0 0\n").unwrap();
        assert_eq!(f.variable_count(), 0);
        assert_eq!(f.clause_count(), 0);
    }

    #[test]
    fn missing_header() {
        assert_eq!(parse_err("1 2 0\n"), ParseError::MissingHeader);
        assert_eq!(parse_err("c nothing here\n"), ParseError::MissingHeader);
    }

    #[test]
    fn bad_header() {
        assert_eq!(
            parse_err("p dnf 2 1\n1 0\n"),
            ParseError::BadHeader {
                line: 1,
                text: "p dnf 2 1".to_string(),
            }
        );
        assert_eq!(
            parse_err("p cnf 2 1\np cnf 2 1\n1 0\n"),
            ParseError::DuplicateHeader { line: 2 }
        );
    }

    #[test]
    fn bad_literal() {
        assert_eq!(
            parse_err("p cnf 2 1\n1 x 0\n"),
            ParseError::BadLiteral {
                line: 2,
                token: "x".to_string(),
            }
        );
    }

    #[test]
    fn literal_out_of_range() {
        assert_eq!(
            parse_err("p cnf 2 2\n1 2 0\n-3 0\n"),
            ParseError::Formula(FormulaError::LiteralOutOfRange {
                clause: 1,
                literal: -3,
                variable_count: 2,
            })
        );
    }

    #[test]
    fn clause_count_mismatch() {
        assert_eq!(
            parse_err("p cnf 2 3\n1 2 0\n-1 0\n"),
            ParseError::ClauseCountMismatch {
                declared: 3,
                found: 2,
            }
        );
    }
}
