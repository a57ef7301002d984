//! Checking a partial assignment against the formula

use crate::assignment::Assignment;
use crate::data::*;
use crate::formula::Formula;

/// Returns false as soon as some clause has every literal assigned and false
///
/// Clauses with an unassigned literal are undetermined and don't count
/// against the assignment. A literal whose variable the assignment doesn't
/// cover makes the whole thing inconsistent.
pub fn is_consistent(assignment: &Assignment, formula: &Formula) -> bool {
    for (index, clause) in formula.clauses().iter().enumerate() {
        match assignment.clause_value(clause) {
            Some(True) | Some(Unknown) => (),
            Some(False) => {
                log::trace!("Clause {} is violated: {:?}", index + 1, clause);
                return false;
            }
            None => {
                log::error!(
                    "Clause {} refers to a variable outside the assignment",
                    index + 1
                );
                return false;
            }
        }
    }
    true
}
