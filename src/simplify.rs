//! # Simplification
//!
//! The two classical DPLL rules, run on a node's assignment before it
//! branches:
//!
//!  - Unit propagation: if every literal of a clause but one is false, the
//!    last one must be true. Repeated to a fixpoint.
//!
//!  - Pure literals: if an unassigned variable only shows up with one sign in
//!    the clauses that aren't satisfied yet, it can be set to satisfy all of
//!    them. A single pass; new pure literals it exposes are picked up by the
//!    next node.
//!
//! Both work on the assignment in place and never touch the formula.

use crate::assignment::Assignment;
use crate::consistency::is_consistent;
use crate::data::*;
use crate::formula::Formula;

/// What a clause looks like under the current assignment
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ClauseStatus {
    Satisfied,
    /// Exactly one literal is unassigned, and nothing is true yet
    Unit(Literal),
    /// Every literal is false
    Falsified,
    /// Two or more literals are unassigned
    Open,
}

fn clause_status(assignment: &Assignment, clause: &[Literal]) -> Result<ClauseStatus, Unsat> {
    let mut unassigned = None;
    let mut unassigned_count = 0;
    for &lit in clause {
        match assignment.lookup(lit).ok_or(Unsat)? {
            True => return Ok(ClauseStatus::Satisfied),
            False => (),
            Unknown => {
                unassigned_count += 1;
                unassigned = Some(lit);
            }
        }
    }
    Ok(match (unassigned_count, unassigned) {
        (0, _) => ClauseStatus::Falsified,
        (1, Some(lit)) => ClauseStatus::Unit(lit),
        _ => ClauseStatus::Open,
    })
}

/// Force the remaining literal of every unit clause, until nothing changes
///
/// Returns the number of variables forced, or `Err(Unsat)` if that produced
/// a conflict. Gives up after `variable_count + clause_count` passes; every
/// forcing pass assigns a variable so that cap is never reached on a well
/// formed formula.
pub fn unit_propagate(assignment: &mut Assignment, formula: &Formula) -> Result<usize, Unsat> {
    let pass_cap = formula.variable_count() as usize + formula.clause_count();
    let mut passes = 0;
    let mut forced = 0;

    loop {
        let mut changed = false;
        passes += 1;

        for clause in formula.clauses() {
            match clause_status(assignment, clause)? {
                ClauseStatus::Satisfied | ClauseStatus::Open => (),
                ClauseStatus::Falsified => {
                    log::trace!("Unit propagation hit falsified clause {:?}", clause);
                    return Err(Unsat);
                }
                ClauseStatus::Unit(lit) => {
                    log::trace!("Forcing {}", lit);
                    assignment.assign_true(lit);
                    forced += 1;
                    changed = true;
                    if !is_consistent(assignment, formula) {
                        return Err(Unsat);
                    }
                }
            }
        }

        if !changed {
            break;
        }
        if passes > pass_cap {
            log::warn!(
                "Unit propagation stopped after {} passes without a fixpoint",
                passes
            );
            break;
        }
    }

    Ok(forced)
}

/// Assign every pure variable the value that satisfies its clauses
///
/// Returns how many variables were assigned. Only clauses not already
/// satisfied are looked at, and only their unassigned literals. Work is
/// proportional to those occurrences, not to the number of variables.
pub fn eliminate_pure_literals(assignment: &mut Assignment, formula: &Formula) -> usize {
    let mut occurrences: Vec<Literal> = Vec::new();

    for clause in formula.clauses() {
        match assignment.clause_value(clause) {
            Some(True) => continue,
            Some(_) => (),
            // a clause the assignment can't evaluate means nothing is safe
            None => return 0,
        }
        occurrences.extend(
            clause
                .iter()
                .copied()
                .filter(|&lit| assignment.lookup(lit) == Some(Unknown)),
        );
    }

    // sorted by variable, the positive literal before the negative one
    occurrences.sort_unstable();
    occurrences.dedup();

    let same_var = |i: usize, var: VarId| occurrences.get(i).map_or(false, |l| l.var_id() == var);
    let pure: Vec<Literal> = occurrences
        .iter()
        .enumerate()
        .filter(|&(i, lit)| {
            let var = lit.var_id();
            !(i > 0 && same_var(i - 1, var)) && !same_var(i + 1, var)
        })
        .map(|(_, &lit)| lit)
        .collect();

    for &lit in &pure {
        log::trace!("Pure literal {}", lit);
        assignment.assign_true(lit);
    }
    pure.len()
}
