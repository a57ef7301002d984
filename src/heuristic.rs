//! The heuristic for picking a variable to branch on
//!
//! Static and deterministic: the unassigned variable with the lowest id. No
//! activity scores and no look-ahead, so two solves of the same formula visit
//! the same nodes in the same order.

use crate::assignment::Assignment;
use crate::data::*;
use crate::vec_map::NumericId;

/// The first unassigned variable in ascending id order, or `None` once every
/// variable has a value
///
/// Variables below `start` are skipped; the caller knows they are assigned.
/// A child node only ever adds to its parent's assignment, so it can start
/// right after the variable its parent branched on.
pub fn next_variable_from(assignment: &Assignment, start: usize) -> Option<VarId> {
    let states = assignment.states().get(start..)?;
    let offset = states.iter().position(|&s| s == Unknown)?;
    Some(VarId::from_index(start + offset))
}
