//! Assignment vectors, and the model copied out of a solution

use crate::data::*;
use crate::vec_map::VecMap;
use std::fmt::{self, Display, Formatter};

/// A (possibly partial) assignment of every variable in a formula
///
/// Every assignment is also pushed on a trail, so the search can undo back
/// to any earlier point instead of copying the whole vector per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// semantically: Map<variable id, VarState>
    values: VecMap<VarId, VarState>,

    /// Literals made true, oldest first
    trail: Vec<Literal>,
}

impl Assignment {
    /// An assignment with every variable unassigned
    pub fn unassigned(variable_count: u32) -> Self {
        Self {
            values: VecMap::filled(variable_count as usize, Unknown),
            trail: Vec::new(),
        }
    }

    /// The number of variables, assigned or not
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` if `var` is out of range
    #[inline]
    pub fn get(&self, var: VarId) -> Option<VarState> {
        self.values.get(var).copied()
    }

    /// The value of a literal under this assignment, or `None` if its variable
    /// is out of range
    #[inline]
    pub fn lookup(&self, lit: Literal) -> Option<VarState> {
        let state = self.get(lit.var_id())?;
        Some(if lit.is_negated() { !state } else { state })
    }

    /// Make `lit` true
    #[inline]
    pub fn assign_true(&mut self, lit: Literal) {
        debug_assert_eq!(self.values[lit.var_id()], Unknown);
        self.values[lit.var_id()] = VarState::from(lit.polarity());
        self.trail.push(lit);
    }

    /// Every literal made true so far, in order
    #[inline]
    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }

    #[inline]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Unassign everything assigned after the trail was `len` long
    pub fn undo_to(&mut self, len: usize) {
        for lit in self.trail.drain(len..) {
            self.values[lit.var_id()] = Unknown;
        }
    }

    /// The state of every variable, in id order
    #[inline]
    pub fn states(&self) -> &[VarState] {
        self.values.as_slice()
    }

    /// The value of a whole clause: `True` if some literal is true, `False` if
    /// every literal is false, and `Unknown` otherwise
    ///
    /// `None` if a literal is out of range
    pub fn clause_value(&self, clause: &[Literal]) -> Option<VarState> {
        let mut result = False;
        for &lit in clause {
            match self.lookup(lit)? {
                False => (),
                True => return Some(True),
                Unknown => result = Unknown,
            }
        }
        Some(result)
    }

    /// Copy the values out, reporting unassigned variables as false
    pub fn to_model(&self) -> Model {
        Model {
            values: self.states().iter().map(|&s| s == True).collect(),
        }
    }
}

/// A total assignment, as handed back to callers
///
/// Public accessors use DIMACS numbering, starting at 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of DIMACS variable `var`, or `None` outside `1..=len()`
    pub fn value(&self, var: u32) -> Option<bool> {
        let index = (var as usize).checked_sub(1)?;
        self.values.get(index).copied()
    }

    /// Whether `lit` is true in this model
    ///
    /// Literals on variables the model doesn't cover are false
    pub fn satisfies(&self, lit: Literal) -> bool {
        match self.values.get(lit.var_id().0 as usize) {
            Some(&value) => value == lit.polarity(),
            None => false,
        }
    }

    /// `(DIMACS variable, value)` pairs in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u32, bool)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as u32 + 1, v))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.values
    }
}

/// `1 = 1 2 = 0 3 = 1`
impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (var, value) in self.iter() {
            if var > 1 {
                write!(f, " ")?;
            }
            write!(f, "{} = {}", var, value as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(l: i32) -> Literal {
        Literal::from_dimacs(l).unwrap()
    }

    #[test]
    fn clause_values() {
        let mut a = Assignment::unassigned(3);
        let clause = [lit(1), lit(-2)];
        assert_eq!(a.clause_value(&clause), Some(Unknown));

        a.assign_true(lit(2));
        assert_eq!(a.clause_value(&clause), Some(Unknown));

        a.assign_true(lit(-1));
        assert_eq!(a.clause_value(&clause), Some(False));

        let mut b = Assignment::unassigned(3);
        b.assign_true(lit(1));
        assert_eq!(b.clause_value(&clause), Some(True));
    }

    #[test]
    fn out_of_range_lookup() {
        let a = Assignment::unassigned(2);
        assert_eq!(a.lookup(lit(3)), None);
        assert_eq!(a.clause_value(&[lit(1), lit(-3)]), None);
    }

    #[test]
    fn undo_restores_earlier_state() {
        let mut a = Assignment::unassigned(3);
        a.assign_true(lit(2));
        let mark = a.trail_len();
        let before = a.clone();

        a.assign_true(lit(-1));
        a.assign_true(lit(3));
        assert_eq!(a.trail(), &[lit(2), lit(-1), lit(3)]);

        a.undo_to(mark);
        assert_eq!(a, before);
        assert_eq!(a.states(), &[Unknown, True, Unknown]);
    }

    #[test]
    fn model_reports_unknown_as_false() {
        let mut a = Assignment::unassigned(3);
        a.assign_true(lit(1));
        a.assign_true(lit(-2));
        let model = a.to_model();
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(2), Some(false));
        assert_eq!(model.value(3), Some(false));
        assert_eq!(model.value(0), None);
        assert_eq!(model.value(4), None);
        assert!(model.satisfies(lit(-2)));
        assert!(!model.satisfies(lit(4)));
        assert_eq!(model.to_string(), "1 = 1 2 = 0 3 = 0");
    }
}
