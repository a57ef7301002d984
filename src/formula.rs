//! The CNF problem handed to the solver

use crate::assignment::Model;
use crate::data::*;
use crate::error::FormulaError;
use tinyvec::TinyVec;

/// A formula in conjunctive normal form
///
/// Immutable once built: the solver only ever borrows it. Every literal is
/// checked to name a variable in `1..=variable_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    variable_count: u32,
    clauses: Vec<Clause>,
}

impl Formula {
    /// Build a formula from clauses in the signed DIMACS encoding
    ///
    /// ```
    /// use branching_solver::Formula;
    ///
    /// let f = Formula::new(2, vec![vec![1, -2], vec![2]]).unwrap();
    /// assert_eq!(f.clause_count(), 2);
    /// assert!(Formula::new(2, vec![vec![3]]).is_err());
    /// ```
    pub fn new<C, L>(variable_count: u32, clauses: C) -> Result<Self, FormulaError>
    where
        C: IntoIterator<Item = L>,
        L: IntoIterator<Item = i32>,
    {
        let mut converted = Vec::new();
        for (index, clause) in clauses.into_iter().enumerate() {
            let mut lits = TinyVec::new();
            for raw in clause {
                let lit =
                    Literal::from_dimacs(raw).ok_or(FormulaError::ZeroLiteral { clause: index })?;
                lits.push(lit);
            }
            converted.push(lits);
        }
        Self::from_clauses(variable_count, converted)
    }

    /// Build a formula from already converted clauses
    pub fn from_clauses(variable_count: u32, clauses: Vec<Clause>) -> Result<Self, FormulaError> {
        if variable_count >= 1 << 31 {
            return Err(FormulaError::TooManyVariables(u64::from(variable_count)));
        }
        for (index, clause) in clauses.iter().enumerate() {
            if let Some(&bad) = clause
                .iter()
                .find(|lit| lit.var_id().0 >= variable_count)
            {
                return Err(FormulaError::LiteralOutOfRange {
                    clause: index,
                    literal: bad.to_dimacs(),
                    variable_count,
                });
            }
        }
        if let Some(index) = clauses.iter().position(|c| c.is_empty()) {
            log::warn!("Clause {} is empty; the formula is unsatisfiable", index + 1);
        }

        Ok(Self {
            variable_count,
            clauses,
        })
    }

    #[inline]
    pub fn variable_count(&self) -> u32 {
        self.variable_count
    }

    #[inline]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Check every clause has a literal that's true in `model`
    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.first_unsatisfied(model).is_none()
    }

    /// The first clause `model` leaves unsatisfied, if any
    pub fn first_unsatisfied(&self, model: &Model) -> Option<&Clause> {
        self.clauses
            .iter()
            .find(|clause| !clause.iter().any(|&lit| model.satisfies(lit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;

    #[test]
    fn rejects_out_of_range() {
        let err = Formula::new(2, vec![vec![1, 2], vec![-3]]).unwrap_err();
        assert_eq!(
            err,
            FormulaError::LiteralOutOfRange {
                clause: 1,
                literal: -3,
                variable_count: 2,
            }
        );
    }

    #[test]
    fn rejects_zero() {
        let err = Formula::new(2, vec![vec![1, 0, 2]]).unwrap_err();
        assert_eq!(err, FormulaError::ZeroLiteral { clause: 0 });
    }

    #[test]
    fn empty_formula() {
        let f = Formula::new(0, Vec::<Vec<i32>>::new()).unwrap();
        assert_eq!(f.variable_count(), 0);
        assert_eq!(f.clause_count(), 0);
        assert!(f.is_satisfied_by(&Assignment::unassigned(0).to_model()));
    }

    #[test]
    fn satisfaction_check() {
        let f = Formula::new(2, vec![vec![1, 2], vec![-1]]).unwrap();

        let mut a = Assignment::unassigned(2);
        a.assign_true(Literal::from_dimacs(-1).unwrap());
        a.assign_true(Literal::from_dimacs(2).unwrap());
        assert!(f.is_satisfied_by(&a.to_model()));

        let mut b = Assignment::unassigned(2);
        b.assign_true(Literal::from_dimacs(1).unwrap());
        let model = b.to_model();
        assert!(!f.is_satisfied_by(&model));
        assert_eq!(f.first_unsatisfied(&model), Some(&f.clauses()[1]));
    }
}
