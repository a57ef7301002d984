//! A backtracking SAT solver using the DPLL algorithm over an explicit
//! decision tree
//!
//! ```
//! use branching_solver::{solve, Formula, Outcome};
//!
//! let formula = Formula::new(2, vec![vec![1, 2], vec![-1]]).unwrap();
//! match solve(&formula) {
//!     Outcome::Satisfiable(model) => assert_eq!(model.value(2), Some(true)),
//!     other => panic!("{:?}", other),
//! }
//! ```

pub mod assignment;
pub mod cnf_reader;
pub mod config;
pub mod consistency;
pub mod core;
pub mod data;
pub mod error;
pub mod formula;
pub mod heuristic;
pub mod simplify;
pub mod tree;
pub mod vec_map;

pub use self::assignment::{Assignment, Model};
pub use self::config::SolverConfig;
pub use self::core::{solve, Outcome, SearchStats, Solver};
pub use self::data::{Clause, Literal, VarId};
pub use self::error::{Error, FormulaError, ParseError};
pub use self::formula::Formula;
