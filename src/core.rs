//! The core DPLL algorithm
//!
//! The search keeps one working assignment and an explicit stack of frames,
//! one per node on the current path. Going down a branch pushes a frame and
//! makes the decision true; backtracking pops the frame and undoes the
//! assignment back to where the frame started.

use crate::assignment::{Assignment, Model};
use crate::config::SolverConfig;
use crate::consistency::is_consistent;
use crate::data::*;
use crate::formula::Formula;
use crate::heuristic::next_variable_from;
use crate::simplify::{eliminate_pure_literals, unit_propagate};
use crate::tree::{BudgetExhausted, DecisionTree, Node, NodeBudget, NodeState};
use crate::vec_map::NumericId;

/// The verdict of a solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Satisfiable(Model),
    /// The whole search space was explored
    Unsatisfiable,
    /// No solution found, but the node budget cut off part of the search
    Unknown,
}

impl Outcome {
    pub fn is_sat(&self) -> bool {
        matches!(self, Outcome::Satisfiable(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Outcome::Unsatisfiable)
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Outcome::Satisfiable(model) => Some(model),
            _ => None,
        }
    }
}

/// Counters from the most recent solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_allocated: usize,
    pub peak_live_nodes: usize,
    pub denied_allocations: usize,
    pub dead_nodes: usize,
    pub max_depth: u32,
}

/// What a frame does the next time it is on top of the stack
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Next {
    Process,
    TrueBranch(VarId),
    FalseBranch(VarId),
    Exhausted,
}

#[derive(Debug)]
struct Frame {
    node: Box<Node>,
    /// Trail length before this node's decision was made
    mark: usize,
    /// Every variable below this index is assigned at this node
    scan_from: usize,
    next: Next,
}

/// The search driver
///
/// Borrows the formula and builds a fresh tree for every call to `solve`, so
/// one solver can be asked more than once and gives the same answer.
#[derive(Debug, Clone)]
pub struct Solver<'f> {
    formula: &'f Formula,
    config: SolverConfig,
    budget: NodeBudget,
    stats: SearchStats,
}

impl<'f> Solver<'f> {
    pub fn new(formula: &'f Formula, config: SolverConfig) -> Self {
        Self {
            formula,
            config,
            budget: NodeBudget::new(config.node_budget),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Log progress every so often
    fn tick(&self) {
        let interval = self.config.progress_interval;
        if interval != 0 && self.budget.allocated() % interval == 0 {
            log::info!(
                "after {} nodes: {} live, {} dead, depth {}",
                self.budget.allocated(),
                self.budget.live(),
                self.stats.dead_nodes,
                self.stats.max_depth
            );
        }
    }

    /// Solve the SAT problem!
    pub fn solve(&mut self) -> Outcome {
        self.budget = NodeBudget::new(self.config.node_budget);
        self.stats = SearchStats::default();

        let variable_count = self.formula.variable_count();
        log::info!(
            "Solving problem with {} vars and {} clauses",
            variable_count,
            self.formula.clause_count()
        );

        // nothing to decide, so no tree either
        if variable_count == 0 {
            let outcome = if is_consistent(&Assignment::unassigned(0), self.formula) {
                Outcome::Satisfiable(Assignment::unassigned(0).to_model())
            } else {
                Outcome::Unsatisfiable
            };
            log::info!("No variables: {}", if outcome.is_sat() { "SAT" } else { "UNSAT" });
            return outcome;
        }

        let root = match self.budget.alloc_root() {
            Ok(root) => root,
            Err(BudgetExhausted) => {
                log::warn!("Node budget of {} leaves no room for the root", self.budget.limit());
                self.record_stats();
                return Outcome::Unknown;
            }
        };
        self.tick();

        let mut assignment = Assignment::unassigned(variable_count);
        let outcome = match self.search(root, &mut assignment) {
            Some(root) => {
                let tree = DecisionTree::new(root);
                let outcome = match tree.solution_assignment(variable_count) {
                    Some(solution) => {
                        debug_assert_eq!(solution.states(), assignment.states());
                        Outcome::Satisfiable(solution.to_model())
                    }
                    None => {
                        log::error!("Search succeeded but the tree holds no solution node");
                        Outcome::Unknown
                    }
                };
                let released = tree.teardown(&mut self.budget);
                log::debug!("Released {} nodes", released);
                outcome
            }
            None if self.budget.denied() > 0 => {
                log::warn!(
                    "No solution found, but {} branches were cut off by the node budget of {}",
                    self.budget.denied(),
                    self.budget.limit()
                );
                Outcome::Unknown
            }
            None => Outcome::Unsatisfiable,
        };
        debug_assert_eq!(self.budget.live(), 0);

        self.record_stats();
        log::info!(
            "Finished: {} after {} nodes ({} dead, peak {} live)",
            match outcome {
                Outcome::Satisfiable(_) => "SAT",
                Outcome::Unsatisfiable => "UNSAT",
                Outcome::Unknown => "UNKNOWN",
            },
            self.stats.nodes_allocated,
            self.stats.dead_nodes,
            self.stats.peak_live_nodes
        );

        outcome
    }

    fn record_stats(&mut self) {
        self.stats.nodes_allocated = self.budget.allocated();
        self.stats.peak_live_nodes = self.budget.peak();
        self.stats.denied_allocations = self.budget.denied();
    }

    /// Depth first search from `root`, true branch before false
    ///
    /// Returns the root with the path to the solution attached, or `None`
    /// once every node has been released.
    fn search(&mut self, root: Box<Node>, assignment: &mut Assignment) -> Option<Box<Node>> {
        let mut stack = vec![Frame {
            node: root,
            mark: 0,
            scan_from: 0,
            next: Next::Process,
        }];

        loop {
            let frame = stack.last_mut()?;
            match frame.next {
                Next::Process => match self.process(&mut frame.node, assignment, frame.scan_from) {
                    Ok(Some(var)) => frame.next = Next::TrueBranch(var),
                    Ok(None) => return collapse(stack),
                    Err(Unsat) => self.backtrack(&mut stack, assignment),
                },
                Next::TrueBranch(var) => {
                    frame.next = Next::FalseBranch(var);
                    self.push_child(&mut stack, assignment, Literal::new(var));
                }
                Next::FalseBranch(var) => {
                    frame.next = Next::Exhausted;
                    self.push_child(&mut stack, assignment, !Literal::new(var));
                }
                Next::Exhausted => {
                    self.dead(&mut frame.node);
                    self.backtrack(&mut stack, assignment);
                }
            }
        }
    }

    /// Check, simplify and check again, then pick the branching variable
    ///
    /// `Ok(None)` means the node is a solution.
    fn process(
        &mut self,
        node: &mut Node,
        assignment: &mut Assignment,
        scan_from: usize,
    ) -> Result<Option<VarId>, Unsat> {
        self.stats.max_depth = self.stats.max_depth.max(node.depth());
        let start = assignment.trail_len();

        if !is_consistent(assignment, self.formula) {
            return Err(self.dead(node));
        }
        node.set_state(NodeState::Checked);

        if unit_propagate(assignment, self.formula).is_err() {
            return Err(self.dead(node));
        }
        node.set_state(NodeState::Propagated);

        eliminate_pure_literals(assignment, self.formula);
        node.record_implied(&assignment.trail()[start..]);
        node.set_state(NodeState::PureEliminated);

        if !is_consistent(assignment, self.formula) {
            return Err(self.dead(node));
        }

        match next_variable_from(assignment, scan_from) {
            Some(var) => {
                node.set_state(NodeState::Branching);
                Ok(Some(var))
            }
            None => {
                node.set_state(NodeState::Solution);
                Ok(None)
            }
        }
    }

    /// Allocate the child of the top frame where `decision` is true, and make
    /// it the new top
    ///
    /// A child the budget refuses is skipped.
    fn push_child(&mut self, stack: &mut Vec<Frame>, assignment: &mut Assignment, decision: Literal) {
        let parent = match stack.last() {
            Some(frame) => &frame.node,
            None => return,
        };
        let child = match self.budget.alloc_child(parent, decision) {
            Ok(child) => child,
            Err(BudgetExhausted) => {
                log::debug!(
                    "No room to branch on {} at depth {}",
                    decision,
                    parent.depth() + 1
                );
                return;
            }
        };
        self.tick();

        let mark = assignment.trail_len();
        assignment.assign_true(decision);
        stack.push(Frame {
            node: child,
            mark,
            scan_from: decision.var_id().to_index() + 1,
            next: Next::Process,
        });
    }

    /// Drop the top frame: undo its assignments and release its node
    fn backtrack(&mut self, stack: &mut Vec<Frame>, assignment: &mut Assignment) {
        if let Some(frame) = stack.pop() {
            assignment.undo_to(frame.mark);
            let decision = frame.node.decision();
            let depth = frame.node.depth();
            let released = self.budget.release(frame.node);
            if let Some(decision) = decision {
                log::debug!(
                    "Backtracking from {} at depth {} ({} nodes released)",
                    decision,
                    depth,
                    released
                );
            }
        }
    }

    fn dead(&mut self, node: &mut Node) -> Unsat {
        node.set_state(NodeState::Dead);
        self.stats.dead_nodes += 1;
        Unsat
    }
}

/// Hang every frame's node under the one below it, leaving only the path to
/// the solution, and return the root
fn collapse(stack: Vec<Frame>) -> Option<Box<Node>> {
    let mut below: Option<Box<Node>> = None;
    for frame in stack.into_iter().rev() {
        let mut node = frame.node;
        if let Some(child) = below.take() {
            node.attach(child);
        }
        below = Some(node);
    }
    below
}

/// Solve with the default configuration
pub fn solve(formula: &Formula) -> Outcome {
    Solver::new(formula, SolverConfig::default()).solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(vars: u32, clauses: Vec<Vec<i32>>) -> Formula {
        Formula::new(vars, clauses).unwrap()
    }

    #[test]
    fn propagation_conflict_is_unsat() {
        let f = formula(2, vec![vec![1, 2], vec![-1, 2], vec![-2]]);
        assert_eq!(solve(&f), Outcome::Unsatisfiable);
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let f = formula(1, vec![vec![1], vec![-1]]);
        assert_eq!(solve(&f), Outcome::Unsatisfiable);
    }

    #[test]
    fn single_clause_is_sat() {
        let f = formula(3, vec![vec![1, -2, 3]]);
        let outcome = solve(&f);
        let model = outcome.model().unwrap();
        assert!(
            model.value(1) == Some(true)
                || model.value(2) == Some(false)
                || model.value(3) == Some(true)
        );
        assert!(f.is_satisfied_by(model));
    }

    #[test]
    fn empty_formula_is_sat() {
        let f = formula(0, vec![]);
        match solve(&f) {
            Outcome::Satisfiable(model) => assert!(model.is_empty()),
            other => panic!("expected SAT, got {:?}", other),
        }
    }

    #[test]
    fn empty_clause_is_unsat() {
        let f = formula(2, vec![vec![1, 2], vec![]]);
        assert_eq!(solve(&f), Outcome::Unsatisfiable);
    }

    #[test]
    fn branches_true_first() {
        // no units and no pure literals at the root, so the first decision is
        // 1 = true, after which 2 is forced false
        let f = formula(2, vec![vec![1, 2], vec![-1, -2]]);
        let mut solver = Solver::new(&f, SolverConfig::default());
        let model = match solver.solve() {
            Outcome::Satisfiable(model) => model,
            other => panic!("expected SAT, got {:?}", other),
        };
        assert_eq!(model.as_slice(), &[true, false]);
        assert_eq!(solver.stats().nodes_allocated, 2);
        assert_eq!(solver.stats().max_depth, 1);
    }

    #[test]
    fn root_conflict_needs_no_branching() {
        let f = formula(
            2,
            vec![vec![1, 2], vec![-1, -2], vec![-1, 2], vec![1, -2], vec![-1]],
        );
        let mut solver = Solver::new(&f, SolverConfig::default());
        assert_eq!(solver.solve(), Outcome::Unsatisfiable);
        assert_eq!(solver.stats().nodes_allocated, 1);
    }

    #[test]
    fn falls_back_to_false_branch() {
        // 2 is pure at the root; 1 = true then forces 3 both ways
        let f = formula(3, vec![vec![1, 2], vec![-1, 3], vec![-1, -3], vec![2, 3]]);
        let mut solver = Solver::new(&f, SolverConfig::default());
        let outcome = solver.solve();
        let model = outcome.model().unwrap();
        assert_eq!(model.as_slice(), &[false, true, true]);
        assert!(f.is_satisfied_by(model));
        assert_eq!(solver.stats().dead_nodes, 1);
    }

    #[test]
    fn budget_exhaustion_is_unknown() {
        // both branches at the root are needed to prove this UNSAT
        let f = formula(2, vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]]);

        let mut starved = Solver::new(&f, SolverConfig::default().with_node_budget(1));
        assert_eq!(starved.solve(), Outcome::Unknown);
        assert_eq!(starved.stats().denied_allocations, 2);
        assert_eq!(starved.stats().nodes_allocated, 1);

        let mut enough = Solver::new(&f, SolverConfig::default().with_node_budget(2));
        assert_eq!(enough.solve(), Outcome::Unsatisfiable);
        assert_eq!(enough.stats().peak_live_nodes, 2);
    }

    #[test]
    fn empty_formula_needs_no_budget() {
        let f = formula(0, vec![]);
        let mut solver = Solver::new(&f, SolverConfig::default().with_node_budget(0));
        assert!(solver.solve().is_sat());
        assert_eq!(solver.stats(), SearchStats::default());
    }

    #[test]
    fn no_variables_with_empty_clause_is_unsat() {
        let f = formula(0, vec![vec![]]);
        let mut solver = Solver::new(&f, SolverConfig::default().with_node_budget(0));
        assert!(solver.solve().is_unsat());
    }

    #[test]
    fn long_decision_path() {
        // one unit clause and nothing else, so every other variable is a
        // decision and the search goes straight down 100k levels
        let f = formula(100_000, vec![vec![1]]);
        let mut solver = Solver::new(&f, SolverConfig::default());
        let outcome = solver.solve();
        let model = outcome.model().unwrap();
        assert_eq!(model.len(), 100_000);
        assert_eq!(model.value(1), Some(true));
        assert_eq!(model.value(100_000), Some(true));
        assert_eq!(solver.stats().nodes_allocated, 100_000);
        assert_eq!(solver.stats().max_depth, 99_999);
    }

    #[test]
    fn zero_budget_is_unknown() {
        let f = formula(1, vec![vec![1]]);
        let mut solver = Solver::new(&f, SolverConfig::default().with_node_budget(0));
        assert_eq!(solver.solve(), Outcome::Unknown);
    }

    #[test]
    fn repeated_solves_agree() {
        let f = formula(
            4,
            vec![vec![1, 2, -3], vec![-1, 3], vec![-2, 4], vec![-4, -1], vec![3, 4]],
        );
        let mut solver = Solver::new(&f, SolverConfig::default());
        let first = solver.solve();
        let first_stats = solver.stats();
        let second = solver.solve();
        assert_eq!(first, second);
        assert_eq!(first_stats, solver.stats());
        assert!(f.is_satisfied_by(first.model().unwrap()));
    }
}
