//! The explicit search tree
//!
//! Every node the search visits is materialized, but a node only records what
//! it added to its parent's assignment: the decision it was created for, and
//! the literals its own processing fixed. The full assignment at a node is
//! the replay of everything on the path from the root down to it.
//!
//! Nodes own their children outright (no sharing, no back references), so
//! releasing a failed subtree is just handing its root back to the
//! [`NodeBudget`] that allocated it. Trees can be as deep as there are
//! variables, so nothing in here walks them recursively.

use crate::assignment::Assignment;
use crate::data::*;

/// Where a node is in its processing
///
/// `Created -> Checked -> Propagated -> PureEliminated`, then one of
/// `Branching`, `Solution` or `Dead`. A node can die from any of the first
/// four states.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeState {
    Created,
    Checked,
    Propagated,
    PureEliminated,
    Branching,
    Solution,
    Dead,
}

#[derive(Debug)]
pub struct Node {
    /// `None` at the root
    decision: Option<Literal>,
    /// Fixed by unit propagation and pure literal elimination at this node
    implied: Vec<Literal>,
    state: NodeState,
    depth: u32,
    /// The "decision variable is true" branch
    left: Option<Box<Node>>,
    /// The "decision variable is false" branch
    right: Option<Box<Node>>,
}

impl Node {
    fn new(decision: Option<Literal>, depth: u32) -> Box<Self> {
        Box::new(Self {
            decision,
            implied: Vec::new(),
            state: NodeState::Created,
            depth,
            left: None,
            right: None,
        })
    }

    /// The literal made true to create this node
    #[inline]
    pub fn decision(&self) -> Option<Literal> {
        self.decision
    }

    /// The branching variable, `None` at the root
    pub fn variable(&self) -> Option<VarId> {
        self.decision.map(Literal::var_id)
    }

    /// The value given to the branching variable, `None` at the root
    pub fn value(&self) -> Option<bool> {
        self.decision.map(Literal::polarity)
    }

    /// The literals this node's own simplification made true, in order
    #[inline]
    pub fn implied(&self) -> &[Literal] {
        &self.implied
    }

    pub(crate) fn record_implied(&mut self, lits: &[Literal]) {
        self.implied.clear();
        self.implied.extend_from_slice(lits);
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: NodeState) {
        log::trace!(
            "node {:?} at depth {}: {:?} -> {:?}",
            self.decision,
            self.depth,
            self.state,
            state
        );
        self.state = state;
    }

    #[inline]
    pub fn is_solution(&self) -> bool {
        self.state == NodeState::Solution
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub(crate) fn attach_left(&mut self, child: Box<Node>) {
        debug_assert_eq!(child.value(), Some(true));
        self.left = Some(child);
    }

    pub(crate) fn attach_right(&mut self, child: Box<Node>) {
        debug_assert_eq!(child.value(), Some(false));
        self.right = Some(child);
    }

    /// Attach `child` on the side its decision says it belongs
    pub(crate) fn attach(&mut self, child: Box<Node>) {
        match child.value() {
            Some(false) => self.attach_right(child),
            _ => self.attach_left(child),
        }
    }

    /// Number of nodes in this subtree, this one included
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.left());
            pending.extend(node.right());
        }
        count
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // unlink children first so dropping a long path doesn't recurse
        let mut pending: Vec<Box<Node>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Raised when an allocation would go over the node budget
///
/// Not the same thing as a dead branch: nothing was learned about the
/// formula.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BudgetExhausted;

/// Hands out nodes, and keeps count of how many are alive
///
/// One budget belongs to one solve; counts start at zero.
#[derive(Debug, Clone)]
pub struct NodeBudget {
    limit: usize,
    /// Nodes currently allocated
    live: usize,
    peak: usize,
    /// Nodes ever allocated
    allocated: usize,
    /// Allocations refused
    denied: usize,
}

impl NodeBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            live: 0,
            peak: 0,
            allocated: 0,
            denied: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn live(&self) -> usize {
        self.live
    }

    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn denied(&self) -> usize {
        self.denied
    }

    fn take_slot(&mut self) -> Result<(), BudgetExhausted> {
        if self.live >= self.limit {
            self.denied += 1;
            log::debug!("Node budget of {} exhausted", self.limit);
            return Err(BudgetExhausted);
        }
        self.live += 1;
        self.allocated += 1;
        self.peak = self.peak.max(self.live);
        Ok(())
    }

    /// A root node, with no decision
    pub fn alloc_root(&mut self) -> Result<Box<Node>, BudgetExhausted> {
        self.take_slot()?;
        Ok(Node::new(None, 0))
    }

    /// A child of `parent` that makes `decision` true
    pub fn alloc_child(
        &mut self,
        parent: &Node,
        decision: Literal,
    ) -> Result<Box<Node>, BudgetExhausted> {
        self.take_slot()?;
        Ok(Node::new(Some(decision), parent.depth + 1))
    }

    /// Free a node and everything under it
    ///
    /// Returns the number of nodes released
    pub fn release(&mut self, node: Box<Node>) -> usize {
        let mut released = 0;
        let mut pending = vec![node];
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            debug_assert!(self.live > 0);
            self.live = self.live.saturating_sub(1);
            released += 1;
        }
        released
    }
}

/// A whole search tree, as left behind by the search
#[derive(Debug)]
pub struct DecisionTree {
    root: Box<Node>,
}

impl DecisionTree {
    pub fn new(root: Box<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The nodes from the root down to the first solution node, depth first
    /// and left (true) before right (false), the same order the search takes
    pub fn locate_solution_path(&self) -> Option<Vec<&Node>> {
        let mut path: Vec<&Node> = Vec::new();
        let mut pending: Vec<&Node> = vec![&self.root];
        while let Some(node) = pending.pop() {
            path.truncate(node.depth().saturating_sub(self.root.depth()) as usize);
            path.push(node);
            if node.is_solution() {
                return Some(path);
            }
            pending.extend(node.right());
            pending.extend(node.left());
        }
        None
    }

    /// The first solution node
    pub fn locate_solution(&self) -> Option<&Node> {
        self.locate_solution_path()?.pop()
    }

    /// The assignment at the first solution node, rebuilt from the decisions
    /// and implied literals on its path
    pub fn solution_assignment(&self, variable_count: u32) -> Option<Assignment> {
        let path = self.locate_solution_path()?;
        let mut assignment = Assignment::unassigned(variable_count);
        for node in path {
            for lit in node.decision().into_iter().chain(node.implied().iter().copied()) {
                if assignment.lookup(lit) != Some(Unknown) {
                    log::error!("Solution path assigns {} twice or out of range", lit);
                    return None;
                }
                assignment.assign_true(lit);
            }
        }
        Some(assignment)
    }

    /// Release every node back to `budget`
    pub fn teardown(self, budget: &mut NodeBudget) -> usize {
        budget.release(self.root)
    }
}
