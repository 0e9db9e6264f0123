//! Traversal bounds.

use crate::error::{InferError, Result};

/// Caps applied while lowering and walking an AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest node level visited; the root is level 0.
    pub max_depth: usize,
    /// Total nodes visited in one pass.
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: 512,
            max_nodes: 1_000_000,
        }
    }
}

/// Per-pass counter checked on every node entered.
#[derive(Debug)]
pub(crate) struct Budget {
    limits: Limits,
    visited: usize,
}

impl Budget {
    pub(crate) fn new(limits: &Limits) -> Self {
        Budget {
            limits: *limits,
            visited: 0,
        }
    }

    pub(crate) fn enter(&mut self, depth: usize) -> Result<()> {
        if depth > self.limits.max_depth {
            return Err(InferError::LimitExceeded {
                what: "depth",
                limit: self.limits.max_depth,
            });
        }
        self.visited += 1;
        if self.visited > self.limits.max_nodes {
            return Err(InferError::LimitExceeded {
                what: "nodes",
                limit: self.limits.max_nodes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_checked_before_counting() {
        let mut budget = Budget::new(&Limits {
            max_depth: 1,
            max_nodes: 10,
        });
        assert!(budget.enter(0).is_ok());
        assert!(budget.enter(1).is_ok());
        assert_eq!(
            budget.enter(2),
            Err(InferError::LimitExceeded {
                what: "depth",
                limit: 1
            })
        );
    }

    #[test]
    fn node_budget_runs_out() {
        let mut budget = Budget::new(&Limits {
            max_depth: 8,
            max_nodes: 2,
        });
        budget.enter(0).unwrap();
        budget.enter(1).unwrap();
        assert!(matches!(
            budget.enter(1),
            Err(InferError::LimitExceeded { what: "nodes", .. })
        ));
    }
}
