//! CP model definition.

use std::collections::HashSet;

use log::debug;

use super::branching::Branching;
use super::variables::{BoolVar, VarId};
use crate::error::{CpError, Result};

/// A cardinality constraint over boolean variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Exactly `k` of `vars` equal 1.
    Exactly {
        /// Constrained variables.
        vars: Vec<VarId>,
        /// Required count of ones.
        k: usize,
    },

    /// At most `k` of `vars` equal 1.
    AtMost {
        /// Constrained variables.
        vars: Vec<VarId>,
        /// Maximum count of ones.
        k: usize,
    },
}

impl Constraint {
    /// Variables this constraint ranges over.
    pub fn vars(&self) -> &[VarId] {
        match self {
            Constraint::Exactly { vars, .. } | Constraint::AtMost { vars, .. } => vars,
        }
    }

    /// Whether a complete set of values satisfies this constraint.
    ///
    /// Unbound variables count as 0.
    pub fn is_satisfied_by(&self, value: impl Fn(VarId) -> Option<bool>) -> bool {
        let ones = self.vars().iter().filter(|&&v| value(v) == Some(true)).count();
        match self {
            Constraint::Exactly { k, .. } => ones == *k,
            Constraint::AtMost { k, .. } => ones <= *k,
        }
    }
}

/// A constraint programming model over boolean variables.
///
/// Contains variables, posted constraints, and the branching policy the
/// search engine should use.
///
/// # Examples
///
/// ```
/// use u_nqueens::cp::CpModel;
///
/// let mut model = CpModel::new("pick-one");
/// let xs = model.new_bool_vars(3, "x");
/// model.add_exactly(xs.clone(), 1);
/// model.add_at_most(vec![xs[0], xs[1]], 1);
/// assert_eq!(model.var_count(), 3);
/// assert_eq!(model.constraint_count(), 2);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    /// Boolean variables, indexed by [`VarId`].
    pub vars: Vec<BoolVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    branching: Branching,
    centrality: Vec<u32>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
            branching: Branching::default(),
            centrality: Vec::new(),
        }
    }

    /// Declares one boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(BoolVar::new(id, name));
        id
    }

    /// Declares `count` boolean variables named `{prefix}{i}`.
    pub fn new_bool_vars(&mut self, count: usize, prefix: &str) -> Vec<VarId> {
        let start = self.vars.len();
        (0..count)
            .map(|i| self.new_bool_var(format!("{prefix}{}", start + i)))
            .collect()
    }

    /// Fixes a declared variable to `value` before search.
    pub fn fix(&mut self, var: VarId, value: bool) -> Result<()> {
        let slot = self
            .vars
            .get_mut(var.index())
            .ok_or(CpError::UndefinedVariable(var.index()))?;
        slot.fixed = Some(value);
        Ok(())
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: exactly `k` of `vars` equal 1.
    pub fn add_exactly(&mut self, vars: Vec<VarId>, k: usize) {
        self.add_constraint(Constraint::Exactly { vars, k });
    }

    /// Convenience: at most `k` of `vars` equal 1.
    pub fn add_at_most(&mut self, vars: Vec<VarId>, k: usize) {
        self.add_constraint(Constraint::AtMost { vars, k });
    }

    /// Sets the branching policy used by the search engine.
    pub fn set_branching(&mut self, branching: Branching) {
        debug!(
            "model {}: branching var={:?} val={:?} seed={}",
            self.name, branching.var, branching.val, branching.seed
        );
        self.branching = branching;
    }

    /// Current branching policy.
    pub fn branching(&self) -> Branching {
        self.branching
    }

    /// Sets per-variable rank for [`VarSelection::Middle`](super::VarSelection::Middle).
    /// Lower rank is branched on first.
    pub fn set_centrality(&mut self, ranks: Vec<u32>) {
        self.centrality = ranks;
    }

    /// Per-variable rank table (may be empty).
    pub fn centrality(&self) -> &[u32] {
        &self.centrality
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and that no constraint
    /// lists a variable twice.
    pub fn validate(&self) -> Result<()> {
        for constraint in &self.constraints {
            let mut seen = HashSet::with_capacity(constraint.vars().len());
            for var in constraint.vars() {
                if var.index() >= self.vars.len() {
                    return Err(CpError::UndefinedVariable(var.index()));
                }
                if !seen.insert(*var) {
                    return Err(CpError::DuplicateVariable(var.index()));
                }
            }
        }
        Ok(())
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
