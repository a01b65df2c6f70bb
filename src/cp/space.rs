//! Variable domains and cardinality propagation.
//!
//! A [`Space`] holds the current domain of every variable. Search copies
//! the space at every branch; propagation narrows a copy in place and
//! reports failure when a constraint can no longer be met.

use std::collections::VecDeque;

use super::model::{Constraint, CpModel};
use super::variables::{Assignment, VarId};

/// Compiled propagators plus per-variable watch lists.
#[derive(Debug)]
pub(crate) struct Propagators<'m> {
    constraints: &'m [Constraint],
    watchers: Vec<Vec<usize>>,
}

impl<'m> Propagators<'m> {
    pub(crate) fn new(model: &'m CpModel) -> Self {
        let mut watchers = vec![Vec::new(); model.var_count()];
        for (ci, c) in model.constraints.iter().enumerate() {
            for v in c.vars() {
                watchers[v.index()].push(ci);
            }
        }
        Self {
            constraints: &model.constraints,
            watchers,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }
}

/// Domains of all variables during search.
#[derive(Debug, Clone)]
pub(crate) struct Space {
    values: Vec<Option<bool>>,
}

impl Space {
    /// Root space: every variable unbound except those fixed in the model.
    pub(crate) fn root(model: &CpModel) -> Self {
        Self {
            values: model.vars.iter().map(|v| v.fixed).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn value(&self, var: VarId) -> Option<bool> {
        self.values[var.index()]
    }

    /// Unbound variables in ascending id order.
    pub(crate) fn unbound(&self) -> Vec<VarId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| VarId(i))
            .collect()
    }

    pub(crate) fn is_solved(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub(crate) fn to_assignment(&self) -> Assignment {
        Assignment::new(self.values.clone())
    }

    /// Runs every propagator to fixpoint.
    ///
    /// Returns `false` on failure. `executed` is incremented once per
    /// propagator run.
    pub(crate) fn propagate_all(&mut self, props: &Propagators<'_>, executed: &mut u64) -> bool {
        let queue: VecDeque<usize> = (0..props.len()).collect();
        self.propagate(props, queue, executed)
    }

    /// Binds `var` and propagates the consequences.
    ///
    /// Returns `false` if the binding conflicts with the current domain or
    /// leads to a failed propagator.
    pub(crate) fn assign(
        &mut self,
        var: VarId,
        value: bool,
        props: &Propagators<'_>,
        executed: &mut u64,
    ) -> bool {
        match self.values[var.index()] {
            Some(current) => current == value,
            None => {
                self.values[var.index()] = Some(value);
                let queue: VecDeque<usize> = props.watchers[var.index()].iter().copied().collect();
                self.propagate(props, queue, executed)
            }
        }
    }

    fn propagate(
        &mut self,
        props: &Propagators<'_>,
        mut queue: VecDeque<usize>,
        executed: &mut u64,
    ) -> bool {
        let mut queued = vec![false; props.len()];
        for &ci in &queue {
            queued[ci] = true;
        }

        while let Some(ci) = queue.pop_front() {
            queued[ci] = false;
            *executed += 1;

            let newly_fixed = match self.run(&props.constraints[ci]) {
                Some(fixed) => fixed,
                None => return false,
            };

            for var in newly_fixed {
                for &w in &props.watchers[var.index()] {
                    if !queued[w] {
                        queued[w] = true;
                        queue.push_back(w);
                    }
                }
            }
        }
        true
    }

    /// Executes one propagator. Returns the variables it fixed, or `None`
    /// on failure.
    fn run(&mut self, constraint: &Constraint) -> Option<Vec<VarId>> {
        let vars = constraint.vars();
        let mut ones = 0usize;
        let mut free = 0usize;
        for &v in vars {
            match self.values[v.index()] {
                Some(true) => ones += 1,
                None => free += 1,
                Some(false) => {}
            }
        }

        let fill = match *constraint {
            Constraint::Exactly { k, .. } => {
                if ones > k || ones + free < k {
                    return None;
                }
                if free == 0 {
                    None
                } else if ones == k {
                    Some(false)
                } else if ones + free == k {
                    Some(true)
                } else {
                    None
                }
            }
            Constraint::AtMost { k, .. } => {
                if ones > k {
                    return None;
                }
                if free > 0 && ones == k {
                    Some(false)
                } else {
                    None
                }
            }
        };

        let Some(fill) = fill else {
            return Some(Vec::new());
        };

        let mut fixed = Vec::with_capacity(free);
        for &v in vars {
            if self.values[v.index()].is_none() {
                self.values[v.index()] = Some(fill);
                fixed.push(v);
            }
        }
        Some(fixed)
    }
}
