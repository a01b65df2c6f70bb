//! CP solver interface and depth-first search implementation.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand_chacha::ChaCha8Rng;

use super::branching::{select_val, select_var, Branching};
use super::config::SolverConfig;
use super::model::CpModel;
use super::space::{Propagators, Space};
use super::variables::Assignment;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// The whole search tree was explored and at least one solution exists.
    Complete,
    /// Search stopped at the solution limit; more solutions may exist.
    Feasible,
    /// The whole search tree was explored and no solution exists.
    Infeasible,
    /// Model or configuration is invalid.
    ModelInvalid,
    /// Search exceeded its time or node limit.
    Timeout,
    /// Search was cancelled externally.
    Cancelled,
    /// The solution callback asked the search to stop.
    Stopped,
}

/// Counters collected during one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Search nodes visited (including the root).
    pub nodes: u64,
    /// Branches that failed during propagation.
    pub failures: u64,
    /// Propagator executions.
    pub propagations: u64,
    /// Deepest node visited (root = 0).
    pub peak_depth: usize,
    /// Solutions found.
    pub solutions: u64,
}

/// Summary of a search run that reported solutions through a callback.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Solver status.
    pub status: SolverStatus,
    /// Search statistics.
    pub stats: SearchStats,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
}

/// First solution of a search run.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// The first solution found, if any.
    pub assignment: Option<Assignment>,
    /// Search statistics.
    pub stats: SearchStats,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl CpSolution {
    /// Whether a solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.assignment.is_some()
    }
}

/// Trait for CP solver implementations.
///
/// Implementors provide propagation and search. The model supplies the
/// variables, constraints and branching policy.
pub trait CpSolver {
    /// Enumerates solutions, calling `on_solution` once per solution found.
    ///
    /// Returning [`ControlFlow::Break`] from the callback ends the search
    /// with [`SolverStatus::Stopped`].
    fn search(
        &self,
        model: &CpModel,
        config: &SolverConfig,
        on_solution: &mut dyn FnMut(&Assignment) -> ControlFlow<()>,
    ) -> SearchOutcome;

    /// Finds the first solution.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        let config = config.clone().with_solution_limit(1);
        let mut first = None;
        let outcome = self.search(model, &config, &mut |a: &Assignment| {
            if first.is_none() {
                first = Some(a.clone());
            }
            ControlFlow::Continue(())
        });
        CpSolution {
            status: outcome.status,
            assignment: first,
            stats: outcome.stats,
            solve_time_ms: outcome.solve_time_ms,
        }
    }

    /// Enumerates solutions without inspecting them.
    fn count(&self, model: &CpModel, config: &SolverConfig) -> SearchOutcome {
        self.search(model, config, &mut |_: &Assignment| ControlFlow::Continue(()))
    }
}

/// Depth-first search with forward-checking propagation.
///
/// Each branch point copies the current space, binds the selected variable
/// and propagates. Variables are chosen by the model's [`Branching`]; the
/// value tried first is chosen the same way and its complement second.
///
/// # Examples
///
/// ```
/// use u_nqueens::cp::{CpModel, CpSolver, DfsSolver, SolverConfig, SolverStatus};
///
/// let mut model = CpModel::new("one-of-three");
/// let xs = model.new_bool_vars(3, "x");
/// model.add_exactly(xs, 1);
///
/// let outcome = DfsSolver::new().count(&model, &SolverConfig::default().with_solution_limit(0));
/// assert_eq!(outcome.status, SolverStatus::Complete);
/// assert_eq!(outcome.stats.solutions, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfsSolver {
    cancel: Option<Arc<AtomicBool>>,
}

impl DfsSolver {
    pub fn new() -> Self {
        Self { cancel: None }
    }

    /// Attaches a cancellation flag, polled at every node.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

impl CpSolver for DfsSolver {
    fn search(
        &self,
        model: &CpModel,
        config: &SolverConfig,
        on_solution: &mut dyn FnMut(&Assignment) -> ControlFlow<()>,
    ) -> SearchOutcome {
        let start_time = Instant::now();

        if let Err(err) = model.validate().and_then(|_| config.validate()) {
            warn!("model {}: {err}", model.name);
            return SearchOutcome {
                status: SolverStatus::ModelInvalid,
                stats: SearchStats::default(),
                solve_time_ms: 0,
            };
        }

        let branching = model.branching();
        debug!(
            "search start: model={} vars={} fixed={} constraints={} branching={:?}",
            model.name,
            model.var_count(),
            model.vars.iter().filter(|v| v.is_fixed()).count(),
            model.constraint_count(),
            branching
        );

        let mut run = Run {
            model,
            props: Propagators::new(model),
            config,
            branching,
            rng: branching.rng(),
            deadline: (config.time_limit_ms > 0)
                .then(|| start_time + Duration::from_millis(config.time_limit_ms)),
            cancel: self.cancel.as_deref(),
            on_solution,
            stats: SearchStats::default(),
            stop: None,
        };

        let mut root = Space::root(model);
        let status = if root.propagate_all(&run.props, &mut run.stats.propagations) {
            run.explore(root, 0);
            match run.stop {
                Some(status) => status,
                None if run.stats.solutions > 0 => SolverStatus::Complete,
                None => SolverStatus::Infeasible,
            }
        } else {
            run.stats.nodes = 1;
            run.stats.failures = 1;
            SolverStatus::Infeasible
        };

        let solve_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "search end: model={} status={:?} solutions={} nodes={} failures={} time={}ms",
            model.name,
            status,
            run.stats.solutions,
            run.stats.nodes,
            run.stats.failures,
            solve_time_ms
        );

        SearchOutcome {
            status,
            stats: run.stats,
            solve_time_ms,
        }
    }
}

/// State of one search run.
struct Run<'a> {
    model: &'a CpModel,
    props: Propagators<'a>,
    config: &'a SolverConfig,
    branching: Branching,
    rng: ChaCha8Rng,
    deadline: Option<Instant>,
    cancel: Option<&'a AtomicBool>,
    on_solution: &'a mut dyn FnMut(&Assignment) -> ControlFlow<()>,
    stats: SearchStats,
    stop: Option<SolverStatus>,
}

impl Run<'_> {
    fn limit_reached(&self) -> Option<SolverStatus> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(SolverStatus::Cancelled);
        }
        if self.config.node_limit > 0 && self.stats.nodes >= self.config.node_limit {
            return Some(SolverStatus::Timeout);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(SolverStatus::Timeout);
        }
        None
    }

    fn explore(&mut self, space: Space, depth: usize) {
        if let Some(status) = self.limit_reached() {
            self.stop = Some(status);
            return;
        }

        self.stats.nodes += 1;
        self.stats.peak_depth = self.stats.peak_depth.max(depth);

        if space.is_solved() {
            self.stats.solutions += 1;
            trace!("solution #{} at depth {depth}", self.stats.solutions);
            if (self.on_solution)(&space.to_assignment()).is_break() {
                self.stop = Some(SolverStatus::Stopped);
                return;
            }
            let limit = self.config.solution_limit;
            if limit > 0 && self.stats.solutions >= limit as u64 {
                self.stop = Some(SolverStatus::Feasible);
            }
            return;
        }

        let unbound = space.unbound();
        let var = select_var(
            self.branching.var,
            &unbound,
            self.model.centrality(),
            &mut self.rng,
        );
        let first = select_val(self.branching.val, &mut self.rng);

        let mut left = space.clone();
        if left.assign(var, first, &self.props, &mut self.stats.propagations) {
            self.explore(left, depth + 1);
            if self.stop.is_some() {
                return;
            }
        } else {
            self.stats.failures += 1;
        }

        let mut right = space;
        if right.assign(var, !first, &self.props, &mut self.stats.propagations) {
            self.explore(right, depth + 1);
        } else {
            self.stats.failures += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{ValSelection, VarId, VarSelection};

    fn pick_one_of(n: usize) -> CpModel {
        let mut model = CpModel::new("pick");
        let xs = model.new_bool_vars(n, "x");
        model.add_exactly(xs, 1);
        model
    }

    fn all() -> SolverConfig {
        SolverConfig::default().with_solution_limit(0)
    }

    #[test]
    fn test_enumerates_all_solutions() {
        let mut solutions = Vec::new();
        let outcome = DfsSolver::new().search(&pick_one_of(4), &all(), &mut |a: &Assignment| {
            solutions.push(a.ones());
            ControlFlow::Continue(())
        });

        assert_eq!(outcome.status, SolverStatus::Complete);
        assert_eq!(outcome.stats.solutions, 4);
        solutions.sort();
        assert_eq!(
            solutions,
            vec![vec![VarId(0)], vec![VarId(1)], vec![VarId(2)], vec![VarId(3)]]
        );
    }

    #[test]
    fn test_solve_returns_complete_assignment() {
        let solution = DfsSolver::new().solve(&pick_one_of(5), &SolverConfig::default());

        assert_eq!(solution.status, SolverStatus::Feasible);
        let assignment = solution.assignment.unwrap();
        assert!(assignment.is_complete());
        assert_eq!(assignment.ones().len(), 1);
    }

    #[test]
    fn test_infeasible_at_root() {
        let mut model = CpModel::new("bad");
        let xs = model.new_bool_vars(2, "x");
        model.add_exactly(xs.clone(), 1);
        model.add_exactly(xs, 2);

        let solution = DfsSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(!solution.is_solution_found());
        assert_eq!(solution.stats.failures, 1);
    }

    #[test]
    fn test_infeasible_after_search() {
        // Two disjoint pairs each needing one 1, but at most one 1 overall.
        let mut model = CpModel::new("bad");
        let xs = model.new_bool_vars(4, "x");
        model.add_exactly(vec![xs[0], xs[1]], 1);
        model.add_exactly(vec![xs[2], xs[3]], 1);
        model.add_at_most(xs, 1);

        let outcome = DfsSolver::new().count(&model, &all());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
        assert_eq!(outcome.stats.solutions, 0);
        assert!(outcome.stats.failures > 0);
    }

    #[test]
    fn test_empty_model_has_one_solution() {
        let model = CpModel::new("empty");
        let mut seen = Vec::new();
        let outcome = DfsSolver::new().search(&model, &all(), &mut |a: &Assignment| {
            seen.push(a.clone());
            ControlFlow::Continue(())
        });

        assert_eq!(outcome.status, SolverStatus::Complete);
        assert_eq!(seen, vec![Assignment::complete(Vec::new())]);
        assert_eq!(outcome.stats.nodes, 1);
    }

    #[test]
    fn test_invalid_model() {
        let mut model = CpModel::new("bad");
        model.add_exactly(vec![VarId(3)], 1);

        let solution = DfsSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_solution_limit() {
        let outcome = DfsSolver::new().count(
            &pick_one_of(6),
            &SolverConfig::default().with_solution_limit(2),
        );
        assert_eq!(outcome.status, SolverStatus::Feasible);
        assert_eq!(outcome.stats.solutions, 2);
    }

    #[test]
    fn test_node_limit() {
        let mut model = CpModel::new("free");
        model.new_bool_vars(12, "x");

        let outcome = DfsSolver::new().count(&model, &all().with_node_limit(10));
        assert_eq!(outcome.status, SolverStatus::Timeout);
        assert_eq!(outcome.stats.nodes, 10);
    }

    #[test]
    fn test_time_limit() {
        // 2^64 leaves: the deadline is always reached first.
        let mut model = CpModel::new("free");
        model.new_bool_vars(64, "x");

        let outcome = DfsSolver::new().count(&model, &all().with_time_limit_ms(1));
        assert_eq!(outcome.status, SolverStatus::Timeout);
        assert!(outcome.stats.nodes > 0);
    }

    #[test]
    fn test_callback_stops_search() {
        let mut calls = 0;
        let outcome = DfsSolver::new().search(&pick_one_of(6), &all(), &mut |_: &Assignment| {
            calls += 1;
            if calls == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(outcome.status, SolverStatus::Stopped);
        assert_eq!(calls, 2);
        assert_eq!(outcome.stats.solutions, 2);
    }

    #[test]
    fn test_cancellation() {
        // Flag set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let outcome = DfsSolver::new()
            .with_cancel(cancel)
            .count(&pick_one_of(3), &all());

        assert_eq!(outcome.status, SolverStatus::Cancelled);
        assert_eq!(outcome.stats.solutions, 0);
    }

    #[test]
    fn test_fixed_variable_respected() {
        let mut model = pick_one_of(4);
        model.fix(VarId(2), true).unwrap();

        let outcome = DfsSolver::new().search(&model, &all(), &mut |a: &Assignment| {
            assert_eq!(a.ones(), vec![VarId(2)]);
            ControlFlow::Continue(())
        });
        assert_eq!(outcome.stats.solutions, 1);
    }

    #[test]
    fn test_in_order_max_first_order() {
        let mut model = pick_one_of(3);
        model.set_branching(Branching::in_order());

        let mut order = Vec::new();
        DfsSolver::new().search(&model, &all(), &mut |a: &Assignment| {
            order.push(a.ones()[0]);
            ControlFlow::Continue(())
        });
        assert_eq!(order, vec![VarId(0), VarId(1), VarId(2)]);

        model.set_branching(Branching::in_order().with_val(ValSelection::Min));
        order.clear();
        DfsSolver::new().search(&model, &all(), &mut |a: &Assignment| {
            order.push(a.ones()[0]);
            ControlFlow::Continue(())
        });
        assert_eq!(order, vec![VarId(2), VarId(1), VarId(0)]);
    }

    #[test]
    fn test_random_branching_reproducible() {
        let mut model = CpModel::new("free");
        let xs = model.new_bool_vars(10, "x");
        model.add_at_most(xs, 3);
        model.set_branching(Branching::random(42).with_var(VarSelection::Random));

        let first = |m: &CpModel| {
            DfsSolver::new()
                .solve(m, &SolverConfig::default())
                .assignment
                .unwrap()
        };
        assert_eq!(first(&model), first(&model));
    }

    #[test]
    fn test_peak_depth_bounded_by_vars() {
        let outcome = DfsSolver::new().count(&pick_one_of(5), &all());
        assert!(outcome.stats.peak_depth <= 5);
        assert!(outcome.stats.propagations > 0);
    }
}
