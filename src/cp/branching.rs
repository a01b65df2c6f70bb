//! Branching configuration: which variable to assign next and which value
//! to try first.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::variables::VarId;

/// Variable-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarSelection {
    /// Lowest-id unbound variable.
    InOrder,
    /// Uniformly random unbound variable.
    Random,
    /// Unbound variable with the smallest `centrality` rank; ties go to the
    /// lower id. The rank table is supplied by the model (see
    /// [`CpModel::set_centrality`](super::CpModel::set_centrality)).
    Middle,
}

/// Value-selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValSelection {
    /// Try 0 first.
    Min,
    /// Try 1 first.
    Max,
    /// Uniformly random first value.
    Random,
}

/// A complete branching policy.
///
/// The seed drives every random choice made during one search run, so two
/// runs with equal policies explore the tree in the same order.
///
/// # Examples
///
/// ```
/// use u_nqueens::cp::{Branching, ValSelection, VarSelection};
///
/// let b = Branching::random(1);
/// assert_eq!(b.var, VarSelection::Random);
/// assert_eq!(b.val, ValSelection::Random);
/// assert_eq!(b.seed, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Branching {
    /// Variable order.
    pub var: VarSelection,
    /// Value order.
    pub val: ValSelection,
    /// Seed for the random source.
    pub seed: u64,
}

impl Branching {
    /// Random variable, random value.
    pub fn random(seed: u64) -> Self {
        Self {
            var: VarSelection::Random,
            val: ValSelection::Random,
            seed,
        }
    }

    /// Lowest-id variable, value 1 first. Deterministic regardless of seed.
    pub fn in_order() -> Self {
        Self {
            var: VarSelection::InOrder,
            val: ValSelection::Max,
            seed: 0,
        }
    }

    pub fn with_var(mut self, var: VarSelection) -> Self {
        self.var = var;
        self
    }

    pub fn with_val(mut self, val: ValSelection) -> Self {
        self.val = val;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Creates the random source for one search run.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

impl Default for Branching {
    fn default() -> Self {
        Self::random(1)
    }
}

/// Picks the next variable among `unbound` (non-empty, ascending ids).
pub(crate) fn select_var<R: Rng>(
    policy: VarSelection,
    unbound: &[VarId],
    centrality: &[u32],
    rng: &mut R,
) -> VarId {
    match policy {
        VarSelection::InOrder => unbound[0],
        VarSelection::Random => unbound[rng.random_range(0..unbound.len())],
        VarSelection::Middle => *unbound
            .iter()
            .min_by_key(|v| (centrality.get(v.index()).copied().unwrap_or(u32::MAX), v.index()))
            .unwrap_or(&unbound[0]),
    }
}

/// Picks the value to try first.
pub(crate) fn select_val<R: Rng>(policy: ValSelection, rng: &mut R) -> bool {
    match policy {
        ValSelection::Min => false,
        ValSelection::Max => true,
        ValSelection::Random => rng.random_bool(0.5),
    }
}
