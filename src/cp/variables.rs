//! CP variable types and assignments.

use std::fmt;

/// Index of a variable within a [`CpModel`](super::CpModel).
///
/// Ids are dense: the `i`-th declared variable has id `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarId(pub usize);

impl VarId {
    /// Position of this variable in the model's variable list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A boolean (0/1) decision variable.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolVar {
    /// Id assigned by the model.
    pub id: VarId,
    /// Variable name.
    pub name: String,
    /// Fixed value, if any.
    pub fixed: Option<bool>,
}

impl BoolVar {
    /// Creates a new unfixed boolean variable.
    pub fn new(id: VarId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fixed: None,
        }
    }

    /// Whether this variable is fixed to a single value.
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }
}

/// Values of every model variable, bound or not.
///
/// Produced by the search engine for each solution (always complete) and
/// constructed by callers to render or inspect a known placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// Creates an assignment from per-variable values (`None` = unbound).
    pub fn new(values: Vec<Option<bool>>) -> Self {
        Self { values }
    }

    /// Creates a complete assignment.
    pub fn complete(values: Vec<bool>) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// Creates an assignment of `len` unbound variables.
    pub fn unbound(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// Value of `var`, or `None` if unbound or out of range.
    pub fn value(&self, var: VarId) -> Option<bool> {
        self.values.get(var.index()).copied().flatten()
    }

    /// Binds `var` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range.
    pub fn set(&mut self, var: VarId, value: bool) {
        self.values[var.index()] = Some(value);
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the assignment covers zero variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of unbound variables.
    pub fn unbound_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Whether every variable is bound.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Ids of the variables bound to 1, in ascending order.
    pub fn ones(&self) -> Vec<VarId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == Some(true))
            .map(|(i, _)| VarId(i))
            .collect()
    }
}
