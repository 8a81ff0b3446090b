//! Tensor trains of rank-4 cores

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core_tensor::CoreTensor;
use crate::error::{Result, UnfoldError};
use crate::mapping::{resolve_mapping, UnfoldDir};
use crate::source::{cores_from_entries, ArrayEntry};
use crate::ttmat::TTMat;

/// Kind of a tensor train, derived from its core shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainKind {
    /// Every core has column dimension 1 (a tensor train vector / MPS)
    Vector,
    /// Some core has column dimension other than 1 (a tensor train operator / MPO)
    Operator,
}

impl TrainKind {
    /// Kind of a train made of `cores`: operator as soon as one core has a
    /// column dimension other than 1.
    pub fn of_cores<'a>(cores: impl IntoIterator<Item = &'a CoreTensor>) -> Self {
        if cores.into_iter().any(|core| core.col_dim() != 1) {
            TrainKind::Operator
        } else {
            TrainKind::Vector
        }
    }

    /// Unfold directions valid for this kind
    pub fn available_unfolds(self) -> &'static [UnfoldDir] {
        match self {
            TrainKind::Vector => &UnfoldDir::VECTOR,
            TrainKind::Operator => &UnfoldDir::OPERATOR,
        }
    }

    /// Direction selected when none is requested
    pub fn default_unfold(self) -> UnfoldDir {
        match self {
            TrainKind::Vector => UnfoldDir::I_JK,
            TrainKind::Operator => UnfoldDir::IJ_KL,
        }
    }

    /// Whether `unfold` can be used for this kind
    pub fn supports(self, unfold: UnfoldDir) -> bool {
        self.available_unfolds().contains(&unfold)
    }
}

impl fmt::Display for TrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainKind::Vector => f.write_str("vector"),
            TrainKind::Operator => f.write_str("operator"),
        }
    }
}

/// Options for [`TensorTrain::matricize_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatricizeOptions {
    /// Unfold direction; `None` selects the train's default
    pub unfold: Option<UnfoldDir>,
    /// Use the default mapping on every core, ignoring boundary overrides
    pub strict: bool,
}

impl MatricizeOptions {
    /// Set the unfold direction
    pub fn with_unfold(mut self, unfold: UnfoldDir) -> Self {
        self.unfold = Some(unfold);
        self
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A tensor train of rank-4 cores (left bond, row, column, right bond).
///
/// The kind is fixed at construction. Cores are shared, so every [`TTMat`]
/// built from one train refers to the same data.
///
/// # Example
/// ```
/// use ttunfold::{Axis, CoreTensor, StorageOrder, TensorTrain, TrainKind, UnfoldDir};
///
/// let cores = vec![
///     CoreTensor::new(vec![0.0; 4], &[1, 2, 1, 2], StorageOrder::RowMajor).unwrap(),
///     CoreTensor::new(vec![0.0; 4], &[2, 2, 1, 1], StorageOrder::RowMajor).unwrap(),
/// ];
/// let tt = TensorTrain::new(cores).unwrap();
/// assert_eq!(tt.kind(), TrainKind::Vector);
///
/// let mat = tt.matricize(UnfoldDir::IJ_K, false).unwrap();
/// assert_eq!(mat.axis_label(0, Axis::X), "r1");
/// ```
#[derive(Debug, Clone)]
pub struct TensorTrain {
    cores: Vec<Arc<CoreTensor>>,
    kind: TrainKind,
}

impl TensorTrain {
    /// Create a tensor train. Fails if `cores` is empty.
    pub fn new(cores: Vec<CoreTensor>) -> Result<Self> {
        if cores.is_empty() {
            return Err(UnfoldError::Empty);
        }

        let kind = TrainKind::of_cores(&cores);
        tracing::debug!(cores = cores.len(), %kind, "built tensor train");

        Ok(Self {
            cores: cores.into_iter().map(Arc::new).collect(),
            kind,
        })
    }

    /// Create a tensor train from loader entries, see [`cores_from_entries`].
    pub fn from_entries(entries: Vec<ArrayEntry>) -> Result<Self> {
        Self::new(cores_from_entries(entries)?)
    }

    /// Kind derived from the core shapes
    pub fn kind(&self) -> TrainKind {
        self.kind
    }

    /// Number of cores
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// Always false; a train has at least one core
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Core at position `k`
    pub fn core(&self, k: usize) -> Option<&CoreTensor> {
        self.cores.get(k).map(|core| core.as_ref())
    }

    /// Iterate over the cores in order
    pub fn cores(&self) -> impl Iterator<Item = &CoreTensor> + '_ {
        self.cores.iter().map(|core| core.as_ref())
    }

    /// Unfold directions valid for this train
    pub fn available_unfolds(&self) -> &'static [UnfoldDir] {
        self.kind.available_unfolds()
    }

    /// Direction used when none is requested
    pub fn default_unfold(&self) -> UnfoldDir {
        self.kind.default_unfold()
    }

    /// Matricize every core with `unfold`.
    ///
    /// Unless `strict` is set, the first and last cores use the boundary
    /// overrides of `unfold`. Fails if `unfold` is not valid for this
    /// train's kind.
    pub fn matricize(&self, unfold: UnfoldDir, strict: bool) -> Result<TTMat> {
        if !self.kind.supports(unfold) {
            return Err(UnfoldError::UnsupportedUnfold {
                unfold,
                kind: self.kind,
            });
        }

        let count = self.cores.len();
        let cores = self
            .cores
            .iter()
            .enumerate()
            .map(|(k, core)| {
                let mapping = resolve_mapping(unfold, k, count, strict);
                tracing::trace!(
                    core = k,
                    overridden = mapping != unfold.default_mapping(),
                    "resolved mode mapping"
                );
                (Arc::clone(core), mapping)
            })
            .collect();

        tracing::debug!(%unfold, strict, cores = count, "matricized tensor train");
        Ok(TTMat::from_resolved(cores, unfold, strict))
    }

    /// Matricize according to `options`.
    pub fn matricize_with(&self, options: &MatricizeOptions) -> Result<TTMat> {
        let unfold = options.unfold.unwrap_or_else(|| self.default_unfold());
        self.matricize(unfold, options.strict)
    }
}
