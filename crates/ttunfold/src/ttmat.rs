//! Matricized view of a whole tensor train

use std::sync::Arc;

use crate::core_tensor::CoreTensor;
use crate::label::LabelFormatter;
use crate::mapping::{ModeMapping, UnfoldDir};
use crate::matricizer::CoreMatricizer;
use crate::types::{Axis, XY};

/// A tensor train matricized with one unfold direction and strictness.
///
/// Holds one `(CoreMatricizer, LabelFormatter)` pair per core, in train
/// order. A `TTMat` is never modified; a change of direction or strictness
/// produces a new one via [`TensorTrain::matricize`](crate::TensorTrain::matricize).
///
/// The per-core accessors take the core position `k` and panic if it is out
/// of range, like slice indexing.
#[derive(Debug, Clone)]
pub struct TTMat {
    cores: Vec<(CoreMatricizer, LabelFormatter)>,
    unfold: UnfoldDir,
    strict: bool,
}

impl TTMat {
    pub(crate) fn from_resolved(
        resolved: Vec<(Arc<CoreTensor>, ModeMapping)>,
        unfold: UnfoldDir,
        strict: bool,
    ) -> Self {
        let cores = resolved
            .into_iter()
            .enumerate()
            .map(|(k, (core, mapping))| {
                (
                    CoreMatricizer::new(core, k, mapping),
                    LabelFormatter::new(k, mapping),
                )
            })
            .collect();

        Self {
            cores,
            unfold,
            strict,
        }
    }

    /// Direction used for every core
    pub fn unfold(&self) -> UnfoldDir {
        self.unfold
    }

    /// Whether boundary overrides were ignored
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Number of cores
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// Whether there are no cores
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Pair of core `k`, if any
    pub fn core(&self, k: usize) -> Option<(&CoreMatricizer, &LabelFormatter)> {
        self.cores.get(k).map(|(mat, fig)| (mat, fig))
    }

    /// Iterate over the pairs in train order
    pub fn iter(&self) -> impl Iterator<Item = (&CoreMatricizer, &LabelFormatter)> + '_ {
        self.cores.iter().map(|(mat, fig)| (mat, fig))
    }

    /// Matricizer of core `k`
    pub fn matricizer(&self, k: usize) -> &CoreMatricizer {
        &self.cores[k].0
    }

    /// Label formatter of core `k`
    pub fn labels(&self, k: usize) -> &LabelFormatter {
        &self.cores[k].1
    }

    /// Matrix size of core `k` along `axis`
    pub fn mat_shape(&self, k: usize, axis: Axis) -> usize {
        self.matricizer(k).mat_shape().at(axis)
    }

    /// Block size of core `k` along `axis`
    pub fn inner_shape(&self, k: usize, axis: Axis) -> usize {
        self.matricizer(k).inner_shape().at(axis)
    }

    /// Number of blocks of core `k` along `axis`
    pub fn outer_shape(&self, k: usize, axis: Axis) -> usize {
        self.matricizer(k).outer_shape().at(axis)
    }

    /// Matrix coordinate of flat element `idx` of core `k`
    pub fn matrix_coordinate(&self, k: usize, idx: usize) -> XY<usize> {
        self.matricizer(k).idx_to_sub(idx)
    }

    /// Axis label of core `k`
    pub fn axis_label(&self, k: usize, axis: Axis) -> String {
        self.labels(k).axis_label(axis)
    }

    /// Inner tick text of core `k`
    pub fn tick_label(&self, k: usize, axis: Axis, tick: usize) -> String {
        self.labels(k).tick_label(axis, tick)
    }

    /// Block tick text of core `k`, `None` on axes without blocks
    pub fn outer_tick_label(&self, k: usize, axis: Axis, block: usize) -> Option<String> {
        self.labels(k).outer_tick_label(axis, block)
    }

    /// Tooltip of flat element `idx` of core `k`
    pub fn tooltip_text(&self, k: usize, idx: usize) -> String {
        let (mat, fig) = &self.cores[k];
        fig.tooltip_text(&mat.idx_to_orig_sub(idx))
    }
}
