//! Coordinate translation for one matricized core
//!
//! A core element is addressed in four ways:
//! - **flat index** `i` in `[0, numel)`, the position in the stored data
//! - **original subscript**: the 4-tuple obtained by unravelling `i`
//! - **inner / outer subscript**: per axis, the components of the original
//!   subscript selected by the inner and outer mode of the mapping
//! - **matrix subscript**: per axis, `inner + outer * inner_shape`

use std::sync::Arc;

use crate::core_tensor::{CoreTensor, CORE_RANK};
use crate::mapping::ModeMapping;
use crate::types::{Axis, XY};

/// One core viewed as a blocked matrix under a resolved [`ModeMapping`].
#[derive(Debug, Clone)]
pub struct CoreMatricizer {
    core: Arc<CoreTensor>,
    index: usize,
    mapping: ModeMapping,
    inner_shape: XY<usize>,
    outer_shape: XY<usize>,
    mat_shape: XY<usize>,
}

impl CoreMatricizer {
    /// Create the matricizer of the core at position `index` in its train.
    pub fn new(core: Arc<CoreTensor>, index: usize, mapping: ModeMapping) -> Self {
        let shape = *core.shape();
        let inner_shape = mapping.inner.map(|mode| shape[mode]);
        let outer_shape = mapping.outer.map(|mode| mode.map_or(1, |m| shape[m]));
        // inner and outer use distinct modes, so each product divides numel
        let mat_shape = XY::new(
            inner_shape.x * outer_shape.x,
            inner_shape.y * outer_shape.y,
        );

        Self {
            core,
            index,
            mapping,
            inner_shape,
            outer_shape,
            mat_shape,
        }
    }

    /// Position of the core in its train (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// The resolved mapping
    pub fn mapping(&self) -> &ModeMapping {
        &self.mapping
    }

    /// The underlying core
    pub fn core(&self) -> &CoreTensor {
        &self.core
    }

    /// Number of elements of the core
    pub fn numel(&self) -> usize {
        self.core.numel()
    }

    /// Flat values in storage order; element `i` belongs to [`idx_to_sub(i)`](Self::idx_to_sub).
    pub fn data(&self) -> &[f64] {
        self.core.data()
    }

    /// Value of flat element `idx`
    pub fn value(&self, idx: usize) -> f64 {
        self.core.data()[idx]
    }

    /// Size of one block along each axis
    pub fn inner_shape(&self) -> XY<usize> {
        self.inner_shape
    }

    /// Number of blocks along each axis (1 where the axis has no outer mode)
    pub fn outer_shape(&self) -> XY<usize> {
        self.outer_shape
    }

    /// Size of the whole matrix along each axis
    pub fn mat_shape(&self) -> XY<usize> {
        self.mat_shape
    }

    /// Original 4-tuple subscript of flat element `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.numel()`.
    pub fn idx_to_orig_sub(&self, idx: usize) -> [usize; CORE_RANK] {
        self.core.unravel(idx)
    }

    /// Within-block coordinate of flat element `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.numel()`.
    pub fn idx_to_inner_sub(&self, idx: usize) -> XY<usize> {
        let sub = self.core.unravel(idx);
        self.inner_of(&sub)
    }

    /// Block coordinate of flat element `idx`; 0 on axes without an outer mode.
    ///
    /// # Panics
    /// Panics if `idx >= self.numel()`.
    pub fn idx_to_outer_sub(&self, idx: usize) -> XY<usize> {
        let sub = self.core.unravel(idx);
        self.outer_of(&sub)
    }

    /// Matrix coordinate of flat element `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.numel()`.
    pub fn idx_to_sub(&self, idx: usize) -> XY<usize> {
        let sub = self.core.unravel(idx);
        self.matrix_of(&sub)
    }

    /// Iterate over `(flat index, matrix coordinate, value)` for every element.
    pub fn cells(&self) -> impl Iterator<Item = (usize, XY<usize>, f64)> + '_ {
        self.core.data().iter().enumerate().map(move |(i, &v)| {
            let sub = self.core.unravel(i);
            (i, self.matrix_of(&sub), v)
        })
    }

    /// Size along `axis` of the whole matrix
    pub fn mat_len(&self, axis: Axis) -> usize {
        self.mat_shape.at(axis)
    }

    fn inner_of(&self, sub: &[usize; CORE_RANK]) -> XY<usize> {
        self.mapping.inner.map(|mode| sub[mode])
    }

    fn outer_of(&self, sub: &[usize; CORE_RANK]) -> XY<usize> {
        self.mapping.outer.map(|mode| mode.map_or(0, |m| sub[m]))
    }

    fn matrix_of(&self, sub: &[usize; CORE_RANK]) -> XY<usize> {
        let inner = self.inner_of(sub);
        let outer = self.outer_of(sub);
        XY::new(
            inner.x + outer.x * self.inner_shape.x,
            inner.y + outer.y * self.inner_shape.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{default_mapping, override_mapping, UnfoldDir};
    use crate::types::StorageOrder;

    fn core(shape: &[usize], order: StorageOrder) -> Arc<CoreTensor> {
        let n: usize = shape.iter().product();
        let data = (0..n).map(|x| x as f64).collect();
        Arc::new(CoreTensor::new(data, shape, order).unwrap())
    }

    #[test]
    fn test_boundary_override_shapes() {
        let mapping = override_mapping(UnfoldDir::IJ_K, 0, 3).unwrap();
        let mat = CoreMatricizer::new(core(&[1, 2, 3, 4], StorageOrder::RowMajor), 0, mapping);

        assert_eq!(mat.inner_shape(), XY::new(4, 2));
        assert_eq!(mat.outer_shape(), XY::new(1, 1));
        assert_eq!(mat.mat_shape(), XY::new(4, 2));
    }

    #[test]
    fn test_default_mapping_shapes() {
        // IJ_K: inner y = n, outer y = r_left, inner x = r_right
        let mat = CoreMatricizer::new(
            core(&[2, 3, 1, 4], StorageOrder::RowMajor),
            1,
            default_mapping(UnfoldDir::IJ_K),
        );
        assert_eq!(mat.inner_shape(), XY::new(4, 3));
        assert_eq!(mat.outer_shape(), XY::new(1, 2));
        assert_eq!(mat.mat_shape(), XY::new(4, 6));
        assert_eq!(mat.mat_len(Axis::Y), 6);
    }

    #[test]
    fn test_idx_to_sub_row_major() {
        let mat = CoreMatricizer::new(
            core(&[2, 3, 1, 4], StorageOrder::RowMajor),
            1,
            default_mapping(UnfoldDir::IJ_K),
        );
        // flat 13 -> (1, 0, 0, 1)
        assert_eq!(mat.idx_to_orig_sub(13), [1, 0, 0, 1]);
        assert_eq!(mat.idx_to_inner_sub(13), XY::new(1, 0));
        assert_eq!(mat.idx_to_outer_sub(13), XY::new(0, 1));
        // y = n + r_left * 3
        assert_eq!(mat.idx_to_sub(13), XY::new(1, 3));
    }

    #[test]
    fn test_idx_to_sub_column_major() {
        let mat = CoreMatricizer::new(
            core(&[2, 3, 1, 4], StorageOrder::ColumnMajor),
            1,
            default_mapping(UnfoldDir::I_JK),
        );
        // flat 13 -> (1, 0, 0, 2) in column-major order
        assert_eq!(mat.idx_to_orig_sub(13), [1, 0, 0, 2]);
        // I_JK: inner y = r_left, inner x = n, outer x = r_right
        assert_eq!(mat.inner_shape(), XY::new(3, 2));
        assert_eq!(mat.outer_shape(), XY::new(4, 1));
        assert_eq!(mat.idx_to_sub(13), XY::new(6, 1));
    }

    #[test]
    fn test_cells_cover_matrix_once() {
        let mat = CoreMatricizer::new(
            core(&[2, 3, 2, 2], StorageOrder::RowMajor),
            0,
            default_mapping(UnfoldDir::IJ_KL),
        );
        let shape = mat.mat_shape();
        assert_eq!(shape.x * shape.y, mat.numel());

        let mut seen = vec![false; mat.numel()];
        for (i, pos, v) in mat.cells() {
            assert_eq!(v, mat.value(i));
            let slot = pos.y * shape.x + pos.x;
            assert!(!seen[slot], "cell {pos:?} visited twice");
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_idx_out_of_range_panics() {
        let mat = CoreMatricizer::new(
            core(&[1, 2, 1, 2], StorageOrder::RowMajor),
            0,
            default_mapping(UnfoldDir::IJ_K),
        );
        mat.idx_to_sub(4);
    }
}
