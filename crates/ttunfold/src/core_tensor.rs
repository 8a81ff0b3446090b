//! Rank-4 core tensors and flat-index conversions

use std::fmt;

use mdarray::DTensor;

use crate::error::{Result, UnfoldError};
use crate::types::StorageOrder;

/// Number of modes of every core.
pub const CORE_RANK: usize = 4;

/// Mode position of the left bond dimension `r_k`.
pub const LEFT_BOND: usize = 0;
/// Mode position of the row dimension `n_{k+1}`.
pub const ROW: usize = 1;
/// Mode position of the column dimension `m_{k+1}`.
pub const COLUMN: usize = 2;
/// Mode position of the right bond dimension `r_{k+1}`.
pub const RIGHT_BOND: usize = 3;

/// Convert a flat index into a multi-index.
///
/// `idx` must be smaller than the product of `shape`.
///
/// # Example
/// ```
/// use ttunfold::{unravel_index, StorageOrder};
///
/// assert_eq!(unravel_index(5, &[2, 3], StorageOrder::RowMajor), [1, 2]);
/// assert_eq!(unravel_index(5, &[2, 3], StorageOrder::ColumnMajor), [1, 2]);
/// assert_eq!(unravel_index(1, &[2, 3], StorageOrder::ColumnMajor), [1, 0]);
/// ```
pub fn unravel_index<const N: usize>(
    idx: usize,
    shape: &[usize; N],
    order: StorageOrder,
) -> [usize; N] {
    let mut sub = [0usize; N];
    let mut rem = idx;
    match order {
        StorageOrder::RowMajor => {
            for d in (0..N).rev() {
                sub[d] = rem % shape[d];
                rem /= shape[d];
            }
        }
        StorageOrder::ColumnMajor => {
            for d in 0..N {
                sub[d] = rem % shape[d];
                rem /= shape[d];
            }
        }
    }
    sub
}

/// Convert a multi-index into a flat index. Inverse of [`unravel_index`].
pub fn ravel_index<const N: usize>(
    sub: &[usize; N],
    shape: &[usize; N],
    order: StorageOrder,
) -> usize {
    match order {
        StorageOrder::RowMajor => (0..N).fold(0, |acc, d| acc * shape[d] + sub[d]),
        StorageOrder::ColumnMajor => (0..N).rev().fold(0, |acc, d| acc * shape[d] + sub[d]),
    }
}

/// Number of elements of `shape`, or `None` if it overflows `usize`.
fn checked_numel(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// One core of a tensor train.
///
/// Modes are (left bond, row, column, right bond). The flat data is kept in
/// the order it was supplied in, together with that order, so element `i`
/// of [`data`](Self::data) is exactly the element the loader produced.
#[derive(Clone, PartialEq)]
pub struct CoreTensor {
    data: Vec<f64>,
    shape: [usize; CORE_RANK],
    order: StorageOrder,
}

impl CoreTensor {
    /// Create a core from flat data, its shape and its storage order.
    ///
    /// Fails if `shape` does not have exactly four entries, if its element
    /// count does not fit in `usize`, or if the data length differs from it.
    pub fn new(data: Vec<f64>, shape: &[usize], order: StorageOrder) -> Result<Self> {
        let shape: [usize; CORE_RANK] = shape.try_into().map_err(|_| UnfoldError::InvalidRank {
            key: String::new(),
            rank: shape.len(),
        })?;

        let expected = checked_numel(&shape).ok_or(UnfoldError::ShapeOverflow { shape })?;
        if data.len() != expected {
            return Err(UnfoldError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { data, shape, order })
    }

    /// Create a core from an mdarray tensor. The result is row-major.
    pub fn from_dtensor(tensor: &DTensor<f64, 4>) -> Self {
        let shape = [tensor.dim(0), tensor.dim(1), tensor.dim(2), tensor.dim(3)];
        let numel: usize = shape.iter().product();
        let data = (0..numel)
            .map(|i| tensor[unravel_index(i, &shape, StorageOrder::RowMajor)])
            .collect();
        Self {
            data,
            shape,
            order: StorageOrder::RowMajor,
        }
    }

    /// Copy this core into an mdarray tensor.
    pub fn to_dtensor(&self) -> DTensor<f64, 4> {
        DTensor::<f64, 4>::from_fn(self.shape, |idx| {
            let sub = [idx[0], idx[1], idx[2], idx[3]];
            self.data[ravel_index(&sub, &self.shape, self.order)]
        })
    }

    /// Shape as (left bond, row, column, right bond)
    pub fn shape(&self) -> &[usize; CORE_RANK] {
        &self.shape
    }

    /// Length of mode `mode`
    pub fn dim(&self, mode: usize) -> usize {
        self.shape[mode]
    }

    /// Storage order of [`data`](Self::data)
    pub fn order(&self) -> StorageOrder {
        self.order
    }

    /// Flat data in storage order
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of elements
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Left bond dimension `r_k`
    pub fn left_dim(&self) -> usize {
        self.shape[LEFT_BOND]
    }

    /// Row dimension `n_{k+1}`
    pub fn row_dim(&self) -> usize {
        self.shape[ROW]
    }

    /// Column dimension `m_{k+1}`
    pub fn col_dim(&self) -> usize {
        self.shape[COLUMN]
    }

    /// Right bond dimension `r_{k+1}`
    pub fn right_dim(&self) -> usize {
        self.shape[RIGHT_BOND]
    }

    /// Multi-index of flat element `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.numel()`.
    pub fn unravel(&self, idx: usize) -> [usize; CORE_RANK] {
        assert!(
            idx < self.numel(),
            "flat index {idx} out of range for core of {} elements",
            self.numel()
        );
        unravel_index(idx, &self.shape, self.order)
    }

    /// Flat index of multi-index `sub`.
    ///
    /// # Panics
    /// Panics if any component of `sub` is out of range.
    pub fn ravel(&self, sub: &[usize; CORE_RANK]) -> usize {
        for (d, (&s, &n)) in sub.iter().zip(self.shape.iter()).enumerate() {
            assert!(s < n, "subscript {s} out of range for mode {d} of length {n}");
        }
        ravel_index(sub, &self.shape, self.order)
    }
}

impl fmt::Debug for CoreTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreTensor")
            .field("shape", &self.shape)
            .field("order", &self.order)
            .field("numel", &self.data.len())
            .finish()
    }
}
