//! Validation of arrays handed over by an archive loader
//!
//! Reading the archive itself is left to the caller. A loader produces one
//! [`ArrayEntry`] per stored array, already converted to `f64` values, and
//! [`cores_from_entries`] turns the list into cores ready for
//! [`TensorTrain::new`](crate::TensorTrain::new).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_tensor::{CoreTensor, CORE_RANK};
use crate::error::{Result, UnfoldError};
use crate::types::StorageOrder;

/// Element type of a stored array, named as in numpy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 8-bit signed integer
    Int8,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    #[default]
    Float64,
}

impl ElementType {
    /// Whether every value of this type is exactly representable as `f64`.
    pub fn fits_in_f64(self) -> bool {
        !matches!(self, ElementType::Int64 | ElementType::UInt64)
    }

    /// numpy name of the type
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Int8 => "int8",
            ElementType::UInt8 => "uint8",
            ElementType::Int16 => "int16",
            ElementType::UInt16 => "uint16",
            ElementType::Int32 => "int32",
            ElementType::UInt32 => "uint32",
            ElementType::Int64 => "int64",
            ElementType::UInt64 => "uint64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named array as produced by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayEntry {
    /// Name of the array inside the archive, without extension
    pub key: String,
    /// Element type the array was stored with
    #[serde(default)]
    pub dtype: ElementType,
    /// Shape of the array
    pub shape: Vec<usize>,
    /// Storage order of `data`
    #[serde(default)]
    pub order: StorageOrder,
    /// Values in storage order
    pub data: Vec<f64>,
}

impl ArrayEntry {
    /// Create a `float64` entry.
    pub fn new(
        key: impl Into<String>,
        shape: Vec<usize>,
        order: StorageOrder,
        data: Vec<f64>,
    ) -> Self {
        Self {
            key: key.into(),
            dtype: ElementType::Float64,
            shape,
            order,
            data,
        }
    }

    /// Set the element type
    pub fn with_dtype(mut self, dtype: ElementType) -> Self {
        self.dtype = dtype;
        self
    }

    fn into_core(self) -> Result<CoreTensor> {
        if !self.dtype.fits_in_f64() {
            return Err(UnfoldError::UnsupportedElementType {
                key: self.key,
                dtype: self.dtype,
            });
        }
        if self.shape.len() != CORE_RANK {
            return Err(UnfoldError::InvalidRank {
                key: self.key,
                rank: self.shape.len(),
            });
        }
        CoreTensor::new(self.data, &self.shape, self.order)
    }
}

/// Turn loader entries into cores.
///
/// Entries are ordered by key, ignoring ASCII case first and falling back to
/// byte order, since the member order of an archive carries no meaning. The whole list is rejected if it is empty, if any entry has
/// a 64-bit integer element type, if any entry is not rank 4, or if any
/// entry's data does not match its shape.
pub fn cores_from_entries(mut entries: Vec<ArrayEntry>) -> Result<Vec<CoreTensor>> {
    if entries.is_empty() {
        return Err(UnfoldError::Empty);
    }

    entries.sort_by(|a, b| key_order(&a.key, &b.key));
    tracing::debug!(
        keys = ?entries.iter().map(|e| e.key.as_str()).collect::<Vec<_>>(),
        "loading cores"
    );

    entries.into_iter().map(ArrayEntry::into_core).collect()
}

fn key_order(a: &str, b: &str) -> Ordering {
    let folded = a.bytes().map(|c| c.to_ascii_lowercase());
    folded
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, shape: &[usize]) -> ArrayEntry {
        let n: usize = shape.iter().product();
        ArrayEntry::new(key, shape.to_vec(), StorageOrder::RowMajor, vec![1.0; n])
    }

    #[test]
    fn test_sorted_by_key() {
        let cores = cores_from_entries(vec![
            entry("core_2", &[2, 3, 1, 1]),
            entry("core_0", &[1, 2, 1, 2]),
            entry("core_1", &[2, 4, 1, 2]),
        ])
        .unwrap();
        let rows: Vec<usize> = cores.iter().map(|c| c.row_dim()).collect();
        assert_eq!(rows, vec![2, 4, 3]);
    }

    #[test]
    fn test_sorted_by_key_ignores_case() {
        let cores = cores_from_entries(vec![
            entry("B", &[1, 3, 1, 1]),
            entry("a", &[1, 2, 1, 1]),
            entry("c", &[1, 4, 1, 1]),
        ])
        .unwrap();
        let rows: Vec<usize> = cores.iter().map(|c| c.row_dim()).collect();
        assert_eq!(rows, vec![2, 3, 4]);

        assert_eq!(key_order("a", "B"), Ordering::Less);
        assert_eq!(key_order("Core", "core"), Ordering::Less);
        assert_eq!(key_order("core_10", "core_2"), Ordering::Less);
    }

    #[test]
    fn test_rejects_64bit_integers() {
        for dtype in [ElementType::Int64, ElementType::UInt64] {
            let err = cores_from_entries(vec![
                entry("a", &[1, 2, 1, 1]),
                entry("b", &[1, 2, 1, 1]).with_dtype(dtype),
            ])
            .unwrap_err();
            assert_eq!(
                err,
                UnfoldError::UnsupportedElementType {
                    key: "b".to_string(),
                    dtype
                }
            );
        }
    }

    #[test]
    fn test_accepts_narrow_integers() {
        let cores =
            cores_from_entries(vec![entry("a", &[1, 2, 1, 1]).with_dtype(ElementType::Int32)])
                .unwrap();
        assert_eq!(cores.len(), 1);
    }

    #[test]
    fn test_rejects_wrong_rank() {
        let err = cores_from_entries(vec![entry("a", &[1, 2, 1, 1]), entry("b", &[2, 2, 1])])
            .unwrap_err();
        assert_eq!(
            err,
            UnfoldError::InvalidRank {
                key: "b".to_string(),
                rank: 3
            }
        );
    }

    #[test]
    fn test_rejects_overflowing_shape() {
        let oversized = ArrayEntry::new(
            "a",
            vec![1 << 32, 1 << 32, 1, 1],
            StorageOrder::RowMajor,
            vec![],
        );
        let err = cores_from_entries(vec![oversized]).unwrap_err();
        assert!(matches!(err, UnfoldError::ShapeOverflow { .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(cores_from_entries(vec![]).unwrap_err(), UnfoldError::Empty);
    }

    #[test]
    fn test_deserialize_entry_defaults() {
        let json = r#"{"key": "c0", "shape": [1, 2, 1, 1], "data": [0.5, 1.5]}"#;
        let entry: ArrayEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.dtype, ElementType::Float64);
        assert_eq!(entry.order, StorageOrder::RowMajor);

        let json = r#"{"key": "c0", "dtype": "uint64", "shape": [1], "order": "column-major", "data": [1]}"#;
        let entry: ArrayEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.dtype, ElementType::UInt64);
        assert_eq!(entry.order, StorageOrder::ColumnMajor);
    }
}
