//! Small shared types: axes, per-axis pairs and storage order

use serde::{Deserialize, Serialize};

/// One of the two axes of a 2-D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (matrix columns)
    X,
    /// Vertical axis (matrix rows)
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

/// A value attached to each of the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct XY<T> {
    /// Horizontal component
    pub x: T,
    /// Vertical component
    pub y: T,
}

impl<T> XY<T> {
    /// Create a pair from its components.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Apply `f` to both components.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> XY<U> {
        XY {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl<T: Copy> XY<T> {
    /// Component along `axis`, by value.
    pub fn at(&self, axis: Axis) -> T {
        *self.get(axis)
    }
}

/// Linearization order of a core's flat data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageOrder {
    /// Last index varies fastest (C order)
    #[default]
    RowMajor,
    /// First index varies fastest (Fortran order)
    ColumnMajor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_get_and_map() {
        let xy = XY::new(3usize, 5usize);
        assert_eq!(xy.at(Axis::X), 3);
        assert_eq!(xy.at(Axis::Y), 5);

        let doubled = xy.map(|v| v * 2);
        assert_eq!(doubled, XY::new(6, 10));
    }

    #[test]
    fn test_storage_order_serde_names() {
        let order: StorageOrder = serde_json::from_str("\"column-major\"").unwrap();
        assert_eq!(order, StorageOrder::ColumnMajor);
        assert_eq!(
            serde_json::to_string(&StorageOrder::RowMajor).unwrap(),
            "\"row-major\""
        );
        assert_eq!(StorageOrder::default(), StorageOrder::RowMajor);
    }
}
