#![warn(missing_docs)]
//! Matricization and index mapping for tensor-train core viewers.
//!
//! A tensor train is a chain of rank-4 cores with modes
//! (left bond `r_k`, row `n_{k+1}`, column `m_{k+1}`, right bond `r_{k+1}`).
//! To draw a core as a heat map it has to be unfolded into a blocked matrix.
//! This crate computes, for every element of every core, the matrix cell it
//! lands in, that cell's split into an inner (within block) and outer (block)
//! coordinate, and the label, tick and tooltip text describing it.
//!
//! # Overview
//!
//! - [`TensorTrain`]: the cores, with a [`TrainKind`] derived from their shapes
//! - [`UnfoldDir`]: the unfolding schemes and their [`ModeMapping`]s
//! - [`TTMat`]: one [`CoreMatricizer`] and one [`LabelFormatter`] per core
//! - [`cores_from_entries`]: validation of arrays coming from an archive loader
//!
//! ## Unfold directions
//!
//! | direction | rows (y)        | columns (x)     | train kind |
//! |-----------|-----------------|-----------------|------------|
//! | `IJ_K`    | `n` within `r_l`| `r_r`           | vector     |
//! | `JI_K`    | `r_l` within `n`| `r_r`           | vector     |
//! | `I_JK`    | `r_l`           | `n` within `r_r`| vector     |
//! | `I_KJ`    | `r_l`           | `r_r` within `n`| vector     |
//! | `IJ_KL`   | `n` within `r_l`| `m` within `r_r`| operator   |
//!
//! The first and last core of a train have a bond dimension of 1. Unless
//! strict mode is requested, the vector directions replace the mapping of
//! these two cores by one without blocks.
//!
//! # Example
//!
//! ```
//! use ttunfold::{Axis, CoreTensor, StorageOrder, TensorTrain, UnfoldDir, XY};
//!
//! let core = |shape: &[usize]| {
//!     let n: usize = shape.iter().product();
//!     CoreTensor::new((0..n).map(|x| x as f64).collect(), shape, StorageOrder::RowMajor)
//!         .unwrap()
//! };
//! let tt = TensorTrain::new(vec![
//!     core(&[1, 2, 1, 3]),
//!     core(&[3, 2, 1, 3]),
//!     core(&[3, 2, 1, 1]),
//! ])
//! .unwrap();
//!
//! let mat = tt.matricize(UnfoldDir::IJ_K, false).unwrap();
//!
//! // Middle core: rows are n2 within blocks of r1
//! assert_eq!(mat.matricizer(1).mat_shape(), XY::new(3, 6));
//! assert_eq!(mat.axis_label(1, Axis::Y), "n2 × r1");
//! assert_eq!(mat.tooltip_text(1, 10), "r1=1\nn2=1\nr2=1");
//!
//! // First core: boundary override, no blocks
//! assert_eq!(mat.matricizer(0).outer_shape(), XY::new(1, 1));
//! ```
//!
//! # Error Handling
//!
//! Invalid input (empty train, wrong rank, an oversized shape, 64-bit integer
//! data, a direction that does not fit the train) is reported as
//! [`UnfoldError`]. Passing a flat index outside a core is a programming
//! error and panics.

mod core_tensor;
mod error;
mod label;
mod mapping;
mod matricizer;
mod source;
mod tensortrain;
mod ttmat;
mod types;

pub use core_tensor::{
    ravel_index, unravel_index, CoreTensor, COLUMN, CORE_RANK, LEFT_BOND, RIGHT_BOND, ROW,
};
pub use error::{Result, UnfoldError};
pub use label::{LabelFormatter, TOOLTIP_SEPARATOR};
pub use mapping::{
    default_mapping, normalize_core_index, override_mapping, resolve_mapping, MappingOverride,
    ModeMapping, UnfoldDir,
};
pub use matricizer::CoreMatricizer;
pub use source::{cores_from_entries, ArrayEntry, ElementType};
pub use tensortrain::{MatricizeOptions, TensorTrain, TrainKind};
pub use ttmat::TTMat;
pub use types::{Axis, StorageOrder, XY};
