//! Unfold directions and their mode mappings
//!
//! Every unfold direction assigns, for each axis of the 2-D view, an inner
//! mode and an optional outer mode of the rank-4 core. The boundary cores of
//! a train have a bond dimension of 1, so the vector-type directions carry
//! override mappings for the first and last core that drop the block
//! structure. Overrides are keyed by a signed core index where `-1` denotes
//! the last core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnfoldError;
use crate::tensortrain::TrainKind;
use crate::types::{Axis, XY};

/// Assignment of core modes to the inner and outer part of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeMapping {
    /// Mode indexed within one block
    pub inner: XY<usize>,
    /// Mode selecting the block; `None` means the axis has a single block
    pub outer: XY<Option<usize>>,
}

impl ModeMapping {
    /// Inner mode along `axis`
    pub fn inner_mode(&self, axis: Axis) -> usize {
        self.inner.at(axis)
    }

    /// Outer mode along `axis`, if the axis has blocks
    pub fn outer_mode(&self, axis: Axis) -> Option<usize> {
        self.outer.at(axis)
    }

    /// Modes referenced by this mapping, sorted ascending.
    pub fn used_modes(&self) -> Vec<usize> {
        let mut modes: Vec<usize> = [
            Some(self.inner.x),
            Some(self.inner.y),
            self.outer.x,
            self.outer.y,
        ]
        .into_iter()
        .flatten()
        .collect();
        modes.sort_unstable();
        modes
    }
}

/// Override of the default mapping for one core position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingOverride {
    /// Core position; negative values count from the end (`-1` is the last core)
    pub core_index: isize,
    /// Mapping used instead of the default
    pub mapping: ModeMapping,
}

const fn mapping(
    inner_y: usize,
    inner_x: usize,
    outer_y: Option<usize>,
    outer_x: Option<usize>,
) -> ModeMapping {
    ModeMapping {
        inner: XY::new(inner_x, inner_y),
        outer: XY::new(outer_x, outer_y),
    }
}

static IJ_K_DEFAULT: ModeMapping = mapping(1, 3, Some(0), None);
static JI_K_DEFAULT: ModeMapping = mapping(0, 3, Some(1), None);
static I_JK_DEFAULT: ModeMapping = mapping(0, 1, None, Some(3));
static I_KJ_DEFAULT: ModeMapping = mapping(0, 3, None, Some(1));
static IJ_KL_DEFAULT: ModeMapping = mapping(1, 2, Some(0), Some(3));

/// Boundary overrides shared by all vector-type directions.
static VECTOR_BOUNDARY_OVERRIDES: [MappingOverride; 2] = [
    MappingOverride {
        core_index: 0,
        mapping: mapping(1, 3, None, None),
    },
    MappingOverride {
        core_index: -1,
        mapping: mapping(0, 1, None, None),
    },
];

/// Unfold direction of a tensor-train core.
///
/// The first four apply to vector-type trains (column dimension 1 on every
/// core); [`UnfoldDir::IJ_KL`] is the only direction for operator-type trains.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnfoldDir {
    /// `IJ x K`: natural and reshape-like left-unfolding
    IJ_K,
    /// `JI x K`
    JI_K,
    /// `I x JK`: natural right-unfolding
    I_JK,
    /// `I x KJ`: reshape-like right-unfolding
    I_KJ,
    /// `IJ x KL`: natural matricization of an operator core
    IJ_KL,
}

impl UnfoldDir {
    /// Every direction, vector-type first.
    pub const ALL: [UnfoldDir; 5] = [
        UnfoldDir::IJ_K,
        UnfoldDir::JI_K,
        UnfoldDir::I_JK,
        UnfoldDir::I_KJ,
        UnfoldDir::IJ_KL,
    ];

    /// Directions available for vector-type trains.
    pub const VECTOR: [UnfoldDir; 4] = [
        UnfoldDir::IJ_K,
        UnfoldDir::JI_K,
        UnfoldDir::I_JK,
        UnfoldDir::I_KJ,
    ];

    /// Directions available for operator-type trains.
    pub const OPERATOR: [UnfoldDir; 1] = [UnfoldDir::IJ_KL];

    /// Scheme name, e.g. `"IJ_K"`
    pub fn name(self) -> &'static str {
        match self {
            UnfoldDir::IJ_K => "IJ_K",
            UnfoldDir::JI_K => "JI_K",
            UnfoldDir::I_JK => "I_JK",
            UnfoldDir::I_KJ => "I_KJ",
            UnfoldDir::IJ_KL => "IJ_KL",
        }
    }

    /// Human readable description shown next to the option
    pub fn description(self) -> &'static str {
        match self {
            UnfoldDir::IJ_K => "IJ x K (natural and reshape-like left-unfolding)",
            UnfoldDir::JI_K => "JI x K",
            UnfoldDir::I_JK => "I x JK (natural right-unfolding)",
            UnfoldDir::I_KJ => "I x KJ (reshape-like right-unfolding)",
            UnfoldDir::IJ_KL => "IJ x KL (natural matricization)",
        }
    }

    /// Kind of train this direction applies to
    pub fn kind(self) -> TrainKind {
        match self {
            UnfoldDir::IJ_KL => TrainKind::Operator,
            _ => TrainKind::Vector,
        }
    }

    /// Default mapping of this direction.
    pub fn default_mapping(self) -> ModeMapping {
        default_mapping(self)
    }

    /// Boundary overrides of this direction.
    pub fn overrides(self) -> &'static [MappingOverride] {
        match self {
            UnfoldDir::IJ_KL => &[],
            _ => &VECTOR_BOUNDARY_OVERRIDES[..],
        }
    }
}

impl fmt::Display for UnfoldDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnfoldDir {
    type Err = UnfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnfoldDir::ALL
            .into_iter()
            .find(|dir| dir.name() == s)
            .ok_or_else(|| UnfoldError::UnknownUnfold(s.to_string()))
    }
}

/// Normalize a signed core position: negative values count from the end.
///
/// `normalize_core_index(i, len)` is `i + len` when `i < 0` and `i` otherwise.
/// The result is not range-checked; a position that is still negative or
/// `>= len` simply matches no core.
///
/// ```
/// use ttunfold::normalize_core_index;
///
/// assert_eq!(normalize_core_index(-1, 3), 2);
/// assert_eq!(normalize_core_index(0, 3), 0);
/// assert_eq!(normalize_core_index(-4, 3), -1);
/// ```
pub fn normalize_core_index(index: isize, len: usize) -> isize {
    if index < 0 {
        index + len as isize
    } else {
        index
    }
}

/// Default mapping of `unfold`.
pub fn default_mapping(unfold: UnfoldDir) -> ModeMapping {
    match unfold {
        UnfoldDir::IJ_K => IJ_K_DEFAULT,
        UnfoldDir::JI_K => JI_K_DEFAULT,
        UnfoldDir::I_JK => I_JK_DEFAULT,
        UnfoldDir::I_KJ => I_KJ_DEFAULT,
        UnfoldDir::IJ_KL => IJ_KL_DEFAULT,
    }
}

/// Override mapping of `unfold` for the core at `core_index` in a train of
/// `core_count` cores, if one exists. The first matching entry wins.
pub fn override_mapping(
    unfold: UnfoldDir,
    core_index: usize,
    core_count: usize,
) -> Option<ModeMapping> {
    unfold
        .overrides()
        .iter()
        .find(|entry| normalize_core_index(entry.core_index, core_count) == core_index as isize)
        .map(|entry| entry.mapping)
}

/// Mapping used for one core: the default, replaced wholesale by the
/// override for that position unless `strict` is set.
pub fn resolve_mapping(
    unfold: UnfoldDir,
    core_index: usize,
    core_count: usize,
    strict: bool,
) -> ModeMapping {
    if strict {
        return default_mapping(unfold);
    }
    override_mapping(unfold, core_index, core_count).unwrap_or_else(|| default_mapping(unfold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_core_index() {
        assert_eq!(normalize_core_index(0, 5), 0);
        assert_eq!(normalize_core_index(3, 5), 3);
        assert_eq!(normalize_core_index(-1, 5), 4);
        assert_eq!(normalize_core_index(-5, 5), 0);
        assert_eq!(normalize_core_index(-6, 5), -1);
        assert_eq!(normalize_core_index(7, 5), 7);
    }

    #[test]
    fn test_default_mappings_table() {
        let m = default_mapping(UnfoldDir::IJ_K);
        assert_eq!(m.inner, XY::new(3, 1));
        assert_eq!(m.outer, XY::new(None, Some(0)));

        let m = default_mapping(UnfoldDir::JI_K);
        assert_eq!(m.inner, XY::new(3, 0));
        assert_eq!(m.outer, XY::new(None, Some(1)));

        let m = default_mapping(UnfoldDir::I_JK);
        assert_eq!(m.inner, XY::new(1, 0));
        assert_eq!(m.outer, XY::new(Some(3), None));

        let m = default_mapping(UnfoldDir::I_KJ);
        assert_eq!(m.inner, XY::new(3, 0));
        assert_eq!(m.outer, XY::new(Some(1), None));

        let m = default_mapping(UnfoldDir::IJ_KL);
        assert_eq!(m.inner, XY::new(2, 1));
        assert_eq!(m.outer, XY::new(Some(3), Some(0)));
    }

    #[test]
    fn test_override_first_and_last() {
        for unfold in UnfoldDir::VECTOR {
            let first = override_mapping(unfold, 0, 3).unwrap();
            assert_eq!(first.inner, XY::new(3, 1));
            assert_eq!(first.outer, XY::new(None, None));

            let last = override_mapping(unfold, 2, 3).unwrap();
            assert_eq!(last.inner, XY::new(1, 0));
            assert_eq!(last.outer, XY::new(None, None));

            assert_eq!(override_mapping(unfold, 1, 3), None);
        }
    }

    #[test]
    fn test_single_core_takes_first_override() {
        // core 0 is both first and last; the first entry wins
        let m = override_mapping(UnfoldDir::I_JK, 0, 1).unwrap();
        assert_eq!(m.inner, XY::new(3, 1));
    }

    #[test]
    fn test_operator_has_no_overrides() {
        assert!(UnfoldDir::IJ_KL.overrides().is_empty());
        assert_eq!(override_mapping(UnfoldDir::IJ_KL, 0, 3), None);
        assert_eq!(
            resolve_mapping(UnfoldDir::IJ_KL, 0, 3, false),
            default_mapping(UnfoldDir::IJ_KL)
        );
    }

    #[test]
    fn test_resolve_strict_ignores_overrides() {
        assert_eq!(
            resolve_mapping(UnfoldDir::IJ_K, 0, 3, true),
            default_mapping(UnfoldDir::IJ_K)
        );
        assert_ne!(
            resolve_mapping(UnfoldDir::IJ_K, 0, 3, false),
            default_mapping(UnfoldDir::IJ_K)
        );
    }

    #[test]
    fn test_used_modes_sorted() {
        assert_eq!(default_mapping(UnfoldDir::IJ_K).used_modes(), vec![0, 1, 3]);
        assert_eq!(default_mapping(UnfoldDir::I_KJ).used_modes(), vec![0, 1, 3]);
        assert_eq!(default_mapping(UnfoldDir::IJ_KL).used_modes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_names_round_trip() {
        for unfold in UnfoldDir::ALL {
            assert_eq!(unfold.name().parse::<UnfoldDir>().unwrap(), unfold);
            assert_eq!(unfold.to_string(), unfold.name());
        }
        assert_eq!(
            "IJK".parse::<UnfoldDir>(),
            Err(UnfoldError::UnknownUnfold("IJK".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_scheme_names() {
        assert_eq!(serde_json::to_string(&UnfoldDir::I_JK).unwrap(), "\"I_JK\"");
        let parsed: UnfoldDir = serde_json::from_str("\"IJ_KL\"").unwrap();
        assert_eq!(parsed, UnfoldDir::IJ_KL);
    }

    #[test]
    fn test_kind_of_directions() {
        for unfold in UnfoldDir::VECTOR {
            assert_eq!(unfold.kind(), TrainKind::Vector);
        }
        assert_eq!(UnfoldDir::IJ_KL.kind(), TrainKind::Operator);
    }
}
