//! Axis labels, ticks and tooltips for a matricized core

use crate::core_tensor::CORE_RANK;
use crate::mapping::ModeMapping;
use crate::types::{Axis, XY};

/// Separator placed between the lines of [`LabelFormatter::tooltip_text`].
pub const TOOLTIP_SEPARATOR: &str = "\n";

/// Symbol used in ticks for each mode position.
const MODE_SYMBOLS: [&str; CORE_RANK] = ["r", "n", "m", "r"];

/// Text derived from a core's position and mapping.
///
/// Mode names follow the usual tensor-train convention: core `k` (0-based)
/// has modes `r{k}`, `n{k+1}`, `m{k+1}`, `r{k+1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFormatter {
    index: usize,
    mapping: ModeMapping,
}

impl LabelFormatter {
    /// Create the formatter of the core at position `index`.
    pub fn new(index: usize, mapping: ModeMapping) -> Self {
        Self { index, mapping }
    }

    /// Position of the core in its train (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display names of the four modes
    pub fn mode_names(&self) -> [String; CORE_RANK] {
        [0, 1, 2, 3].map(|mode| self.mode_name(mode))
    }

    /// Display name of mode `mode`
    pub fn mode_name(&self, mode: usize) -> String {
        let k = self.index;
        match mode {
            0 => format!("r{}", k),
            1 => format!("n{}", k + 1),
            2 => format!("m{}", k + 1),
            3 => format!("r{}", k + 1),
            _ => panic!("mode {mode} out of range for a rank-{CORE_RANK} core"),
        }
    }

    /// Title of the core view, 1-based
    pub fn title(&self) -> String {
        format!("Core {}", self.index + 1)
    }

    /// Whether each axis has block ticks
    pub fn outer_ticks_exist(&self) -> XY<bool> {
        self.mapping.outer.map(|mode| mode.is_some())
    }

    /// Label of `axis`: the inner mode name, followed by `" × "` and the
    /// outer mode name when the axis has blocks.
    pub fn axis_label(&self, axis: Axis) -> String {
        let mut label = self.mode_name(self.mapping.inner_mode(axis));
        if let Some(outer) = self.mapping.outer_mode(axis) {
            label.push_str(" × ");
            label.push_str(&self.mode_name(outer));
        }
        label
    }

    /// Label parts for stacking vertically: `[outer, "×", inner]`, or just
    /// `[inner]` when the axis has no blocks.
    pub fn stacked_axis_label(&self, axis: Axis) -> Vec<String> {
        let mut parts = Vec::with_capacity(3);
        if let Some(outer) = self.mapping.outer_mode(axis) {
            parts.push(self.mode_name(outer));
            parts.push("×".to_string());
        }
        parts.push(self.mode_name(self.mapping.inner_mode(axis)));
        parts
    }

    /// Tick text for position `tick` within a block along `axis`.
    ///
    /// With blocks the tick names the inner mode (`"n=2"`) so it can be told
    /// apart from the block ticks; otherwise it is the bare number.
    pub fn tick_label(&self, axis: Axis, tick: usize) -> String {
        if self.mapping.outer_mode(axis).is_some() {
            symbolic_tick(self.mapping.inner_mode(axis), tick)
        } else {
            tick.to_string()
        }
    }

    /// Tick text for block `block` along `axis`, or `None` if the axis has
    /// no blocks.
    pub fn outer_tick_label(&self, axis: Axis, block: usize) -> Option<String> {
        self.mapping
            .outer_mode(axis)
            .map(|mode| symbolic_tick(mode, block))
    }

    /// Tooltip for an element with original subscript `sub`, one
    /// `name=value` line per mode used by the mapping, in mode order.
    pub fn tooltip_text(&self, sub: &[usize; CORE_RANK]) -> String {
        self.tooltip_text_with(sub, TOOLTIP_SEPARATOR)
    }

    /// [`tooltip_text`](Self::tooltip_text) with a custom line separator,
    /// e.g. `"<br/>"` for HTML tooltips.
    pub fn tooltip_text_with(&self, sub: &[usize; CORE_RANK], separator: &str) -> String {
        self.mapping
            .used_modes()
            .into_iter()
            .map(|mode| format!("{}={}", self.mode_name(mode), sub[mode]))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

fn symbolic_tick(mode: usize, position: usize) -> String {
    format!("{}={}", MODE_SYMBOLS[mode], position)
}
