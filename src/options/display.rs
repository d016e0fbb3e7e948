use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Display toggles and colors. Colors are `0xRRGGBB`.
pub struct DisplayOptions {
    /// Clear color.
    pub background: u32,
    /// Member line color.
    pub member_color: u32,
    /// Whether to draw coordinate axes at the model center.
    pub show_axes: bool,
    /// Axis length as a fraction of the model radius.
    pub axes_scale: f32,
    /// Whether to draw node markers.
    pub show_nodes: bool,
    /// Node marker half-length as a fraction of the model radius.
    pub node_marker_scale: f32,
    /// Node marker color.
    pub node_color: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: 0x20_20_20,
            member_color: 0x99_CC_CC,
            show_axes: true,
            axes_scale: 0.5,
            show_nodes: true,
            node_marker_scale: 0.01,
            node_color: 0xFF_FF_FF,
        }
    }
}

/// Split `0xRRGGBB` into linear-ish `[r, g, b]` floats in `0..=1`.
#[must_use]
pub fn rgb(color: u32) -> [f32; 3] {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xFF_00_00), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x00_FF_FF), [0.0, 1.0, 1.0]);
        let [r, g, b] = rgb(0x20_20_20);
        assert!((r - 32.0 / 255.0).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
