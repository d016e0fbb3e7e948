//! Line geometry for the loaded model: members, node markers and the
//! coordinate axes.
//!
//! The scene owns the current [`Construction`] and rebuilds a flat
//! line-list vertex array from it whenever the model or the display
//! options change. A generation counter tells the renderer when to
//! re-upload.

mod vertex;

use glam::Vec3;
pub use vertex::LineVertex;

use crate::model::Construction;
use crate::options::{rgb, DisplayOptions};

const AXIS_X_COLOR: u32 = 0xBA_00_00;
const AXIS_Y_COLOR: u32 = 0x00_C5_00;
const AXIS_Z_COLOR: u32 = 0x00_FF_FF;
/// Axis length used when the model has no extent.
const FALLBACK_AXIS_LENGTH: f32 = 1.5;
/// Smallest node marker half-length.
const MIN_MARKER_SIZE: f32 = 0.01;

/// Counts from the last rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Members drawn.
    pub members_drawn: usize,
    /// Members skipped because an endpoint id is unknown.
    pub members_skipped: usize,
    /// Node markers drawn.
    pub nodes_drawn: usize,
}

/// The authoritative scene: the loaded model and its line vertices.
#[derive(Debug, Default)]
pub struct Scene {
    construction: Construction,
    vertices: Vec<LineVertex>,
    stats: SceneStats,
    /// Monotonically increasing generation; bumped on any rebuild.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the model and rebuild.
    pub fn set_construction(&mut self, construction: Construction, display: &DisplayOptions) {
        self.construction = construction;
        self.rebuild(display);
    }

    /// The loaded model.
    #[must_use]
    pub fn construction(&self) -> &Construction {
        &self.construction
    }

    /// Line-list vertices (two per segment).
    #[must_use]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Counts from the last rebuild.
    #[must_use]
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Whether the vertices changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after uploading).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Regenerate vertices from the current model, e.g. after a display
    /// toggle.
    pub fn rebuild(&mut self, display: &DisplayOptions) {
        self.vertices.clear();
        self.stats = SceneStats::default();
        let geometry = &self.construction.geometry;
        let radius = geometry.radius();

        let member_color = rgb(display.member_color);
        for member in geometry.members() {
            let start = geometry.node(member.node1_id);
            let end = geometry.node(member.node2_id);
            let (Some(start), Some(end)) = (start, end) else {
                if start.is_none() {
                    log::warn!(
                        "Invalid Node1Id for member {}: Node1Id={}",
                        member.id,
                        member.node1_id
                    );
                }
                if end.is_none() {
                    log::warn!(
                        "Invalid Node2Id for member {}: Node2Id={}",
                        member.id,
                        member.node2_id
                    );
                }
                self.stats.members_skipped += 1;
                continue;
            };
            push_segment(&mut self.vertices, start.position(), end.position(), member_color);
            self.stats.members_drawn += 1;
        }

        if display.show_nodes {
            let size = (radius * display.node_marker_scale).max(MIN_MARKER_SIZE);
            let color = rgb(display.node_color);
            for node in geometry.nodes() {
                let p = node.position();
                for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                    push_segment(&mut self.vertices, p - axis * size, p + axis * size, color);
                }
            }
            self.stats.nodes_drawn = geometry.nodes().len();
        }

        if display.show_axes {
            if let Some(center) = geometry.center() {
                let length = if radius > 0.0 {
                    radius * display.axes_scale
                } else {
                    FALLBACK_AXIS_LENGTH
                };
                for (axis, color) in [
                    (Vec3::X, AXIS_X_COLOR),
                    (Vec3::Y, AXIS_Y_COLOR),
                    (Vec3::Z, AXIS_Z_COLOR),
                ] {
                    push_segment(&mut self.vertices, center, center + axis * length, rgb(color));
                }
            }
        }

        log::info!(
            "Model displayed: {} members drawn",
            self.stats.members_drawn
        );
        self.generation += 1;
    }
}

fn push_segment(vertices: &mut Vec<LineVertex>, start: Vec3, end: Vec3, color: [f32; 3]) {
    vertices.push(LineVertex {
        position: start.to_array(),
        color,
    });
    vertices.push(LineVertex {
        position: end.to_array(),
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Geometry, Member, Node};

    fn construction() -> Construction {
        let nodes = vec![
            Node { id: 1, x: 0.0, y: 0.0, z: 0.0 },
            Node { id: 2, x: 2.0, y: 0.0, z: 0.0 },
            Node { id: 3, x: 2.0, y: 2.0, z: 0.0 },
        ];
        let members = vec![
            Member { id: 10, node1_id: 1, node2_id: 2 },
            Member { id: 11, node1_id: 2, node2_id: 3 },
            Member { id: 12, node1_id: 3, node2_id: 99 },
        ];
        Construction {
            geometry: Geometry::new(nodes, members),
        }
    }

    fn lines_only() -> DisplayOptions {
        DisplayOptions {
            show_axes: false,
            show_nodes: false,
            ..DisplayOptions::default()
        }
    }

    #[test]
    fn dangling_members_are_skipped() {
        let mut scene = Scene::new();
        scene.set_construction(construction(), &lines_only());
        let stats = scene.stats();
        assert_eq!(stats.members_drawn, 2);
        assert_eq!(stats.members_skipped, 1);
        assert_eq!(scene.vertices().len(), 4);
        assert_eq!(scene.vertices()[1].position, [2.0, 0.0, 0.0]);
        assert_eq!(scene.vertices()[0].color, rgb(0x99_CC_CC));
    }

    #[test]
    fn markers_and_axes_add_segments() {
        let mut scene = Scene::new();
        scene.set_construction(construction(), &DisplayOptions::default());
        // 2 members + 3 nodes * 3 marker segments + 3 axes, two vertices each.
        assert_eq!(scene.vertices().len(), (2 + 9 + 3) * 2);

        let x_axis = &scene.vertices()[scene.vertices().len() - 6..][..2];
        assert_eq!(x_axis[0].position, [1.0, 1.0, 0.0]);
        assert_eq!(x_axis[0].color, rgb(AXIS_X_COLOR));
    }

    #[test]
    fn rebuild_marks_scene_dirty() {
        let mut scene = Scene::new();
        assert!(!scene.is_dirty());
        scene.set_construction(construction(), &lines_only());
        assert!(scene.is_dirty());
        scene.mark_rendered();
        assert!(!scene.is_dirty());
        scene.rebuild(&DisplayOptions::default());
        assert!(scene.is_dirty());
    }

    #[test]
    fn empty_model_has_no_axes() {
        let mut scene = Scene::new();
        scene.set_construction(Construction::default(), &DisplayOptions::default());
        assert!(scene.vertices().is_empty());
    }
}
