use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A structural node: an identified point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier, unique within a geometry.
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    /// X coordinate.
    #[serde(rename = "X", alias = "x")]
    pub x: f32,
    /// Y coordinate.
    #[serde(rename = "Y", alias = "y")]
    pub y: f32,
    /// Z coordinate.
    #[serde(rename = "Z", alias = "z")]
    pub z: f32,
}

impl Node {
    /// Position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// A structural member: a straight element between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member identifier.
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    /// Start node id.
    #[serde(rename = "Node1Id", alias = "node1Id")]
    pub node1_id: i64,
    /// End node id.
    #[serde(rename = "Node2Id", alias = "node2Id")]
    pub node2_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawGeometry {
    #[serde(rename = "Nodes", alias = "nodes", default)]
    nodes: Option<Vec<Node>>,
    #[serde(rename = "Members", alias = "members", default)]
    members: Option<Vec<Member>>,
}

/// Nodes and members of a model plus an id → node index.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    nodes: Vec<Node>,
    members: Vec<Member>,
    index: FxHashMap<i64, usize>,
}

impl Geometry {
    /// Build a geometry. A repeated node id replaces the earlier node and
    /// logs a warning.
    #[must_use]
    pub fn new(nodes: Vec<Node>, members: Vec<Member>) -> Self {
        let mut unique: Vec<Node> = Vec::with_capacity(nodes.len());
        let mut index = FxHashMap::default();
        for node in nodes {
            if let Some(&slot) = index.get(&node.id) {
                log::warn!("Duplicate node id {}; keeping the last one", node.id);
                unique[slot] = node;
            } else {
                let _ = index.insert(node.id, unique.len());
                unique.push(node);
            }
        }
        Self {
            nodes: unique,
            members,
            index,
        }
    }

    pub(crate) fn from_raw(raw: RawGeometry) -> Self {
        Self::new(
            raw.nodes.unwrap_or_default(),
            raw.members.unwrap_or_default(),
        )
    }

    /// Nodes in file order (duplicates collapsed).
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Members in file order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: i64) -> Option<&Node> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Whether the geometry has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Axis-aligned bounds `(min, max)` of all nodes, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.nodes.iter().map(Node::position);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.min(p), max.max(p))
        }))
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Option<Vec3> {
        self.bounds().map(|(min, max)| (min + max) * 0.5)
    }

    /// Half the bounding box diagonal; 0 for an empty or single-point
    /// model.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.bounds()
            .map_or(0.0, |(min, max)| (max - min).length() * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, x: f32, y: f32, z: f32) -> Node {
        Node { id, x, y, z }
    }

    #[test]
    fn center_and_radius_use_bounding_box() {
        let geometry = Geometry::new(
            vec![
                node(1, 0.0, 0.0, 0.0),
                node(2, 4.0, 0.0, 0.0),
                node(3, 1.0, 2.0, 4.0),
            ],
            Vec::new(),
        );
        assert_eq!(geometry.center(), Some(Vec3::new(2.0, 1.0, 2.0)));
        assert!((geometry.radius() - 0.5 * 36.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_geometry_has_no_center() {
        let geometry = Geometry::default();
        assert!(geometry.is_empty());
        assert_eq!(geometry.center(), None);
        assert_eq!(geometry.radius(), 0.0);
    }

    #[test]
    fn duplicate_ids_keep_the_last_node() {
        let geometry = Geometry::new(
            vec![
                node(1, 0.0, 0.0, 0.0),
                node(2, 1.0, 0.0, 0.0),
                node(1, 5.0, 5.0, 5.0),
            ],
            Vec::new(),
        );
        assert_eq!(geometry.nodes().len(), 2);
        assert_eq!(geometry.node(1).map(Node::position), Some(Vec3::splat(5.0)));
        assert_eq!(geometry.nodes()[0].id, 1);
    }
}
