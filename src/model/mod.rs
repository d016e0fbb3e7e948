//! Structural model: nodes, members and JSON loading.

mod geometry;

use std::path::Path;

pub use geometry::{Geometry, Member, Node};
use serde::Deserialize;

use crate::error::ViewerError;

#[derive(Deserialize)]
struct ConstructionFile {
    #[serde(rename = "Geometry", alias = "geometry")]
    geometry: geometry::RawGeometry,
}

/// A loaded structural model.
#[derive(Debug, Clone, Default)]
pub struct Construction {
    /// Nodes and members.
    pub geometry: Geometry,
}

impl Construction {
    /// Parse a model from JSON text. Missing `Nodes` or `Members` arrays
    /// are treated as empty.
    ///
    /// ```
    /// let json = r#"{ "Geometry": {
    ///     "Nodes": [ { "Id": 1, "X": 0, "Y": 0, "Z": 0 },
    ///                { "Id": 2, "X": 1, "Y": 0, "Z": 0 } ],
    ///     "Members": [ { "Id": 10, "Node1Id": 1, "Node2Id": 2 } ] } }"#;
    /// let model = trussview::model::Construction::from_json_str(json).unwrap();
    /// assert_eq!(model.geometry.members().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ModelParse`] for malformed JSON or a missing
    /// `Geometry` object.
    pub fn from_json_str(json: &str) -> Result<Self, ViewerError> {
        let file: ConstructionFile = serde_json::from_str(json)?;
        Ok(Self {
            geometry: Geometry::from_raw(file.geometry),
        })
    }

    /// Read and parse a model file.
    ///
    /// # Errors
    ///
    /// [`ViewerError::ModelLoad`] when the file cannot be read,
    /// [`ViewerError::ModelParse`] when its contents are not a model.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::ModelLoad(format!("{}: {e}", path.display())))?;
        let construction = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {}: {} nodes, {} members",
            path.display(),
            construction.geometry.nodes().len(),
            construction.geometry.members().len()
        );
        Ok(construction)
    }
}
