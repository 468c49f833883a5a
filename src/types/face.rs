//! Face geometry handed over by the mesh layer.

use glam::Vec2;
use std::collections::HashMap;

/// A building face as seen by the material exporter: a set of named UV
/// layers. Positions and topology stay with the mesh layer; the exporter
/// only writes texture coordinates.
#[derive(Debug, Clone, Default)]
pub struct Face {
    uv_layers: HashMap<String, Vec<Vec2>>,
}

impl Face {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a UV layer, replacing any previous coordinates in it.
    pub fn set_uv_layer(&mut self, name: impl Into<String>, uvs: Vec<Vec2>) {
        self.uv_layers.insert(name.into(), uvs);
    }

    /// Read a UV layer.
    pub fn uv_layer(&self, name: &str) -> Option<&[Vec2]> {
        self.uv_layers.get(name).map(|v| v.as_slice())
    }

    pub fn has_uv_layer(&self, name: &str) -> bool {
        self.uv_layers.contains_key(name)
    }
}
