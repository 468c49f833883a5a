//! Material template collections.
//!
//! A template is a reusable node-graph skeleton; every exported material is
//! an instance of one template with the synthesized texture bound to its
//! image node. The collection file is loaded lazily at most once per
//! manager and shared read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ExportError, Result};

/// Node name that receives the synthesized texture when a template
/// is instantiated.
pub const IMAGE_NODE: &str = "Image Texture";

/// One node of a material template graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateNode {
    /// Node name, unique within the template.
    pub name: String,
    /// Node kind (e.g. "image_texture", "bsdf", "output").
    pub kind: String,
    /// Opaque node parameters, passed through to the host.
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

/// A reusable material node-graph skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTemplate {
    pub name: String,
    pub nodes: Vec<TemplateNode>,
}

impl MaterialTemplate {
    /// Whether the template has a node the texture can be bound to.
    pub fn has_image_node(&self) -> bool {
        self.nodes.iter().any(|n| n.name == IMAGE_NODE)
    }
}

/// A named collection of material templates loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateLibrary {
    pub templates: Vec<MaterialTemplate>,
}

impl TemplateLibrary {
    /// Load a template collection from a JSON file.
    ///
    /// A missing or malformed collection is a [`ExportError::MaterialTemplate`]
    /// error: without templates no material can ever be produced.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExportError::MaterialTemplate(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            ExportError::MaterialTemplate(format!("malformed {}: {}", path.display(), e))
        })
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Result<&MaterialTemplate> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ExportError::MaterialTemplate(format!("no template named '{}'", name)))
    }
}
