//! Host material store abstraction.

use std::collections::HashMap;
use std::path::PathBuf;

use super::template::{MaterialTemplate, IMAGE_NODE};
use crate::error::{ExportError, Result};

/// A material instantiated from a template, with its texture bound.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDefinition {
    /// The material id, also the texture file name.
    pub name: String,
    /// Name of the template this material was instantiated from.
    pub template: String,
    /// Path of the on-disk texture bound to the image node.
    pub image_path: PathBuf,
}

impl MaterialDefinition {
    /// Instantiate a template under a material id, binding the texture.
    pub fn from_template(
        template: &MaterialTemplate,
        name: impl Into<String>,
        image_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        if !template.has_image_node() {
            return Err(ExportError::MaterialTemplate(format!(
                "template '{}' has no '{}' node",
                template.name, IMAGE_NODE
            )));
        }
        Ok(Self {
            name: name.into(),
            template: template.name.clone(),
            image_path: image_path.into(),
        })
    }
}

/// Capability interface over the host's material store.
///
/// The cache core only ever asks two things of the host: does a material
/// with this id exist, and register this freshly instantiated one. Keeping
/// the seam this narrow is what makes the cache testable without a host.
pub trait MaterialStore {
    /// Whether a material with this id is already registered.
    fn exists(&self, id: &str) -> bool;

    /// Register a new material definition.
    ///
    /// Callers check [`exists`](MaterialStore::exists) first; registering a
    /// duplicate id is a [`ExportError::Store`] error.
    fn create(&mut self, definition: MaterialDefinition) -> Result<()>;

    /// Number of registered materials.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory material store, the host stand-in for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryMaterialStore {
    materials: HashMap<String, MaterialDefinition>,
}

impl MemoryMaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a registered material by id.
    pub fn get(&self, id: &str) -> Option<&MaterialDefinition> {
        self.materials.get(id)
    }

    /// Iterate over registered material ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(|s| s.as_str())
    }
}

impl MaterialStore for MemoryMaterialStore {
    fn exists(&self, id: &str) -> bool {
        self.materials.contains_key(id)
    }

    fn create(&mut self, definition: MaterialDefinition) -> Result<()> {
        if self.materials.contains_key(&definition.name) {
            return Err(ExportError::Store(format!(
                "material '{}' already registered",
                definition.name
            )));
        }
        self.materials.insert(definition.name.clone(), definition);
        Ok(())
    }

    fn len(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::template::TemplateNode;

    fn template() -> MaterialTemplate {
        MaterialTemplate {
            name: "export_template".to_string(),
            nodes: vec![TemplateNode {
                name: IMAGE_NODE.to_string(),
                kind: "image_texture".to_string(),
                params: Default::default(),
            }],
        }
    }

    #[test]
    fn test_create_and_exists() {
        let mut store = MemoryMaterialStore::new();
        assert!(!store.exists("red_brick.png"));

        let def =
            MaterialDefinition::from_template(&template(), "red_brick.png", "/data/texture/red_brick.png")
                .unwrap();
        store.create(def).unwrap();

        assert!(store.exists("red_brick.png"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("red_brick.png").unwrap().template, "export_template");
    }

    #[test]
    fn test_duplicate_create_fails() {
        let mut store = MemoryMaterialStore::new();
        let def = MaterialDefinition::from_template(&template(), "m", "/t/m").unwrap();
        store.create(def.clone()).unwrap();
        assert!(store.create(def).is_err());
    }

    #[test]
    fn test_template_without_image_node() {
        let bare = MaterialTemplate {
            name: "broken".to_string(),
            nodes: vec![],
        };
        let err = MaterialDefinition::from_template(&bare, "m", "/t/m").unwrap_err();
        assert!(err.is_fatal());
    }
}
