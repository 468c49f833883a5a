//! Texture descriptors and the texture library.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Immutable description of one texture variant.
///
/// `name` is the base texture file name (e.g. "brick_01.png"); `material`
/// is the material family key used when composing colored material
/// identifiers. Physical dimensions are in meters and drive UV tiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureDescriptor {
    /// Base identifier, doubles as the texture file name.
    pub name: String,
    /// Material family key (e.g. "brick"). Falls back to `name` when absent.
    #[serde(default)]
    pub material: Option<String>,
    /// Physical width of one texture tile in meters.
    pub texture_width_m: f32,
    /// Physical height of one texture tile in meters.
    pub texture_height_m: f32,
}

impl TextureDescriptor {
    pub fn new(name: impl Into<String>, width_m: f32, height_m: f32) -> Self {
        Self {
            name: name.into(),
            material: None,
            texture_width_m: width_m,
            texture_height_m: height_m,
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// The key identifying this descriptor's material family.
    pub fn material_key(&self) -> &str {
        self.material.as_deref().unwrap_or(&self.name)
    }
}

/// Registry of texture descriptors available to an export run,
/// keyed by the style attribute values that reference them.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TextureLibrary {
    /// Facade texture descriptors by facade style key.
    #[serde(default)]
    pub facade: HashMap<String, TextureDescriptor>,
    /// Cladding texture descriptors by cladding material key.
    #[serde(default)]
    pub cladding: HashMap<String, TextureDescriptor>,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture library from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Get a facade descriptor by style key.
    pub fn get_facade(&self, key: &str) -> Option<&TextureDescriptor> {
        self.facade.get(key)
    }

    /// Get a cladding descriptor by style key.
    pub fn get_cladding(&self, key: &str) -> Option<&TextureDescriptor> {
        self.cladding.get(key)
    }

    /// Add a facade descriptor.
    pub fn add_facade(&mut self, key: impl Into<String>, descriptor: TextureDescriptor) {
        self.facade.insert(key.into(), descriptor);
    }

    /// Add a cladding descriptor.
    pub fn add_cladding(&mut self, key: impl Into<String>, descriptor: TextureDescriptor) {
        self.cladding.insert(key.into(), descriptor);
    }

    /// Total number of descriptors.
    pub fn len(&self) -> usize {
        self.facade.len() + self.cladding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facade.is_empty() && self.cladding.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_key_fallback() {
        let facade = TextureDescriptor::new("facade_glass", 12.0, 3.0);
        assert_eq!(facade.material_key(), "facade_glass");

        let cladding = TextureDescriptor::new("brick_01.png", 3.0, 2.0).with_material("brick");
        assert_eq!(cladding.material_key(), "brick");
    }

    #[test]
    fn test_library_parse() {
        let json = r#"{
            "facade": {
                "glass": {"name": "facade_glass", "textureWidthM": 12.0, "textureHeightM": 3.0}
            },
            "cladding": {
                "brick": {"name": "brick_01.png", "material": "brick", "textureWidthM": 3.0, "textureHeightM": 2.0}
            }
        }"#;
        let library: TextureLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.get_facade("glass").unwrap().name, "facade_glass");
        assert_eq!(library.get_cladding("brick").unwrap().material_key(), "brick");
        assert!(library.get_cladding("missing").is_none());
    }
}
