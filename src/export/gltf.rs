//! glTF material sink.
//!
//! [`GltfMaterialStore`] is the host-store adapter for glTF output:
//! every registered material becomes a glTF material whose base-color
//! texture references the synthesized image by URI, with a shared REPEAT
//! sampler so cladding tiling survives in viewers.

use gltf_json as json;
use json::validation::Checked::Valid;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::material::{MaterialDefinition, MaterialStore};

/// A material store that accumulates glTF materials, textures, and images.
pub struct GltfMaterialStore {
    /// URI prefix for image references (the texture directory name).
    texture_base_uri: String,
    materials: Vec<json::Material>,
    textures: Vec<json::Texture>,
    images: Vec<json::Image>,
    indices: HashMap<String, u32>,
}

impl GltfMaterialStore {
    /// Create a store whose image URIs are `<texture_base_uri>/<file>`.
    pub fn new(texture_base_uri: impl Into<String>) -> Self {
        Self {
            texture_base_uri: texture_base_uri.into(),
            materials: Vec::new(),
            textures: Vec::new(),
            images: Vec::new(),
            indices: HashMap::new(),
        }
    }

    /// The glTF material index of a registered material id.
    pub fn material_index(&self, id: &str) -> Option<u32> {
        self.indices.get(id).copied()
    }

    /// Build the glTF root holding all registered materials.
    pub fn to_root(&self) -> json::Root {
        json::Root {
            images: self.images.clone(),
            samplers: vec![json::texture::Sampler {
                mag_filter: Some(Valid(json::texture::MagFilter::Linear)),
                min_filter: Some(Valid(json::texture::MinFilter::LinearMipmapLinear)),
                wrap_s: Valid(json::texture::WrappingMode::Repeat),
                wrap_t: Valid(json::texture::WrappingMode::Repeat),
                extensions: Default::default(),
                extras: Default::default(),
            }],
            textures: self.textures.clone(),
            materials: self.materials.clone(),
            ..Default::default()
        }
    }

    /// Serialize the material root as glTF JSON.
    pub fn to_json_string(&self) -> Result<String> {
        json::serialize::to_string(&self.to_root())
            .map_err(|e| ExportError::Store(format!("failed to serialize glTF JSON: {}", e)))
    }

    /// Write the material root to a .gltf file.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    fn image_uri(&self, definition: &MaterialDefinition) -> String {
        let file = definition
            .image_path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(&definition.name);
        format!("{}/{}", self.texture_base_uri, file)
    }
}

impl MaterialStore for GltfMaterialStore {
    fn exists(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    fn create(&mut self, definition: MaterialDefinition) -> Result<()> {
        if self.exists(&definition.name) {
            return Err(ExportError::Store(format!(
                "material '{}' already registered",
                definition.name
            )));
        }

        let image_index = self.images.len() as u32;
        self.images.push(json::Image {
            buffer_view: None,
            mime_type: Some(json::image::MimeType("image/png".to_string())),
            uri: Some(self.image_uri(&definition)),
            extensions: Default::default(),
            extras: Default::default(),
        });

        let texture_index = self.textures.len() as u32;
        self.textures.push(json::Texture {
            sampler: Some(json::Index::new(0)),
            source: json::Index::new(image_index),
            extensions: Default::default(),
            extras: Default::default(),
        });

        let material_index = self.materials.len() as u32;
        self.materials.push(json::Material {
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_texture: Some(json::texture::Info {
                    index: json::Index::new(texture_index),
                    tex_coord: 0,
                    extensions: Default::default(),
                    extras: Default::default(),
                }),
                base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
                metallic_factor: json::material::StrengthFactor(0.0),
                roughness_factor: json::material::StrengthFactor(1.0),
                metallic_roughness_texture: None,
                extensions: Default::default(),
                extras: Default::default(),
            },
            alpha_mode: Valid(json::material::AlphaMode::Opaque),
            alpha_cutoff: None,
            double_sided: false,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: json::material::EmissiveFactor([0.0, 0.0, 0.0]),
            extensions: Default::default(),
            extras: Default::default(),
        });

        self.indices.insert(definition.name, material_index);
        Ok(())
    }

    fn len(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::template::{MaterialTemplate, TemplateNode, IMAGE_NODE};

    fn definition(name: &str) -> MaterialDefinition {
        let template = MaterialTemplate {
            name: "export_template".to_string(),
            nodes: vec![TemplateNode {
                name: IMAGE_NODE.to_string(),
                kind: "image_texture".to_string(),
                params: Default::default(),
            }],
        };
        MaterialDefinition::from_template(&template, name, format!("/data/texture/{}", name))
            .unwrap()
    }

    #[test]
    fn test_create_produces_material_texture_image() {
        let mut store = GltfMaterialStore::new("texture");
        store.create(definition("red_brick.png")).unwrap();

        assert!(store.exists("red_brick.png"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.material_index("red_brick.png"), Some(0));

        let root = store.to_root();
        assert_eq!(root.materials.len(), 1);
        assert_eq!(root.textures.len(), 1);
        assert_eq!(root.images[0].uri.as_deref(), Some("texture/red_brick.png"));
        assert_eq!(root.samplers.len(), 1);
    }

    #[test]
    fn test_duplicate_create_fails() {
        let mut store = GltfMaterialStore::new("texture");
        store.create(definition("m")).unwrap();
        assert!(store.create(definition("m")).is_err());
    }

    #[test]
    fn test_json_serialization() {
        let mut store = GltfMaterialStore::new("texture");
        store.create(definition("red_brick.png")).unwrap();

        let json_string = store.to_json_string().unwrap();
        assert!(json_string.contains("texture/red_brick.png"));
        assert!(json_string.contains("\"asset\""));
    }
}
