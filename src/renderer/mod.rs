//! Per-face cladding render orchestration.
//!
//! Ties the pipeline together for one building item: resolve the cladding
//! style (deep lookup with ancestor fallback), normalize the color once,
//! derive the material ids, run the get-or-create cache, and write the
//! cladding UV layer onto the face.

use glam::Vec2;
use serde::Deserialize;
use std::path::PathBuf;

use crate::color::normalize_color;
use crate::error::{ExportError, Result};
use crate::geometry::cladding_uvs;
use crate::material::{
    cladding_material_id, facade_material_id, MaterialManager, MaterialStore,
};
use crate::synth::TextureSynthesizer;
use crate::types::{Building, Face, TextureDescriptor, TextureLibrary};

/// Style attribute naming the cladding material family.
const ATTR_CLADDING_MATERIAL: &str = "claddingMaterial";
/// Style attribute naming the cladding color.
const ATTR_CLADDING_COLOR: &str = "claddingColor";
/// Style attribute naming the facade texture.
const ATTR_FACADE_MATERIAL: &str = "facadeMaterial";

/// Export run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Root data directory; textures land in `<data_dir>/texture`.
    pub data_dir: PathBuf,
    /// Template collection file, relative to the data directory.
    pub template_file: String,
    /// Template name within the collection.
    pub template_name: String,
    /// Name of the face UV layer that receives cladding coordinates.
    pub uv_layer_name_facade: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            template_file: "building_material_templates.json".to_string(),
            template_name: "export_template".to_string(),
            uv_layer_name_facade: "facade_uv".to_string(),
        }
    }
}

/// The outcome of rendering one item's materials.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCladding {
    /// The material id registered (or reused) for the face.
    pub material_id: String,
    /// The descriptor that drove texturing.
    pub descriptor: TextureDescriptor,
}

/// Per-face entry point of the material export pipeline.
pub struct CladdingRenderer<S: MaterialStore> {
    manager: MaterialManager<S>,
    library: TextureLibrary,
    uv_layer_name_facade: String,
}

impl<S: MaterialStore> CladdingRenderer<S> {
    pub fn new(
        store: S,
        synthesizer: Box<dyn TextureSynthesizer>,
        library: TextureLibrary,
        config: &RenderConfig,
    ) -> Self {
        let template_path = config.data_dir.join(&config.template_file);
        Self {
            manager: MaterialManager::new(
                store,
                synthesizer,
                &config.data_dir,
                template_path,
                config.template_name.clone(),
            ),
            library,
            uv_layer_name_facade: config.uv_layer_name_facade.clone(),
        }
    }

    /// Render the cladding of one face.
    ///
    /// `item` may be the face's own item or a parent: a basement without a
    /// style block of its own inherits through the ancestor walk. Returns
    /// the rendered cladding on success, `None` when the item has no
    /// cladding style or when a per-material failure was skipped.
    pub fn render_cladding(
        &mut self,
        building: &Building,
        item: usize,
        face: &mut Face,
        uvs: &[Vec2],
    ) -> Result<Option<RenderedCladding>> {
        let outcome = self.try_render_cladding(building, item, face, uvs);
        Self::recover(outcome)
    }

    fn try_render_cladding(
        &mut self,
        building: &Building,
        item: usize,
        face: &mut Face,
        uvs: &[Vec2],
    ) -> Result<Option<RenderedCladding>> {
        let descriptor = match self.cladding_texture_info(building, item)? {
            Some(descriptor) => descriptor.clone(),
            None => return Ok(None),
        };

        let color = normalize_color(building.style_attr_deep(item, ATTR_CLADDING_COLOR))?;
        let material_id = cladding_material_id(&descriptor, color.as_deref());
        self.manager
            .ensure_cladding_material(&material_id, &descriptor, color.as_deref())?;

        self.set_cladding_uvs(face, uvs, &descriptor);

        Ok(Some(RenderedCladding {
            material_id,
            descriptor,
        }))
    }

    /// Ensure the facade material of an item, composited with its cladding
    /// when both a cladding style and a color are present.
    ///
    /// Returns the facade material id, or `None` when the item has no
    /// facade style or a per-material failure was skipped.
    pub fn render_facade(&mut self, building: &Building, item: usize) -> Result<Option<String>> {
        let outcome = self.try_render_facade(building, item);
        Self::recover(outcome)
    }

    fn try_render_facade(&mut self, building: &Building, item: usize) -> Result<Option<String>> {
        let facade = match building.style_attr_deep(item, ATTR_FACADE_MATERIAL) {
            Some(key) => self
                .library
                .get_facade(key)
                .ok_or_else(|| ExportError::UnknownTexture(key.to_string()))?
                .clone(),
            None => return Ok(None),
        };
        let cladding = self.cladding_texture_info(building, item)?.cloned();

        let color = normalize_color(building.style_attr_deep(item, ATTR_CLADDING_COLOR))?;
        let material_id = facade_material_id(cladding.as_ref(), &facade, color.as_deref());
        self.manager.ensure_facade_material(
            &material_id,
            &facade,
            cladding.as_ref(),
            color.as_deref(),
        )?;

        Ok(Some(material_id))
    }

    /// Write the cladding UV coordinates into the configured face layer.
    pub fn set_cladding_uvs(&self, face: &mut Face, uvs: &[Vec2], descriptor: &TextureDescriptor) {
        face.set_uv_layer(
            self.uv_layer_name_facade.clone(),
            cladding_uvs(uvs, descriptor.texture_width_m, descriptor.texture_height_m),
        );
    }

    /// Intentional no-op: in the texture-export variant the cladding color
    /// lives in the synthesized texture, not in vertex colors.
    pub fn set_vertex_color(&mut self, _parent_item: usize, _face: &mut Face) {}

    /// Resolve the cladding descriptor for an item via deep style lookup.
    fn cladding_texture_info<'a>(
        &'a self,
        building: &Building,
        item: usize,
    ) -> Result<Option<&'a TextureDescriptor>> {
        match building.style_attr_deep(item, ATTR_CLADDING_MATERIAL) {
            Some(key) => self
                .library
                .get_cladding(key)
                .ok_or_else(|| ExportError::UnknownTexture(key.to_string()))
                .map(Some),
            None => Ok(None),
        }
    }

    /// Per-material failures are skipped with a diagnostic; template
    /// failures abort the run.
    fn recover<T>(outcome: Result<Option<T>>) -> Result<Option<T>> {
        match outcome {
            Err(err) if !err.is_fatal() => {
                log::warn!("skipping material: {}", err);
                Ok(None)
            }
            other => other,
        }
    }

    pub fn manager(&self) -> &MaterialManager<S> {
        &self.manager
    }

    /// Consume the renderer, returning the host material store.
    pub fn into_store(self) -> S {
        self.manager.into_store()
    }
}
