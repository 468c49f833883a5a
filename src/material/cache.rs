//! The material/texture get-or-create cache.
//!
//! Sequencing per material id: host-store hit short-circuits everything;
//! otherwise the texture file is synthesized unless it already exists on
//! disk, the shared template is loaded (once per manager), and a material
//! instance is registered under the id. Rendering is single-threaded, so
//! the existence checks are a safe check-then-act sequence; a concurrent
//! port would need a single-flight get-or-create keyed by the id.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::store::{MaterialDefinition, MaterialStore};
use super::template::{MaterialTemplate, TemplateLibrary};
use crate::error::Result;
use crate::synth::TextureSynthesizer;
use crate::types::TextureDescriptor;

/// Subdirectory of the data directory holding synthesized textures.
pub const TEXTURE_DIR: &str = "texture";

/// Texture-synthesis cache over a host material store.
pub struct MaterialManager<S: MaterialStore> {
    store: S,
    synthesizer: Box<dyn TextureSynthesizer>,
    texture_dir: PathBuf,
    template_path: PathBuf,
    template_name: String,
    template: OnceCell<MaterialTemplate>,
}

impl<S: MaterialStore> MaterialManager<S> {
    /// Create a manager.
    ///
    /// Textures live in `<data_dir>/texture`; the template collection at
    /// `template_path` is loaded lazily on first material creation.
    pub fn new(
        store: S,
        synthesizer: Box<dyn TextureSynthesizer>,
        data_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
        template_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            synthesizer,
            texture_dir: data_dir.into().join(TEXTURE_DIR),
            template_path: template_path.into(),
            template_name: template_name.into(),
            template: OnceCell::new(),
        }
    }

    /// Deterministic path of the texture backing a material id.
    ///
    /// No extension is appended: ids carry their own when they need one.
    pub fn texture_filepath(&self, material_id: &str) -> PathBuf {
        self.texture_dir.join(material_id)
    }

    /// Ensure the facade material identified by `material_id` exists,
    /// synthesizing its texture and registering the material if needed.
    ///
    /// Idempotent: a second call with the same id is a store hit and does
    /// no file-system or synthesis work.
    pub fn ensure_facade_material(
        &mut self,
        material_id: &str,
        facade: &TextureDescriptor,
        cladding: Option<&TextureDescriptor>,
        color: Option<&str>,
    ) -> Result<bool> {
        if self.store.exists(material_id) {
            log::trace!("material cache hit: {}", material_id);
            return Ok(true);
        }

        let texture_path = self.texture_filepath(material_id);
        if !texture_path.is_file() {
            log::debug!("synthesizing facade texture {}", material_id);
            self.synthesizer.make_facade_texture(
                material_id,
                &self.texture_dir,
                color,
                facade,
                cladding,
            )?;
        }

        self.register(material_id, &texture_path)
    }

    /// Cladding variant of [`ensure_facade_material`](Self::ensure_facade_material).
    pub fn ensure_cladding_material(
        &mut self,
        material_id: &str,
        cladding: &TextureDescriptor,
        color: Option<&str>,
    ) -> Result<bool> {
        if self.store.exists(material_id) {
            log::trace!("material cache hit: {}", material_id);
            return Ok(true);
        }

        let texture_path = self.texture_filepath(material_id);
        if !texture_path.is_file() {
            log::debug!("synthesizing cladding texture {}", material_id);
            self.synthesizer.make_cladding_texture(
                material_id,
                &self.texture_dir,
                color,
                cladding,
            )?;
        }

        self.register(material_id, &texture_path)
    }

    /// Instantiate the shared template under the id and register it.
    ///
    /// Runs only after synthesis succeeded, so a failed synthesis never
    /// leaves a material registered.
    fn register(&mut self, material_id: &str, texture_path: &Path) -> Result<bool> {
        let definition =
            MaterialDefinition::from_template(self.template()?, material_id, texture_path)?;
        self.store.create(definition)?;
        log::debug!("registered material {}", material_id);
        Ok(true)
    }

    /// The shared material template, loaded at most once.
    fn template(&self) -> Result<&MaterialTemplate> {
        if let Some(template) = self.template.get() {
            return Ok(template);
        }
        let library = TemplateLibrary::load(&self.template_path)?;
        let template = library.get(&self.template_name)?.clone();
        Ok(self.template.get_or_init(|| template))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the manager, returning the host store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::material::store::MemoryMaterialStore;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Synthesizer fake that touches the output file and counts calls.
    struct CountingSynthesizer {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl CountingSynthesizer {
        fn touch(&mut self, name: &str, out_dir: &Path) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ExportError::TextureSynthesis("rasterizer down".to_string()));
            }
            std::fs::create_dir_all(out_dir)?;
            std::fs::write(out_dir.join(name), b"png")?;
            Ok(())
        }
    }

    impl TextureSynthesizer for CountingSynthesizer {
        fn make_facade_texture(
            &mut self,
            name: &str,
            out_dir: &Path,
            _color: Option<&str>,
            _facade: &TextureDescriptor,
            _cladding: Option<&TextureDescriptor>,
        ) -> Result<()> {
            self.touch(name, out_dir)
        }

        fn make_cladding_texture(
            &mut self,
            name: &str,
            out_dir: &Path,
            _color: Option<&str>,
            _cladding: &TextureDescriptor,
        ) -> Result<()> {
            self.touch(name, out_dir)
        }
    }

    fn write_templates(dir: &Path) -> PathBuf {
        let path = dir.join("building_material_templates.json");
        std::fs::write(
            &path,
            r#"{"templates": [{"name": "export_template", "nodes": [
                {"name": "Image Texture", "kind": "image_texture"},
                {"name": "Material Output", "kind": "output"}
            ]}]}"#,
        )
        .unwrap();
        path
    }

    fn manager(
        data_dir: &Path,
        fail: bool,
    ) -> (MaterialManager<MemoryMaterialStore>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let synthesizer = CountingSynthesizer {
            calls: calls.clone(),
            fail,
        };
        let template_path = write_templates(data_dir);
        let manager = MaterialManager::new(
            MemoryMaterialStore::new(),
            Box::new(synthesizer),
            data_dir,
            template_path,
            "export_template",
        );
        (manager, calls)
    }

    fn brick() -> TextureDescriptor {
        TextureDescriptor::new("brick_01.png", 3.0, 2.0).with_material("brick")
    }

    fn glass() -> TextureDescriptor {
        TextureDescriptor::new("facade_glass", 12.0, 3.0)
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (mut manager, calls) = manager(dir.path(), false);

        assert!(manager
            .ensure_cladding_material("red_brick.png", &brick(), Some("red"))
            .unwrap());
        assert!(manager
            .ensure_cladding_material("red_brick.png", &brick(), Some("red"))
            .unwrap());

        // One synthesis, one registered material
        assert_eq!(calls.get(), 1);
        assert_eq!(manager.store().len(), 1);
        assert!(manager.store().exists("red_brick.png"));
    }

    #[test]
    fn test_existing_texture_skips_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let (mut manager, calls) = manager(dir.path(), false);

        let texture_dir = dir.path().join(TEXTURE_DIR);
        std::fs::create_dir_all(&texture_dir).unwrap();
        std::fs::write(texture_dir.join("facade_glass"), b"png").unwrap();

        assert!(manager
            .ensure_facade_material("facade_glass", &glass(), None, None)
            .unwrap());
        assert_eq!(calls.get(), 0);
        assert!(manager.store().exists("facade_glass"));
    }

    #[test]
    fn test_synthesis_failure_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut manager, _) = manager(dir.path(), true);

        let err = manager
            .ensure_facade_material("brick_red_facade_glass", &glass(), Some(&brick()), Some("red"))
            .unwrap_err();
        assert!(matches!(err, ExportError::TextureSynthesis(_)));
        assert!(!err.is_fatal());
        assert_eq!(manager.store().len(), 0);
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut manager = MaterialManager::new(
            MemoryMaterialStore::new(),
            Box::new(CountingSynthesizer {
                calls: calls.clone(),
                fail: false,
            }),
            dir.path(),
            dir.path().join("missing_templates.json"),
            "export_template",
        );

        let err = manager
            .ensure_cladding_material("red_brick.png", &brick(), Some("red"))
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(manager.store().len(), 0);
    }

    #[test]
    fn test_template_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        let (mut manager, _) = manager(dir.path(), false);

        manager
            .ensure_cladding_material("red_brick.png", &brick(), Some("red"))
            .unwrap();

        // Removing the collection after the first load must not matter
        std::fs::remove_file(dir.path().join("building_material_templates.json")).unwrap();
        manager
            .ensure_cladding_material("green_brick.png", &brick(), Some("green"))
            .unwrap();
        assert_eq!(manager.store().len(), 2);
    }

    #[test]
    fn test_texture_filepath() {
        let dir = tempfile::tempdir().unwrap();
        let (manager, _) = manager(dir.path(), false);
        assert_eq!(
            manager.texture_filepath("red_brick.png"),
            dir.path().join(TEXTURE_DIR).join("red_brick.png")
        );
    }
}
