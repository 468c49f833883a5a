//! # Facade Materials
//!
//! A Rust library for generating and caching facade/cladding materials and
//! their backing textures in a procedural building-export pipeline.
//!
//! ## Overview
//!
//! Given a building's style hierarchy, this library derives a canonical
//! material identifier for every facade and cladding variant, synthesizes
//! the backing texture on demand if it is not already on disk, registers a
//! material instantiated from a shared template exactly once per
//! identifier, and computes the UV coordinates that place a cladding
//! texture on a face at real-world scale. Structurally identical facades
//! across a whole building resolve to one shared material and texture.
//!
//! ## Quick Start
//!
//! ```ignore
//! use facade_materials::{
//!     CladdingRenderer, FlatColorSynthesizer, MemoryMaterialStore,
//!     RenderConfig, TextureLibrary,
//! };
//!
//! let config = RenderConfig::default();
//! let library = TextureLibrary::load("textures.json")?;
//! let mut renderer = CladdingRenderer::new(
//!     MemoryMaterialStore::new(),
//!     Box::new(FlatColorSynthesizer::default()),
//!     library,
//!     &config,
//! );
//!
//! // For every face of the building:
//! renderer.render_cladding(&building, item, &mut face, &uvs)?;
//! ```
//!
//! ## Host Integration
//!
//! The host 3D scene is abstracted behind the `MaterialStore` trait
//! (`exists`/`create`); texture rasterization behind `TextureSynthesizer`.
//! `MemoryMaterialStore` and `FlatColorSynthesizer` are the built-in
//! stand-ins; `GltfMaterialStore` sinks materials into glTF JSON.

pub mod color;
pub mod error;
pub mod export;
pub mod geometry;
pub mod material;
pub mod renderer;
pub mod synth;
pub mod types;

// Re-export main types for convenience
pub use color::{color_to_rgb, normalize_color};
pub use error::{ExportError, Result};
pub use export::GltfMaterialStore;
pub use geometry::{cladding_uvs, compute_cladding_uvs, UvRect};
pub use material::{
    cladding_material_id, facade_material_id, MaterialDefinition, MaterialManager,
    MaterialStore, MaterialTemplate, MemoryMaterialStore, TemplateLibrary,
};
pub use renderer::{CladdingRenderer, RenderConfig, RenderedCladding};
pub use synth::{FlatColorSynthesizer, TextureSynthesizer};
pub use types::{Building, Face, Item, ItemKind, ItemSpec, TextureDescriptor, TextureLibrary};
