//! Host material sinks.
//!
//! Adapters that implement [`MaterialStore`](crate::material::MaterialStore)
//! for concrete output formats.

pub mod gltf;

pub use gltf::GltfMaterialStore;
