//! Material identity, templates, and the texture-synthesis cache.
//!
//! Material identifiers are derived deterministically from texture
//! descriptors and the normalized cladding color. The identifier doubles as
//! the texture file name on disk and the lookup key in the host material
//! store, which is what lets structurally identical facades across a whole
//! building share one material and one texture.

pub mod cache;
pub mod store;
pub mod template;

pub use cache::MaterialManager;
pub use store::{MaterialDefinition, MaterialStore, MemoryMaterialStore};
pub use template::{MaterialTemplate, TemplateLibrary, TemplateNode};

use crate::types::TextureDescriptor;
use std::path::Path;

/// Derive the facade material identifier.
///
/// With both a cladding descriptor and a color token present, the id
/// composes the cladding family, the color, and the facade texture name
/// (`"brick_red_facade_glass"`), so that facades sharing all three collapse
/// onto one cached material while different colors stay distinct. Without
/// cladding or color, the facade texture name is the id as-is.
pub fn facade_material_id(
    cladding: Option<&TextureDescriptor>,
    facade: &TextureDescriptor,
    color: Option<&str>,
) -> String {
    match (cladding, color) {
        (Some(cladding), Some(color)) => {
            format!("{}_{}_{}", cladding.material_key(), color, facade.name)
        }
        _ => facade.name.clone(),
    }
}

/// Derive the cladding material identifier.
///
/// With a color token present, the id is `"<color>_<family><ext>"` where
/// the extension of the descriptor's base name is preserved so the id still
/// resolves to a valid texture file name (`"red_brick.png"`). Without a
/// color the raw descriptor name is returned unchanged, so color-less
/// cladding shares its cache key with the source asset.
pub fn cladding_material_id(cladding: &TextureDescriptor, color: Option<&str>) -> String {
    match color {
        Some(color) => format!(
            "{}_{}{}",
            color,
            cladding.material_key(),
            name_extension(&cladding.name)
        ),
        None => cladding.name.clone(),
    }
}

/// The file extension of a texture base name, dot included, or "".
fn name_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
