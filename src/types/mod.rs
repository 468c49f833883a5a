//! Shared types used throughout the library.

mod descriptor;
mod face;
mod item;

pub use descriptor::{TextureDescriptor, TextureLibrary};
pub use face::Face;
pub use item::{Building, Item, ItemKind, ItemSpec};
