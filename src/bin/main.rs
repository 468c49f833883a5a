//! Facade Materials CLI
//!
//! Generate cached facade/cladding materials for a building description
//! and sink them into a glTF material file.

use clap::{Parser, Subcommand};
use facade_materials::{
    Building, CladdingRenderer, Face, FlatColorSynthesizer, GltfMaterialStore, ItemKind,
    ItemSpec, MaterialStore, RenderConfig, TextureLibrary,
};
use glam::Vec2;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facade-materials")]
#[command(author, version, about = "Generate cached building facade materials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export materials for a building described in a JSON file
    Export {
        /// Building style hierarchy JSON
        #[arg(short, long)]
        building: PathBuf,

        /// Texture library JSON
        #[arg(short, long)]
        textures: PathBuf,

        /// Data directory (textures land in <data-dir>/texture)
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Output .gltf file path
        #[arg(short, long)]
        output: PathBuf,

        /// Template collection file, relative to the data directory
        #[arg(long, default_value = "building_material_templates.json")]
        template_file: String,

        /// Template name within the collection
        #[arg(long, default_value = "export_template")]
        template_name: String,

        /// Synthesized texture edge length in pixels
        #[arg(long, default_value = "64")]
        texture_size: u32,
    },

    /// Show information about a texture library
    Info {
        /// Texture library JSON
        #[arg(short, long)]
        textures: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            building,
            textures,
            data_dir,
            output,
            template_file,
            template_name,
            texture_size,
        } => {
            let spec: ItemSpec = serde_json::from_str(&fs::read_to_string(&building)?)?;
            let building = Building::from_spec(&spec);
            let library = TextureLibrary::load(&textures)?;

            let config = RenderConfig {
                data_dir,
                template_file,
                template_name,
                ..Default::default()
            };
            let mut renderer = CladdingRenderer::new(
                GltfMaterialStore::new("texture"),
                Box::new(FlatColorSynthesizer::new(texture_size)),
                library,
                &config,
            );

            let mut rendered = 0usize;
            let mut skipped = 0usize;
            for index in 0..building.items().len() {
                let item = building.item(index);
                if !matches!(item.kind, ItemKind::Facade | ItemKind::Div | ItemKind::Basement) {
                    continue;
                }

                let mut face = Face::new();
                let uvs = face_footprint(&building, index);

                match renderer.render_facade(&building, index)? {
                    Some(_) => rendered += 1,
                    None => skipped += 1,
                }
                if renderer
                    .render_cladding(&building, index, &mut face, &uvs)?
                    .is_some()
                {
                    rendered += 1;
                }
            }

            let store = renderer.into_store();
            store.write(&output)?;

            println!(
                "Exported {} materials ({} items without style) to {}",
                store.len(),
                skipped,
                output.display()
            );
            println!("Rendered {} facade/cladding entries", rendered);
        }

        Commands::Info { textures } => {
            let library = TextureLibrary::load(&textures)?;
            println!("Texture library: {} descriptors", library.len());
            println!("  facade:   {}", library.facade.len());
            println!("  cladding: {}", library.cladding.len());
            for (key, descriptor) in &library.facade {
                println!(
                    "  facade '{}' -> {} ({} x {} m)",
                    key, descriptor.name, descriptor.texture_width_m, descriptor.texture_height_m
                );
            }
            for (key, descriptor) in &library.cladding {
                println!(
                    "  cladding '{}' -> {} ({} x {} m)",
                    key, descriptor.name, descriptor.texture_width_m, descriptor.texture_height_m
                );
            }
        }
    }

    Ok(())
}

/// Physical face footprint for an item, taken from its style block
/// (`faceWidthM`/`faceHeightM`) with a sensible default story size.
fn face_footprint(building: &Building, item: usize) -> Vec<Vec2> {
    let width = style_meters(building, item, "faceWidthM").unwrap_or(10.0);
    let height = style_meters(building, item, "faceHeightM").unwrap_or(3.0);
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ]
}

fn style_meters(building: &Building, item: usize, attr: &str) -> Option<f32> {
    building
        .style_attr_deep(item, attr)
        .and_then(|v| v.parse::<f32>().ok())
}
