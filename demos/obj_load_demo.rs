use std::path::{Path, PathBuf};

use clap::Parser;
use meshview::{Error, ImportOptions, Model, Scene, TextureImage, TextureLoader, TextureKind};

/// Imports an OBJ file and prints its node tree and the flattened model.
/// Does not open a window.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    model: PathBuf,
    /// Keep polygonal faces instead of splitting them into triangles.
    #[clap(long)]
    no_triangulate: bool,
}

/// Reports the textures instead of decoding them.
struct ListingLoader;

impl TextureLoader for ListingLoader {
    fn load(&mut self, path: &Path) -> Result<TextureImage, Error> {
        let found = if path.is_file() { "found" } else { "missing" };
        println!("  texture {} ({})", path.display(), found);
        Ok(TextureImage::solid(1, 1, [255; 4]))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let options = ImportOptions {
        triangulate: !args.no_triangulate,
        ..Default::default()
    };
    let scene = Scene::load_obj(&args.model, options)?;
    let root = scene.validate()?;
    println!("Nodes:");
    root.walk(glam::Mat4::IDENTITY, &mut |node, depth, world, handle| {
        let origin = world.transform_point3(glam::Vec3::ZERO);
        println!(
            "{:indent$}{} '{}' meshes {:?} at {}",
            "",
            handle,
            node.name,
            node.meshes,
            origin,
            indent = 2 * (depth + 1)
        );
    });
    println!("Materials:");
    for mat in &scene.materials {
        println!(
            "  '{}': {} diffuse, {} specular, {} normal, {} height",
            mat.name,
            mat.texture_count(TextureKind::Diffuse),
            mat.texture_count(TextureKind::Specular),
            mat.texture_count(TextureKind::Normal),
            mat.texture_count(TextureKind::Height),
        );
    }
    println!("Textures:");
    let directory = args.model.parent().unwrap_or_else(|| Path::new("."));
    let model = Model::from_scene(&scene, directory, &mut ListingLoader)?;
    let stats = model.stats();
    println!(
        "Model: {} meshes, {} vertices, {} triangles, {} textures",
        stats.meshes, stats.vertices, stats.triangles, stats.textures
    );
    if let Some((lo, hi)) = model.bounds() {
        println!("Bounds: {} to {}", lo, hi);
    }
    Ok(())
}
