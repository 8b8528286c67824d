use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use meshview::{FunctionMesh, GraphDomain, ImportOptions, Model, Scene, TextureImage, Transformations};
use std::fmt::Write;
use std::hint::black_box;
use std::path::Path;

/// Hands out the same tiny image for every texture.
struct SolidLoader;

impl meshview::TextureLoader for SolidLoader {
    fn load(&mut self, _path: &Path) -> Result<TextureImage, meshview::Error> {
        Ok(TextureImage::solid(1, 1, [255; 4]))
    }
}

// An OBJ file with `objects` grids of `n x n` quads, all sharing one material.
fn grid_obj(objects: usize, n: usize) -> String {
    let mut obj = String::from("mtllib grid.mtl\n");
    let mut offset = 1;
    for k in 0..objects {
        writeln!(obj, "o grid{}\nusemtl stone", k).unwrap();
        for i in 0..=n {
            for j in 0..=n {
                writeln!(obj, "v {} {} {}", i, k, j).unwrap();
                writeln!(obj, "vt {} {}", i as f32 / n as f32, j as f32 / n as f32).unwrap();
            }
        }
        for i in 0..n {
            for j in 0..n {
                let a = offset + i * (n + 1) + j;
                let b = a + n + 1;
                writeln!(obj, "f {a}/{a} {b}/{b} {}/{} {}/{}", b + 1, b + 1, a + 1, a + 1).unwrap();
            }
        }
        offset += (n + 1) * (n + 1);
    }
    obj
}

fn load_grid(obj: &str) -> Scene {
    Scene::load_obj_buf(
        "grid",
        &mut obj.as_bytes(),
        |_| tobj::load_mtl_buf(&mut "newmtl stone\nmap_Kd stone.png\n".as_bytes()),
        ImportOptions::default(),
    )
    .unwrap()
}

fn bench_function_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("function_mesh");
    for cells in [10usize, 100, 300] {
        group.bench_with_input(BenchmarkId::new("generate", cells), &cells, |b, &cells| {
            b.iter(|| {
                let mesh = FunctionMesh::with_options(
                    |x: f64, z: f64| (x * 6.0).sin() * (z * 6.0).cos(),
                    black_box(cells),
                    GraphDomain::default(),
                )
                .unwrap();
                black_box(mesh.num_triangles());
            });
        });
    }
    let mesh = FunctionMesh::new(|x: f64, z: f64| x * x + z * z);
    group.bench_function("indexed_100", |b| {
        b.iter(|| black_box(mesh.indexed_function_mesh().unwrap()));
    });
    group.bench_function("interleaved_100", |b| {
        b.iter(|| black_box(mesh.function_interleaved()));
    });
    group.finish();
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");
    let obj = grid_obj(8, 64);
    group.bench_function("import_obj", |b| {
        b.iter(|| black_box(load_grid(black_box(&obj))));
    });
    let scene = load_grid(&obj);
    group.bench_function("flatten", |b| {
        b.iter(|| {
            let model = Model::from_scene(black_box(&scene), Path::new("."), &mut SolidLoader).unwrap();
            black_box(model.stats());
        });
    });
    group.finish();
}

fn bench_transformations(c: &mut Criterion) {
    c.bench_function("constant_rotation_1000", |b| {
        let mut xf = Transformations::default();
        b.iter(|| {
            for _ in 0..1000 {
                xf.constant_rotation();
            }
            black_box(xf.view());
        });
    });
}

criterion_group!(
    benches,
    bench_function_mesh,
    bench_model,
    bench_transformations
);
criterion_main!(benches);
