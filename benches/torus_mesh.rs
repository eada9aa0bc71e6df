use criterion::{ black_box, criterion_group, criterion_main, BenchmarkId, Criterion };
use torus_gl::engine::components::camera::OrbitCamera;
use torus_gl::engine::components::mesh::{ Mesh, TorusParams };
use torus_gl::engine::config::CameraConfig;

fn benchmark_torus_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus_mesh");

    for (slices, stacks) in [(16, 8), (64, 32), (256, 128)] {
        let params = TorusParams::new(3.0, 1.0, slices, stacks);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", slices, stacks)),
            &params,
            |b, params| b.iter(|| Mesh::torus(black_box(params)))
        );
    }

    group.finish();
}

fn benchmark_frame_transforms(c: &mut Criterion) {
    let mut camera = OrbitCamera::new(CameraConfig::default());
    c.bench_function("frame_transforms", |b| {
        b.iter(|| {
            camera.advance();
            black_box(camera.transforms(black_box(800), black_box(600)))
        })
    });
}

criterion_group!(benches, benchmark_torus_mesh, benchmark_frame_transforms);
criterion_main!(benches);
