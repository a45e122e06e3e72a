use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use raycrate_core::{Scene, Viewport};
use raycrate_render::{RenderConfig, Renderer};

const SIZES: [(u32, u32); 3] = [(320, 240), (800, 600), (1920, 1080)];

fn render_viewport(c: &mut Criterion) {
    let scene = Scene::default();
    let parallel = Renderer::new(RenderConfig::default());
    let sequential = Renderer::new(RenderConfig::default().with_parallel(false));

    let mut g = c.benchmark_group("render");
    g.sample_size(10);

    for (width, height) in SIZES {
        let viewport = Viewport::new(width, height, 1.0).unwrap();
        let id = format!("{}x{}", width, height);
        g.bench_with_input(BenchmarkId::new("parallel", &id), &viewport, |b, viewport| {
            b.iter(|| parallel.render(std::hint::black_box(viewport), &scene));
        });
        g.bench_with_input(BenchmarkId::new("sequential", &id), &viewport, |b, viewport| {
            b.iter(|| sequential.render(std::hint::black_box(viewport), &scene));
        });
    }

    g.finish();
}

criterion_group!(benches, render_viewport);
criterion_main!(benches);
