use criterion::{Criterion, criterion_group, criterion_main};
use shapegen::render::Rasterizer;
use shapes::{config::GenerationConfig, rng::UniformSource, sample::Sampler};
use std::hint::black_box;

fn bench_render(c: &mut Criterion) {
    let cfg = GenerationConfig {
        image_size: 64,
        seed: Some(7),
        ..Default::default()
    };

    c.bench_function("sample_and_render_64px", |b| {
        let sampler = Sampler::new(&cfg);
        let rasterizer = Rasterizer::new(cfg.canvas());
        let mut src = UniformSource::resolve(cfg.seed);
        b.iter(|| {
            let rec = sampler.draw(&mut src);
            black_box(rasterizer.render(&rec));
        })
    });

    c.bench_function("sample_render_encode_64px", |b| {
        let sampler = Sampler::new(&cfg);
        let rasterizer = Rasterizer::new(cfg.canvas());
        let mut src = UniformSource::resolve(cfg.seed);
        b.iter(|| {
            let rec = sampler.draw(&mut src);
            black_box(rasterizer.encode_png(&rec).unwrap());
        })
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
