use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridconv::{conv2d_parallel, conv2d_scalar, initialize, ComputeContext, Shape, DEFAULT_SEED};

fn bench_convolution(c: &mut Criterion) {
    let ctx = ComputeContext::rayon(None).expect("thread pool");
    let mut group = c.benchmark_group("conv2d");

    for &(size, window) in &[(64usize, 3usize), (256, 5), (512, 7)] {
        let ws = initialize(Shape::new(size, size), Shape::new(window, window), DEFAULT_SEED)
            .expect("valid shapes");
        let label = format!("{size}x{size}/{window}x{window}");

        group.bench_with_input(BenchmarkId::new("scalar", &label), &ws, |b, ws| {
            b.iter(|| conv2d_scalar(black_box(&ws.grid), black_box(&ws.kernel)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", &label), &ws, |b, ws| {
            b.iter(|| conv2d_parallel(&ctx, black_box(&ws.grid), black_box(&ws.kernel)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convolution);
criterion_main!(benches);
