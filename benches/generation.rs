use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heightfield::rng::SeededSource;
use heightfield::terrain::{HeightGrid, TransferFunction};

fn bench_generate_64(c: &mut Criterion) {
    c.bench_function("generate_tess_6", |b| {
        b.iter(|| {
            let mut grid = HeightGrid::new(black_box(6), Box::new(SeededSource::new(1)));
            grid.generate().unwrap();
            grid
        });
    });
}

fn bench_generate_256(c: &mut Criterion) {
    c.bench_function("generate_tess_8", |b| {
        b.iter(|| {
            let mut grid = HeightGrid::new(black_box(8), Box::new(SeededSource::new(1)));
            grid.generate().unwrap();
            grid
        });
    });
}

fn bench_convolution_3x3(c: &mut Criterion) {
    let kernel = vec![vec![1.0; 3]; 3];
    c.bench_function("convolution_3x3_tess_7", |b| {
        b.iter_with_setup(
            || {
                let mut grid = HeightGrid::new(7, Box::new(SeededSource::new(1)));
                grid.generate().unwrap();
                grid
            },
            |mut grid| {
                grid.apply_convolution(black_box(&kernel)).unwrap();
                grid
            },
        );
    });
}

fn bench_dump_with_transfer_stack(c: &mut Criterion) {
    let mut grid = HeightGrid::new(7, Box::new(SeededSource::new(1)));
    grid.generate().unwrap();
    grid.apply_transfer_function(TransferFunction::new(|x| x * x, 0.0, 1.0).unwrap())
        .unwrap();
    grid.apply_transfer_function(TransferFunction::new(|x| 1.0 - x, 0.0, 1.0).unwrap())
        .unwrap();

    c.bench_function("dump_tess_7_two_transfers", |b| {
        b.iter(|| black_box(&grid).dump());
    });
}

criterion_group!(
    benches,
    bench_generate_64,
    bench_generate_256,
    bench_convolution_3x3,
    bench_dump_with_transfer_stack
);
criterion_main!(benches);
