use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazyreveal_core::{document_fold, is_within_threshold};
use lazyreveal_platform::{Point, Rect, Size};

fn bench_fold_test(c: &mut Criterion) {
    let fold = document_fold(Point::new(0.0, 1200.0), Size::new(1920.0, 1080.0));
    let rects: Vec<Rect> = (0..1024)
        .map(|i| Rect::new((i % 8) as f32 * 240.0, i as f32 * 37.0, 200.0, 150.0))
        .collect();

    c.bench_function("is_within_threshold_1024", |b| {
        b.iter(|| {
            let mut inside = 0u32;
            for rect in &rects {
                if is_within_threshold(black_box(*rect), black_box(fold), black_box(300.0)) {
                    inside += 1;
                }
            }
            inside
        })
    });
}

criterion_group!(benches, bench_fold_test);
criterion_main!(benches);
