use backdrop::options::SceneOptions;
use backdrop::scene::{animate, Scene};
use backdrop::ViewportClass;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn seeded_options() -> SceneOptions {
    SceneOptions {
        seed: Some(97),
        ..SceneOptions::default()
    }
}

fn advance_full_population(c: &mut Criterion) {
    let mut scene = Scene::populate(ViewportClass::Full, &seeded_options());
    let mut t = 0.0_f32;
    c.bench_function("advance_full_population", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            animate::advance(black_box(&mut scene), black_box(t));
        });
    });
}

fn advance_compact_population(c: &mut Criterion) {
    let mut scene =
        Scene::populate(ViewportClass::Compact, &seeded_options());
    let mut t = 0.0_f32;
    c.bench_function("advance_compact_population", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            animate::advance(black_box(&mut scene), black_box(t));
        });
    });
}

fn populate_full(c: &mut Criterion) {
    let options = seeded_options();
    c.bench_function("populate_full", |b| {
        b.iter(|| {
            black_box(Scene::populate(ViewportClass::Full, &options))
        });
    });
}

criterion_group!(
    benches,
    advance_full_population,
    advance_compact_population,
    populate_full
);
criterion_main!(benches);
