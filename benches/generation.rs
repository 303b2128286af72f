use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warren::generation::utils::create_rng;
use warren::{
    DungeonGenerator, DungeonGraph, GenerationConfig, Generator, OverlapResolver, RoomPlanner,
    Theme,
};

fn bench_full_generation(c: &mut Criterion) {
    let hotel = DungeonGenerator::for_theme(Theme::Hotel);
    let subway = DungeonGenerator::for_theme(Theme::Subway);
    let config = GenerationConfig::new(42);

    c.bench_function("generate_hotel", |b| {
        b.iter(|| {
            let mut rng = create_rng(&config);
            let _ = hotel.generate(black_box(&config), &mut rng);
        })
    });

    c.bench_function("generate_subway", |b| {
        b.iter(|| {
            let mut rng = create_rng(&config);
            let _ = subway.generate(black_box(&config), &mut rng);
        })
    });
}

fn bench_phases(c: &mut Criterion) {
    let config = GenerationConfig::new(7);
    let catalog = Theme::Hotel.catalog();

    c.bench_function("place_and_separate", |b| {
        b.iter(|| {
            let mut rng = create_rng(&config);
            if let Ok(mut plan) = RoomPlanner::new(&config, &catalog).plan(&mut rng) {
                let _ = OverlapResolver::default().resolve(black_box(&mut plan.rooms), &mut rng);
            }
        })
    });

    let mut rng = create_rng(&config);
    if let Ok(mut plan) = RoomPlanner::new(&config, &catalog).plan(&mut rng) {
        if OverlapResolver::default().resolve(&mut plan.rooms, &mut rng).is_ok() {
            c.bench_function("build_graph_and_stitch", |b| {
                b.iter(|| {
                    let graph = DungeonGraph::build(black_box(&plan.rooms), 6);
                    graph.stitch(&plan.important)
                })
            });
        }
    }
}

criterion_group!(benches, bench_full_generation, bench_phases);
criterion_main!(benches);
