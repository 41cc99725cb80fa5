use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ur_core::{
    CompetitorProfile, RaceConfig, RaceEngine, RaceType, RunningStyle, Stats, Surface,
};

fn field(size: usize) -> Vec<CompetitorProfile> {
    let styles = [
        RunningStyle::FrontRunner,
        RunningStyle::PaceChaser,
        RunningStyle::LateSurger,
        RunningStyle::EndCloser,
    ];
    (0..size)
        .map(|i| {
            let base = 450 + (i as u16 * 37) % 400;
            CompetitorProfile::new(
                format!("uma_{i}"),
                Stats::new(base + 80, base, base + 40, base - 20, base + 10),
                styles[i % styles.len()],
            )
        })
        .collect()
}

fn bench_full_race(c: &mut Criterion) {
    c.bench_function("mile_race_8_competitors", |b| {
        b.iter(|| {
            let race = RaceConfig::new(1600.0, RaceType::Mile, Surface::Turf);
            let mut engine = RaceEngine::new(race, field(8), black_box(42)).unwrap();
            engine.run(0.25).unwrap()
        })
    });

    c.bench_function("long_race_18_competitors", |b| {
        b.iter(|| {
            let race = RaceConfig::new(3200.0, RaceType::Long, Surface::Turf);
            let mut engine = RaceEngine::new(race, field(18), black_box(42)).unwrap();
            engine.run(0.25).unwrap()
        })
    });
}

fn bench_single_tick(c: &mut Criterion) {
    c.bench_function("single_step_18_competitors", |b| {
        let race = RaceConfig::new(3200.0, RaceType::Long, Surface::Turf);
        let mut engine = RaceEngine::new(race, field(18), 42).unwrap();
        b.iter(|| black_box(engine.step(0.25)));
    });
}

criterion_group!(benches, bench_full_race, bench_single_tick);
criterion_main!(benches);
