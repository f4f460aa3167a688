//! Stroke simulation benchmarks: the opening break and a quiet ranging
//! shot, measured over the full integrator run.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;

use carrom_core::core::MatchConfig;
use carrom_core::physics::Integrator;
use carrom_core::{Board, BodySet};

fn bench_break_shot(c: &mut Criterion) {
    let board = Board::standard();
    let config = MatchConfig::new(2);

    c.bench_function("break_shot", |b| {
        b.iter(|| {
            let mut bodies = BodySet::initial(&board);
            bodies.spawn_striker(Vec2::new(300.0, 550.0));
            bodies.striker_mut().velocity = Vec2::new(0.4, -19.0);
            let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();
            black_box(stroke)
        })
    });
}

fn bench_ranging_shot(c: &mut Criterion) {
    let board = Board::standard();
    let config = MatchConfig::new(2);

    c.bench_function("ranging_shot", |b| {
        b.iter(|| {
            let mut bodies = BodySet::initial(&board);
            bodies.spawn_striker(Vec2::new(300.0, 550.0));
            bodies.striker_mut().velocity = Vec2::new(10.0, -2.0);
            let stroke = Integrator::new(&board, &config).run(&mut bodies).unwrap();
            black_box(stroke)
        })
    });
}

criterion_group!(benches, bench_break_shot, bench_ranging_shot);
criterion_main!(benches);
