use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use shooter_core::entity::{AdversaryState, EntityState};
use shooter_core::{KeyState, SimConfig, Simulation, TickInput};

fn bench_step_idle(c: &mut Criterion) {
    let mut sim = Simulation::new(SimConfig::default(), 42).unwrap();
    let input = TickInput::default();

    c.bench_function("step_idle", |b| {
        b.iter(|| black_box(sim.step(black_box(&input))))
    });
}

fn bench_step_crowded(c: &mut Criterion) {
    // Busy playfield: a full grid of adversaries and a steady stream of shots
    let config = SimConfig {
        reload_ms: 16,
        despawn_escaped_adversaries: false,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config, 42).unwrap();
    let size = sim.config().profiles.adversary.size;
    for row in 0..4 {
        for x in sim.config().spawn_columns() {
            let y = 80.0 + row as f32 * 70.0;
            sim.arena_mut().spawn(
                Vec2::new(x, y),
                size,
                EntityState::Adversary(AdversaryState::default()),
            );
        }
    }
    let input = TickInput::held(KeyState::FIRE | KeyState::RIGHT);

    c.bench_function("step_crowded", |b| {
        b.iter(|| black_box(sim.step(black_box(&input))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut sim = Simulation::new(SimConfig::default(), 7).unwrap();
    for _ in 0..600 {
        sim.step(&TickInput::held(KeyState::FIRE));
    }

    c.bench_function("snapshot", |b| b.iter(|| black_box(sim.snapshot())));
}

criterion_group!(benches, bench_step_idle, bench_step_crowded, bench_snapshot);
criterion_main!(benches);
