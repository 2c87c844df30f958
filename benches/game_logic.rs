use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use voxtris::core::{GameState, VolumeGrid};
use voxtris::engine::dispatch;
use voxtris::types::{Color, Command, Progress};

fn seeded() -> GameState {
    GameState::with_rng(StdRng::seed_from_u64(12345), Progress::default())
}

fn bench_advance(c: &mut Criterion) {
    let mut state = seeded();

    c.bench_function("advance_16ms", |b| {
        b.iter(|| {
            state.advance(black_box(16));
            if state.game_over() {
                state.reset();
            }
        })
    });
}

fn bench_layer_compact(c: &mut Criterion) {
    let mut grid = VolumeGrid::empty();
    for y in [0, 1, 3, 6] {
        grid.fill_layer(y, Some(Color(0x38bdf8)));
    }
    grid.set(4, 2, 4, Some(Color(0xfacc15)));

    c.bench_function("scan_and_compact_4_layers", |b| {
        b.iter(|| {
            let cleared = black_box(&grid).scan_full_layers();
            grid.compact(&cleared)
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = seeded();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            dispatch(&mut state, Command::HardDrop)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = seeded();

    c.bench_function("dispatch_rotate", |b| {
        b.iter(|| dispatch(&mut state, black_box(Command::RotateZ)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = seeded();
    let mut snap = state.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| state.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_layer_compact,
    bench_hard_drop,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
