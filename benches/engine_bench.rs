use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use tankfield::arena::{play_game, ArenaConfig};
use tankfield::board::{Action, Battlefield, Side};
use tankfield::movegen::{legal_actions, random_actions};
use tankfield::protocol::bitfield::BrickMap;
use tankfield::protocol::botzone::parse_request;
use tankfield::protocol::layout::{battlefield_from_bricks, encode_bricks};
use tankfield::resolve::{outcome, resolve_turn};

/// Bricks of the sample map used across the tests.
const SAMPLE_FIELDS: [u64; 3] = [62917632, 101424, 837180];

fn sample_state() -> Battlefield {
    battlefield_from_bricks(&BrickMap::from_fields(SAMPLE_FIELDS).unwrap()).unwrap()
}

fn bench_resolve_stay(c: &mut Criterion) {
    let state = sample_state();
    let mut scratch = state.clone();
    c.bench_function("resolve_turn_all_stay", |b| {
        b.iter(|| {
            scratch.clone_from(&state);
            for side in [Side::Blue, Side::Red] {
                scratch.set_actions(side, [Action::Stay, Action::Stay]).unwrap();
            }
            resolve_turn(black_box(&mut scratch)).unwrap()
        })
    });
}

fn bench_resolve_all_shoot(c: &mut Criterion) {
    let state = sample_state();
    let mut scratch = state.clone();
    c.bench_function("resolve_turn_all_shoot", |b| {
        b.iter(|| {
            scratch.clone_from(&state);
            scratch.set_actions(Side::Blue, [Action::DownShoot, Action::LeftShoot]).unwrap();
            scratch.set_actions(Side::Red, [Action::UpShoot, Action::RightShoot]).unwrap();
            resolve_turn(black_box(&mut scratch)).unwrap()
        })
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = sample_state();
    c.bench_function("legal_actions_four_tanks", |b| {
        b.iter(|| {
            for side in [Side::Blue, Side::Red] {
                for slot in 0..2 {
                    black_box(legal_actions(black_box(&state), side, slot));
                }
            }
        })
    });
}

fn bench_random_turn(c: &mut Criterion) {
    let state = sample_state();
    let mut rng = SmallRng::seed_from_u64(1);
    c.bench_function("random_actions_both_sides", |b| {
        b.iter(|| {
            let blue = random_actions(black_box(&state), Side::Blue, &mut rng);
            let red = random_actions(black_box(&state), Side::Red, &mut rng);
            (blue, red, outcome(&state))
        })
    });
}

fn bench_codec(c: &mut Criterion) {
    let state = sample_state();
    let mut group = c.benchmark_group("codec");
    group.bench_function("decode_fields", |b| {
        b.iter(|| battlefield_from_bricks(&BrickMap::from_fields(black_box(SAMPLE_FIELDS)).unwrap()))
    });
    group.bench_function("encode_fields", |b| b.iter(|| encode_bricks(black_box(&state)).to_fields()));
    group.bench_function("parse_history_request", |b| {
        let line = r#"{"requests":[{"field":[62917632,101424,837180],"mySide":0},[-1,4],[2,-1]],"responses":[[0,-1],[-1,6]]}"#;
        b.iter(|| parse_request(black_box(line)).unwrap())
    });
    group.finish();
}

fn bench_full_game(c: &mut Criterion) {
    let config = ArenaConfig {
        quiet: true,
        ..ArenaConfig::default()
    };
    let mut group = c.benchmark_group("arena");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("random_game", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        b.iter(|| play_game(&config, 0, &mut rng).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_stay,
    bench_resolve_all_shoot,
    bench_legal_actions,
    bench_random_turn,
    bench_codec,
    bench_full_game,
);
criterion_main!(benches);
