use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use nalgebra::Vector3;

use pitch_core::engine::trajectory::{Kinematics, Trajectory};
use pitch_core::ingest::{Bases, HalfInning, ScoreLine};
use pitch_core::{reconstruct, PitchCall, PitchRow, ReconstructConfig, TrajectoryConfig};

fn kinematics(i: u32) -> Kinematics {
    let wobble = (i % 7) as f64 * 0.1;
    Kinematics {
        release: Vector3::new(-1.5 + wobble, 54.0, 6.0),
        velocity: Vector3::new(5.0, -135.0 + wobble * 10.0, -5.0),
        acceleration: Vector3::new(-10.0, 28.0, -20.0 + wobble),
    }
}

/// Nine innings of three-up, three-down at-bats, four pitches each
fn synthetic_game(game_pk: u64) -> Vec<PitchRow> {
    let mut rows = Vec::new();
    for ab in 1..=54u32 {
        let inning = ((ab - 1) / 6 + 1) as u8;
        let half = if (ab - 1) % 6 < 3 {
            HalfInning::Top
        } else {
            HalfInning::Bottom
        };
        for pitch in 1..=4u32 {
            let last = pitch == 4;
            rows.push(PitchRow {
                game_date: "2024-04-02".to_string(),
                game_pk,
                at_bat_number: ab,
                pitch_number: pitch,
                pitch_type: "FF".to_string(),
                pitch_name: None,
                release_speed: 95.0,
                kinematics: kinematics(ab * 4 + pitch),
                plate_x: 0.0,
                plate_z: 2.5,
                sz_top: 3.4,
                sz_bot: 1.6,
                balls: (pitch - 1).min(3) as u8,
                strikes: 0,
                outs_when_up: ((ab - 1) % 3) as u8,
                inning,
                half,
                home_team: "NYY".to_string(),
                away_team: "HOU".to_string(),
                score: ScoreLine::default(),
                post_home_score: None,
                post_away_score: None,
                call: if last { PitchCall::InPlay } else { PitchCall::Ball },
                description: if last { "hit_into_play" } else { "ball" }.to_string(),
                events: last.then(|| "field_out".to_string()),
                player_name: "Gerrit Cole".to_string(),
                batter: 600000 + ab,
                pitcher: 543037,
                stand: None,
                p_throws: None,
                runners: Bases::EMPTY,
            });
        }
    }
    rows
}

fn bench_trajectory(c: &mut Criterion) {
    let config = TrajectoryConfig::default();
    let k = kinematics(3);
    c.bench_function("trajectory/sample_240hz", |b| {
        b.iter(|| Trajectory::sample(black_box(&k), &config))
    });
}

fn bench_reconstruct(c: &mut Criterion) {
    let config = ReconstructConfig::default();
    c.bench_function("reconstruct/one_game", |b| {
        b.iter_batched(
            || synthetic_game(745001),
            |rows| reconstruct(rows, &config),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("reconstruct/eight_games", |b| {
        b.iter_batched(
            || (0..8).flat_map(|g| synthetic_game(745001 + g)).collect::<Vec<_>>(),
            |rows| reconstruct(rows, &config),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_trajectory, bench_reconstruct);
criterion_main!(benches);
