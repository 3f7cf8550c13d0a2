use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sessionprep::services::latest_session::LatestSessionIndex;
use sessionprep::*;

const BASE: f64 = 1.3e9;
const DAY: f64 = 86400.0;

fn synthetic_ratings(users: usize, weeks: usize) -> Vec<RatingRecord> {
    let mut records = Vec::with_capacity(users * weeks * 4);
    for u in 0..users {
        for week in 0..weeks {
            for k in 0..4 {
                records.push(RatingRecord {
                    user_id: format!("u{}", u),
                    item_id: format!("m{}", (u * 7 + week * 3 + k) % 200),
                    rating: 1 + (k as i32 % 6),
                    timestamp: BASE + (week * 7) as f64 * DAY + k as f64 * 600.0,
                });
            }
        }
    }
    records
}

fn synthetic_social(users: usize) -> Vec<FollowEdge> {
    (0..users)
        .flat_map(|u| {
            [1, 7].into_iter().map(move |step| {
                FollowEdge::new(format!("u{}", u), format!("u{}", (u + step) % users))
            })
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut config = Config::default();
    config.split.seed = Some(7);
    let pipeline = Pipeline::new(config).unwrap();
    let ratings = synthetic_ratings(2_000, 40);
    let social = synthetic_social(2_000);

    c.bench_function("pipeline_run_2k_users", |b| {
        b.iter(|| black_box(pipeline.run(ratings.clone(), social.clone()).unwrap()));
    });
}

fn benchmark_latest_sessions(c: &mut Criterion) {
    let events: Vec<DenseEvent> = (0..5_000u32)
        .flat_map(|u| (0..60u32).step_by(3).map(move |t| SessionEvent::new(u, 1, 4, 0, t)))
        .collect();

    c.bench_function("latest_session_index_5k_users", |b| {
        b.iter(|| black_box(LatestSessionIndex::build(&events, 5_000, 60).unwrap()));
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_latest_sessions);
criterion_main!(benches);
