use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_splitter::session::script::replay;
use expense_splitter::session::store::SessionStore;
use expense_splitter::simulation::random_session::{generate_random_script, ScriptConfig};

fn bench_replay(c: &mut Criterion, name: &str, participant_count: usize, split_count: usize) {
    let config = ScriptConfig {
        participant_count,
        split_count,
        ..Default::default()
    };
    let script = generate_random_script(&config);

    c.bench_function(name, |b| {
        b.iter(|| {
            let mut store = SessionStore::default();
            replay(&mut store, black_box(&script))
        })
    });
}

fn bench_small_group(c: &mut Criterion) {
    bench_replay(c, "replay_4_participants_50_splits", 4, 50);
}

fn bench_medium_group(c: &mut Criterion) {
    bench_replay(c, "replay_20_participants_200_splits", 20, 200);
}

fn bench_large_group(c: &mut Criterion) {
    bench_replay(c, "replay_100_participants_500_splits", 100, 500);
}

criterion_group!(benches, bench_small_group, bench_medium_group, bench_large_group);
criterion_main!(benches);
