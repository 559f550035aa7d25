use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ludoteca_core::scoring::{ScoreState, ScoringStrategy};

fn make_state(rounds: usize, misses_per_round: u32) -> ScoreState {
    let mut state = ScoreState {
        total_rounds: rounds as u32,
        ..ScoreState::default()
    };
    for index in 0..rounds {
        let level = (index % 4) as u32;
        for _ in 0..misses_per_round {
            state.record_attempt(index, level, false);
        }
        state.record_attempt(index, level, true);
    }
    state
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    let small = make_state(6, 1);
    let large = make_state(50, 5);

    for (name, state) in [("small", &small), ("large", &large)] {
        group.bench_function(format!("linear_deduction/{name}"), |b| {
            let strategy = ScoringStrategy::linear_deduction();
            b.iter(|| strategy.compute(black_box(state)))
        });

        group.bench_function(format!("level_weighted/{name}"), |b| {
            let strategy = ScoringStrategy::LevelWeighted;
            b.iter(|| strategy.compute(black_box(state)))
        });

        group.bench_function(format!("completion_percentage/{name}"), |b| {
            let strategy = ScoringStrategy::completion_percentage();
            b.iter(|| strategy.compute(black_box(state)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
