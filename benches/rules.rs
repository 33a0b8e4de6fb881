use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use graph_dynamics::coloring::generators::{BiasedColoring, ColoringGenerator};
use graph_dynamics::graph::generators::{ErdosRenyi, GraphGenerator, SquareLattice};
use graph_dynamics::iterate::iterate;
use graph_dynamics::rules::Rule;

// Lattice side lengths
const SMALL_SIDE: usize = 30;
const LARGE_SIDE: usize = 100;

const NUM_STEPS: usize = 20;

fn palette() -> Vec<String> {
    vec!["green".to_string(), "red".to_string(), "yellow".to_string()]
}

fn rules() -> Vec<Rule<String>> {
    vec![
        Rule::Majority,
        Rule::Plurality,
        Rule::gsl2(vec!["green".to_string(), "yellow".to_string()], 0.5).unwrap(),
        Rule::gsl3(palette(), 0.5, 0.25, 0.25).unwrap(),
    ]
}

fn bench_single_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let colorings = BiasedColoring::uniform(palette()).unwrap();

    let mut group = c.benchmark_group("single_step");

    for side in [SMALL_SIDE, LARGE_SIDE] {
        let graph = SquareLattice {
            rows: side,
            cols: side,
            moore: true,
            torus: true,
        }
        .generate(&mut rng)
        .unwrap();
        let coloring = colorings.generate(&graph, &mut rng).unwrap();

        for rule in rules() {
            group.bench_with_input(
                BenchmarkId::new(rule.name(), format!("moore_{}x{}", side, side)),
                &rule,
                |b, rule| b.iter(|| rule.apply(&graph, &coloring).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let colorings = BiasedColoring::uniform(palette()).unwrap();
    let graph = ErdosRenyi {
        n: 1000,
        p: 0.01,
        directed: false,
    }
    .generate(&mut rng)
    .unwrap();
    let coloring = colorings.generate(&graph, &mut rng).unwrap();

    let mut group = c.benchmark_group("iterate_erdos_renyi_1000");
    group.sample_size(20);

    for rule in rules() {
        group.bench_with_input(BenchmarkId::from_parameter(rule.name()), &rule, |b, rule| {
            b.iter(|| iterate(&graph, &coloring, rule, NUM_STEPS).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_step, bench_iterate);
criterion_main!(benches);
