use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::coloring::generators::{BiasedColoring, ColoringGenerator};
use crate::graph::generators::{ErdosRenyi, GraphGenerator};
use crate::graph::VectorGraph;
use crate::iterate::iterate;

const GREEN: &str = "green";
const RED: &str = "red";
const YELLOW: &str = "yellow";

// star with center 0 and leaves 1..=k
fn star(k: u32) -> VectorGraph {
    let edges: Vec<(u32, u32)> = (1..=k).map(|leaf| (0, leaf)).collect();
    VectorGraph::undirected_from_edges(k as usize + 1, &edges)
}

fn gsl2_rule(threshold: f64) -> Rule<&'static str> {
    Rule::gsl2(vec![GREEN, YELLOW], threshold).unwrap()
}

fn gsl3_rule(threshold: f64, weak: f64, opposition: f64) -> Rule<&'static str> {
    Rule::gsl3(vec![GREEN, RED, YELLOW], threshold, weak, opposition).unwrap()
}

fn all_rules() -> Vec<Rule<&'static str>> {
    vec![
        Rule::Majority,
        Rule::Plurality,
        gsl2_rule(0.5),
        gsl3_rule(0.5, 0.25, 0.25),
    ]
}

#[test]
fn majority_adopts_unanimous_neighbors() {
    let graph = star(3);
    let coloring = Coloring::new(&graph, vec![RED, GREEN, GREEN, GREEN]).unwrap();
    let next = Rule::Majority.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn majority_needs_strict_majority() {
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, GREEN, RED, RED]).unwrap();
    let next = Rule::Majority.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], YELLOW);

    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, GREEN, GREEN, RED]).unwrap();
    let next = Rule::Majority.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn isolated_vertices_never_change() {
    let graph = VectorGraph::empty(3, false);
    let coloring = Coloring::new(&graph, vec![RED, GREEN, YELLOW]).unwrap();
    for rule in all_rules() {
        let next = rule.apply(&graph, &coloring).unwrap();
        assert_eq!(next, coloring, "{} changed an isolated vertex", rule);
    }
}

#[test]
fn plurality_needs_a_repeated_color() {
    let graph = star(3);
    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, RED, "blue"]).unwrap();
    let next = Rule::Plurality.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], YELLOW);

    let graph = star(5);
    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, GREEN, RED, "blue", "white"]).unwrap();
    let next = Rule::Plurality.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn majority_and_plurality_break_ties_towards_smallest_color() {
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec!["z", "c", "a", "c", "a"]).unwrap();
    let next = Rule::Plurality.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], "a");

    // the order of the neighbor lists does not matter
    let graph = VectorGraph::undirected_from_edges(5, &[(0, 4), (0, 3), (0, 2), (0, 1)]);
    let next = Rule::Plurality.apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], "a");
}

#[test]
fn directed_rules_read_in_neighbors() {
    // 1 -> 0 and 2 -> 0, while 0 -> 3
    let graph = VectorGraph::directed_from_edges(4, &[(1, 0), (2, 0), (0, 3)]);
    let coloring = Coloring::new(&graph, vec![RED, GREEN, GREEN, YELLOW]).unwrap();
    let next = Rule::Majority.apply(&graph, &coloring).unwrap();
    assert_eq!(next.as_slice(), &[GREEN, GREEN, GREEN, RED]);
}

#[test]
fn gsl2_turns_green_above_threshold() {
    let graph = star(4);
    for old in [GREEN, YELLOW] {
        let coloring = Coloring::new(&graph, vec![old, GREEN, GREEN, GREEN, YELLOW]).unwrap();
        let next = gsl2_rule(0.5).apply(&graph, &coloring).unwrap();
        assert_eq!(next[0], GREEN);
    }
}

#[test]
fn gsl2_never_adopts_yellow() {
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec![GREEN, YELLOW, YELLOW, YELLOW, YELLOW]).unwrap();
    let next = gsl2_rule(0.5).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn gsl2_ignores_foreign_colors() {
    // one green out of one counted neighbor; the blue ones are not counted
    let graph = star(3);
    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, "blue", "blue"]).unwrap();
    let next = gsl2_rule(0.9).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn gsl3_strong_influence() {
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec![YELLOW, RED, RED, RED, GREEN]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], RED);
}

#[test]
fn gsl3_strong_influence_beats_weak_influence() {
    // a green vertex with no green and only red neighbors meets the weak
    // condition (green < t, red >= s) but red's strong influence wins
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec![GREEN, RED, RED, RED, RED]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], RED);
}

#[test]
fn gsl3_green_strong_influence_has_priority_over_red() {
    // with T below one half both colors can exceed it; green is checked first
    let graph = star(4);
    let coloring = Coloring::new(&graph, vec![RED, GREEN, GREEN, RED, RED]).unwrap();
    let next = gsl3_rule(0.4, 0.1, 0.1).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);
}

#[test]
fn gsl3_weak_influence_makes_undecided() {
    // 1 green, 2 red, 2 yellow neighbors: no strong influence at T = 0.5
    let graph = star(5);
    let coloring = Coloring::new(&graph, vec![GREEN, GREEN, RED, RED, YELLOW, YELLOW]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], YELLOW);

    let coloring = Coloring::new(&graph, vec![RED, GREEN, GREEN, RED, YELLOW, YELLOW]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], YELLOW);
}

#[test]
fn gsl3_keeps_color_without_influence() {
    // 2 green, 1 red, 2 yellow: green is not thin enough to be exposed
    let graph = star(5);
    let coloring = Coloring::new(&graph, vec![GREEN, GREEN, GREEN, RED, YELLOW, YELLOW]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], GREEN);

    // yellow vertices are only moved by strong influence
    let coloring = Coloring::new(&graph, vec![YELLOW, GREEN, GREEN, RED, YELLOW, YELLOW]).unwrap();
    let next = gsl3_rule(0.5, 0.25, 0.25).apply(&graph, &coloring).unwrap();
    assert_eq!(next[0], YELLOW);
}

#[test]
fn gsl_palettes_are_validated() {
    assert!(matches!(
        Rule::gsl2(vec![GREEN], 0.5),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl2(vec![GREEN, GREEN], 0.5),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl3(vec![GREEN, RED], 0.5, 0.25, 0.25),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl3(vec![GREEN, RED, YELLOW, "blue"], 0.5, 0.25, 0.25),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn gsl_thresholds_are_validated() {
    assert!(matches!(
        Rule::gsl2(vec![GREEN, YELLOW], 1.5),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl2(vec![GREEN, YELLOW], f64::NAN),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl3(vec![GREEN, RED, YELLOW], 0.5, 0.3, 0.3),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Rule::gsl3(vec![GREEN, RED, YELLOW], 0.5, -0.1, 0.1),
        Err(Error::InvalidParameter(_))
    ));
    assert!(Rule::gsl3(vec![GREEN, RED, YELLOW], 0.5, 0.25, 0.25).is_ok());
}

#[test]
fn apply_rejects_invalid_parameters_built_directly() {
    let graph = star(2);
    let coloring = Coloring::new(&graph, vec![GREEN, GREEN, YELLOW]).unwrap();
    let rule = Rule::Gsl2(Gsl2Params {
        palette: vec![GREEN, YELLOW, RED],
        threshold: 0.5,
    });
    assert!(matches!(
        rule.apply(&graph, &coloring),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn apply_rejects_foreign_coloring() {
    let coloring = Coloring::new(&star(2), vec![GREEN, GREEN, YELLOW]).unwrap();
    let result = Rule::Majority.apply(&star(3), &coloring);
    assert!(matches!(result, Err(Error::InvalidColoring(_))));
}

#[test]
fn default_parameters() {
    let gsl2: Gsl2Params<String> = Gsl2Params::default();
    assert_eq!(gsl2.palette, vec!["green", "yellow"]);
    assert_eq!(gsl2.threshold, 0.5);
    assert!(gsl2.validate().is_ok());

    let gsl3: Gsl3Params<String> = Gsl3Params::default();
    assert_eq!(gsl3.palette, vec!["green", "red", "yellow"]);
    assert!(gsl3.validate().is_ok());
}

#[test]
fn rule_display() {
    assert_eq!(Rule::<&str>::Majority.to_string(), "majority");
    assert_eq!(
        gsl3_rule(0.5, 0.25, 0.25).to_string(),
        "gsl3 [\"green\", \"red\", \"yellow\"] (T=0.5, t=0.25, s=0.25)"
    );
    assert_eq!(gsl2_rule(0.5).palette(), Some(&[GREEN, YELLOW][..]));
    assert_eq!(Rule::<&str>::Plurality.palette(), None);
}

#[test]
fn rules_are_total_and_fixed_points_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(17);
    let graphs = ErdosRenyi { n: 40, p: 0.1, directed: false };
    let directed = ErdosRenyi { n: 40, p: 0.1, directed: true };
    let colorings = BiasedColoring::uniform(vec![GREEN, RED, YELLOW]).unwrap();

    for _ in 0..10 {
        for graph in [graphs.generate(&mut rng).unwrap(), directed.generate(&mut rng).unwrap()] {
            let coloring = colorings.generate(&graph, &mut rng).unwrap();
            for rule in all_rules() {
                let next = rule.apply(&graph, &coloring).unwrap();
                assert!(next.covers(&graph));
                assert_ne!(next.n(), 0);

                let trajectory = iterate(&graph, &coloring, &rule, 100).unwrap();
                if trajectory.stabilized() {
                    let last = trajectory.last();
                    assert_eq!(&rule.apply(&graph, last).unwrap(), last);
                }
            }
        }
    }
}
