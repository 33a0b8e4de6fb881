//! Monte Carlo driver: many independent trials, aggregated.
//!
//! Trials run one after another and draw all their randomness from the single
//! rng handle passed in, so seeding that rng once makes a whole batch
//! reproducible. Running trials in parallel would need a separate rng stream
//! per trial to keep trials uncorrelated.

pub mod report;

use std::collections::BTreeMap;

use indicatif::ProgressBar;
use rand::RngCore;
use tracing::{info, trace, warn};

use crate::coloring::generators::ColoringGenerator;
use crate::coloring::{Color, ColorCount};
use crate::error::Result;
use crate::graph::generators::GraphGenerator;
use crate::iterate::iterate;
use crate::rules::Rule;

/// Result of one trial.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialOutcome<C: Ord> {
    pub stabilized: bool,
    /// length of the trajectory, the initial coloring included
    pub steps: usize,
    pub initial: ColorCount<C>,
    pub last: ColorCount<C>,
}

/// Aggregate statistics of a batch.
///
/// The means are taken over stabilized trials only. Trials that hit the step
/// cap are counted in `num_runs` but contribute nothing else, so the means
/// describe the trials that settled and are biased towards them. With no
/// stabilized trial every mean is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats<C: Ord> {
    pub num_runs: usize,
    pub stabilized_count: usize,
    /// mean trajectory length
    pub mean_steps: Option<f64>,
    /// mean number of vertices per color in the initial colorings
    pub mean_initial_color_count: Option<BTreeMap<C, f64>>,
    /// mean number of vertices per color in the stabilized colorings
    pub mean_final_color_count: Option<BTreeMap<C, f64>>,
}

impl<C: Color> Stats<C> {
    /// true when no trial stabilized, leaving the means undefined
    pub fn is_empty(&self) -> bool {
        self.stabilized_count == 0
    }

    /// fraction of trials that stabilized; `None` for an empty batch
    pub fn stabilized_fraction(&self) -> Option<f64> {
        if self.num_runs == 0 {
            None
        } else {
            Some(self.stabilized_count as f64 / self.num_runs as f64)
        }
    }
}

/// running sums over stabilized trials
struct Accumulator<C> {
    num_runs: usize,
    stabilized_count: usize,
    steps: usize,
    initial: BTreeMap<C, usize>,
    last: BTreeMap<C, usize>,
}

impl<C: Color> Accumulator<C> {
    fn new(palette: &[C]) -> Accumulator<C> {
        let zeros: BTreeMap<C, usize> = palette.iter().map(|c| (c.clone(), 0)).collect();
        Accumulator {
            num_runs: 0,
            stabilized_count: 0,
            steps: 0,
            initial: zeros.clone(),
            last: zeros,
        }
    }

    fn add(&mut self, outcome: &TrialOutcome<C>) {
        self.num_runs += 1;
        if !outcome.stabilized {
            return;
        }
        self.stabilized_count += 1;
        self.steps += outcome.steps;
        for (color, count) in outcome.initial.iter() {
            *self.initial.entry(color.clone()).or_insert(0) += count;
        }
        for (color, count) in outcome.last.iter() {
            *self.last.entry(color.clone()).or_insert(0) += count;
        }
    }

    fn finish(self) -> Stats<C> {
        if self.stabilized_count == 0 {
            return Stats {
                num_runs: self.num_runs,
                stabilized_count: 0,
                mean_steps: None,
                mean_initial_color_count: None,
                mean_final_color_count: None,
            };
        }

        let k = self.stabilized_count as f64;
        let mean = |sums: BTreeMap<C, usize>| -> BTreeMap<C, f64> {
            sums.into_iter()
                .map(|(color, sum)| (color, sum as f64 / k))
                .collect()
        };
        Stats {
            num_runs: self.num_runs,
            stabilized_count: self.stabilized_count,
            mean_steps: Some(self.steps as f64 / k),
            mean_initial_color_count: Some(mean(self.initial)),
            mean_final_color_count: Some(mean(self.last)),
        }
    }
}

/// Runs trials of graph generation, initial coloring and iteration.
pub struct BatchRunner<'a, C, G: ?Sized, K: ?Sized> {
    pub rule: &'a Rule<C>,
    pub graph_generator: &'a G,
    pub coloring_generator: &'a K,
    /// step cap for every trial
    pub num_steps: usize,
}

impl<'a, C, G, K> BatchRunner<'a, C, G, K>
where
    C: Color,
    G: GraphGenerator + ?Sized,
    K: ColoringGenerator<C> + ?Sized,
{
    pub fn new(
        rule: &'a Rule<C>,
        graph_generator: &'a G,
        coloring_generator: &'a K,
        num_steps: usize,
    ) -> Self {
        BatchRunner {
            rule,
            graph_generator,
            coloring_generator,
            num_steps,
        }
    }

    /// every color the statistics are keyed by: the rule's palette and the
    /// coloring generator's palette
    pub fn palette(&self) -> Vec<C> {
        let mut palette = self.coloring_generator.palette();
        if let Some(rule_palette) = self.rule.palette() {
            palette.extend(rule_palette.iter().cloned());
        }
        palette.sort();
        palette.dedup();
        palette
    }

    /// generates a fresh graph and coloring and iterates the rule on them
    pub fn run_trial(&self, rng: &mut dyn RngCore) -> Result<TrialOutcome<C>> {
        let graph = self.graph_generator.generate(rng)?;
        let coloring = self.coloring_generator.generate(&graph, rng)?;
        let trajectory = iterate(&graph, &coloring, self.rule, self.num_steps)?;

        Ok(TrialOutcome {
            stabilized: trajectory.stabilized(),
            steps: trajectory.len(),
            initial: trajectory.initial().color_count(),
            last: trajectory.last().color_count(),
        })
    }

    /// runs `num_runs` trials; the first failing trial aborts the batch
    pub fn run_many(&self, num_runs: usize, rng: &mut dyn RngCore) -> Result<Stats<C>> {
        self.run_with(num_runs, rng, || {})
    }

    /// like `run_many`, ticking `progress` once per finished trial
    pub fn run_many_with_progress(
        &self,
        num_runs: usize,
        rng: &mut dyn RngCore,
        progress: &ProgressBar,
    ) -> Result<Stats<C>> {
        let stats = self.run_with(num_runs, rng, || progress.inc(1))?;
        progress.finish();
        Ok(stats)
    }

    fn run_with<F: FnMut()>(
        &self,
        num_runs: usize,
        rng: &mut dyn RngCore,
        mut on_trial: F,
    ) -> Result<Stats<C>> {
        let mut accumulator = Accumulator::new(&self.palette());
        for trial in 0..num_runs {
            let outcome = self.run_trial(rng)?;
            trace!(
                "trial {}: stabilized={} steps={}",
                trial,
                outcome.stabilized,
                outcome.steps
            );
            accumulator.add(&outcome);
            on_trial();
        }

        let stats = accumulator.finish();
        if num_runs > 0 && stats.is_empty() {
            warn!(
                "none of {} trials stabilized within {} steps",
                num_runs, self.num_steps
            );
        }
        info!(
            "{}: {}/{} trials stabilized",
            self.rule.name(),
            stats.stabilized_count,
            stats.num_runs
        );
        Ok(stats)
    }
}

/// Runs `num_runs` trials of `rule` over fresh graphs and colorings.
pub fn run_many<C, G, K>(
    rule: &Rule<C>,
    graph_generator: &G,
    coloring_generator: &K,
    num_steps: usize,
    num_runs: usize,
    rng: &mut dyn RngCore,
) -> Result<Stats<C>>
where
    C: Color,
    G: GraphGenerator + ?Sized,
    K: ColoringGenerator<C> + ?Sized,
{
    BatchRunner::new(rule, graph_generator, coloring_generator, num_steps).run_many(num_runs, rng)
}
