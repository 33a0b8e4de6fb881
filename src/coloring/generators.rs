//! Initial-coloring generators.

use itertools::Itertools;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::coloring::{Color, Coloring};
use crate::error::{Error, Result};
use crate::graph::Graph;

/// biases must sum to one within this tolerance
const BIAS_TOLERANCE: f64 = 1e-9;

/// Produces a total initial coloring for a graph.
pub trait ColoringGenerator<C: Color> {
    fn generate(&self, graph: &dyn Graph, rng: &mut dyn RngCore) -> Result<Coloring<C>>;

    /// the colors this generator can emit, in ascending order
    fn palette(&self) -> Vec<C>;

    /// short human-readable description, used in reports
    fn name(&self) -> String;
}

/// Assigns `colors[i]` to vertex `i`.
///
/// When `colors` is shorter than the vertex count and `pad_randomly` is not
/// empty, the remaining vertices get colors drawn uniformly from
/// `pad_randomly`. Any other length mismatch is an error.
#[derive(Clone, Debug)]
pub struct ListColoring<C> {
    pub colors: Vec<C>,
    pub pad_randomly: Vec<C>,
}

impl<C: Color> ListColoring<C> {
    pub fn new(colors: Vec<C>) -> ListColoring<C> {
        ListColoring {
            colors,
            pad_randomly: Vec::new(),
        }
    }

    pub fn padded(colors: Vec<C>, pad_randomly: Vec<C>) -> ListColoring<C> {
        ListColoring {
            colors,
            pad_randomly,
        }
    }
}

impl<C: Color> ColoringGenerator<C> for ListColoring<C> {
    fn generate(&self, graph: &dyn Graph, rng: &mut dyn RngCore) -> Result<Coloring<C>> {
        let n = graph.n();
        let k = self.colors.len();
        if k > n || (k < n && self.pad_randomly.is_empty()) {
            return Err(Error::InvalidColoring(format!(
                "color list has {} entries but the graph has {} vertices",
                k, n
            )));
        }

        let mut colors = Vec::with_capacity(n);
        colors.extend_from_slice(&self.colors);
        while colors.len() < n {
            // pad_randomly is non-empty here, so choose always succeeds
            if let Some(color) = self.pad_randomly.choose(rng) {
                colors.push(color.clone());
            }
        }
        Coloring::new(graph, colors)
    }

    fn palette(&self) -> Vec<C> {
        self.colors
            .iter()
            .chain(self.pad_randomly.iter())
            .cloned()
            .sorted()
            .dedup()
            .collect()
    }

    fn name(&self) -> String {
        if self.pad_randomly.is_empty() {
            format!("list of {} colors", self.colors.len())
        } else {
            format!(
                "list of {} colors padded from {:?}",
                self.colors.len(),
                self.pad_randomly
            )
        }
    }
}

/// Colors every vertex independently, picking color `c` with probability `p`
/// for each `(c, p)` in `weights`.
#[derive(Clone, Debug)]
pub struct BiasedColoring<C> {
    weights: Vec<(C, f64)>,
    index: WeightedIndex<f64>,
}

impl<C: Color> BiasedColoring<C> {
    /// fails unless the colors are distinct and the probabilities are
    /// non-negative and sum to one
    pub fn new(weights: Vec<(C, f64)>) -> Result<BiasedColoring<C>> {
        if weights.is_empty() {
            return Err(Error::InvalidColoring("no colors to draw from".to_string()));
        }
        if !weights.iter().map(|(c, _)| c).all_unique() {
            return Err(Error::InvalidColoring(format!(
                "bias colors must be distinct, got {:?}",
                weights.iter().map(|(c, _)| c).collect::<Vec<_>>()
            )));
        }
        if let Some((color, p)) = weights.iter().find(|(_, p)| !(p.is_finite() && *p >= 0.0)) {
            return Err(Error::InvalidColoring(format!(
                "bias for {:?} must be a non-negative probability, got {}",
                color, p
            )));
        }
        let sum: f64 = weights.iter().map(|(_, p)| p).sum();
        if (sum - 1.0).abs() > BIAS_TOLERANCE {
            return Err(Error::InvalidColoring(format!(
                "biases must sum to 1, got {}",
                sum
            )));
        }

        let index = WeightedIndex::new(weights.iter().map(|(_, p)| *p))
            .map_err(|e| Error::InvalidColoring(format!("unusable biases: {}", e)))?;
        Ok(BiasedColoring { weights, index })
    }

    /// every color of `palette` equally likely
    pub fn uniform(palette: Vec<C>) -> Result<BiasedColoring<C>> {
        let p = 1.0 / palette.len() as f64;
        BiasedColoring::new(palette.into_iter().map(|c| (c, p)).collect())
    }

    pub fn weights(&self) -> &[(C, f64)] {
        &self.weights
    }
}

impl<C: Color> ColoringGenerator<C> for BiasedColoring<C> {
    fn generate(&self, graph: &dyn Graph, rng: &mut dyn RngCore) -> Result<Coloring<C>> {
        let colors = (0..graph.n())
            .map(|_| self.weights[self.index.sample(rng)].0.clone())
            .collect();
        Coloring::new(graph, colors)
    }

    fn palette(&self) -> Vec<C> {
        self.weights.iter().map(|(c, _)| c.clone()).sorted().collect()
    }

    fn name(&self) -> String {
        format!(
            "biased random [{}]",
            self.weights
                .iter()
                .map(|(c, p)| format!("{:?}: {}", c, p))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::graph::VectorGraph;

    #[test]
    fn list_coloring_assigns_in_vertex_order() {
        let graph = VectorGraph::empty(3, false);
        let mut rng = StdRng::seed_from_u64(0);
        let coloring = ListColoring::new(vec!["b", "a", "b"])
            .generate(&graph, &mut rng)
            .unwrap();
        assert_eq!(coloring.as_slice(), &["b", "a", "b"]);
    }

    #[test]
    fn list_coloring_rejects_length_mismatch() {
        let graph = VectorGraph::empty(3, false);
        let mut rng = StdRng::seed_from_u64(0);

        let short = ListColoring::new(vec!["a", "b"]).generate(&graph, &mut rng);
        assert!(matches!(short, Err(Error::InvalidColoring(_))));

        let long = ListColoring::padded(vec!["a"; 4], vec!["b"]).generate(&graph, &mut rng);
        assert!(matches!(long, Err(Error::InvalidColoring(_))));
    }

    #[test]
    fn list_coloring_pads_from_palette() {
        let graph = VectorGraph::empty(6, false);
        let mut rng = StdRng::seed_from_u64(5);
        let generator = ListColoring::padded(vec!["red"], vec!["green", "yellow"]);
        let coloring = generator.generate(&graph, &mut rng).unwrap();

        assert_eq!(coloring.n(), 6);
        assert_eq!(coloring[0], "red");
        assert!(coloring.iter().skip(1).all(|c| *c == "green" || *c == "yellow"));
        assert_eq!(generator.palette(), vec!["green", "red", "yellow"]);
    }

    #[test]
    fn biased_coloring_validates_biases() {
        assert!(matches!(
            BiasedColoring::new(vec![("a", 0.5), ("b", 0.4)]),
            Err(Error::InvalidColoring(_))
        ));
        assert!(matches!(
            BiasedColoring::new(vec![("a", 1.5), ("b", -0.5)]),
            Err(Error::InvalidColoring(_))
        ));
        assert!(matches!(
            BiasedColoring::new(vec![("a", 0.5), ("a", 0.5)]),
            Err(Error::InvalidColoring(_))
        ));
        assert!(matches!(
            BiasedColoring::<&str>::new(vec![]),
            Err(Error::InvalidColoring(_))
        ));
        assert!(BiasedColoring::new(vec![("a", 0.1), ("b", 0.2), ("c", 0.7)]).is_ok());
    }

    #[test]
    fn biased_coloring_respects_degenerate_bias() {
        let graph = VectorGraph::empty(50, false);
        let mut rng = StdRng::seed_from_u64(1);
        let generator = BiasedColoring::new(vec![("green", 1.0), ("red", 0.0)]).unwrap();
        let coloring = generator.generate(&graph, &mut rng).unwrap();
        assert_eq!(coloring.color_count().get(&"green"), 50);
        assert_eq!(generator.palette(), vec!["green", "red"]);
    }

    #[test]
    fn uniform_coloring_uses_every_color() {
        let graph = VectorGraph::empty(300, false);
        let mut rng = StdRng::seed_from_u64(2);
        let generator = BiasedColoring::uniform(vec![1u8, 2, 3]).unwrap();
        let counts = generator.generate(&graph, &mut rng).unwrap().color_count();
        assert_eq!(counts.total(), 300);
        for color in [1u8, 2, 3] {
            assert!(counts.get(&color) > 50, "color {} drawn too rarely", color);
        }
    }

    #[test]
    fn biased_coloring_is_reproducible() {
        let graph = VectorGraph::empty(40, false);
        let generator = BiasedColoring::uniform(vec!["a", "b"]).unwrap();
        let a = generator.generate(&graph, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = generator.generate(&graph, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
    }
}
