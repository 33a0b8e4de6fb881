use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use graph_dynamics::batch::report::Report;
use graph_dynamics::batch::BatchRunner;
use graph_dynamics::coloring::generators::{BiasedColoring, ColoringGenerator};
use graph_dynamics::graph::generators::{
    ErdosRenyi, GraphGenerator, Rewired, SquareLattice, TriangularLattice,
};
use graph_dynamics::rules::Rule;
use graph_dynamics::{Error, Result};

/// log filter used when `RUST_LOG` is unset; covers this binary and the library
const DEFAULT_LOG_FILTER: &str = "main=info,graph_dynamics=info";

fn command() -> Command {
    Command::new("graph-dynamics")
        .about("Runs a coloring update rule over many random graphs and colorings")
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .value_parser(["majority", "plurality", "gsl2", "gsl3"])
                .default_value("majority"),
        )
        .arg(
            Arg::new("palette")
                .long("palette")
                .short('p')
                .help("Comma-separated colors; defaults to green,yellow for gsl2 and green,red,yellow otherwise"),
        )
        .arg(
            Arg::new("bias")
                .long("bias")
                .short('b')
                .help("Comma-separated color probabilities matching the palette; uniform if omitted"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('T')
                .value_parser(value_parser!(f64))
                .default_value("0.5"),
        )
        .arg(
            Arg::new("weak_threshold")
                .long("weak-threshold")
                .short('t')
                .value_parser(value_parser!(f64))
                .default_value("0.25"),
        )
        .arg(
            Arg::new("opposition")
                .long("opposition")
                .short('s')
                .value_parser(value_parser!(f64))
                .default_value("0.25"),
        )
        .arg(
            Arg::new("graph")
                .long("graph")
                .short('g')
                .value_parser(["erdos-renyi", "square", "moore", "triangular"])
                .default_value("moore"),
        )
        .arg(
            Arg::new("vertices")
                .long("vertices")
                .short('n')
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("edge_probability")
                .long("edge-probability")
                .value_parser(value_parser!(f64))
                .default_value("0.05"),
        )
        .arg(
            Arg::new("directed")
                .long("directed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(Arg::new("torus").long("torus").action(ArgAction::SetTrue))
        .arg(
            Arg::new("rewire")
                .long("rewire")
                .help("Number of degree-preserving edge swaps applied to every graph")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("steps")
                .long("steps")
                .value_parser(value_parser!(usize))
                .default_value("20"),
        )
        .arg(
            Arg::new("runs")
                .long("runs")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
}

fn palette(matches: &ArgMatches, rule: &str) -> Vec<String> {
    let default = if rule == "gsl2" {
        "green,yellow"
    } else {
        "green,red,yellow"
    };
    matches
        .get_one::<String>("palette")
        .map(String::as_str)
        .unwrap_or(default)
        .split(',')
        .map(|c| c.trim().to_string())
        .collect()
}

fn rule(matches: &ArgMatches, palette: &[String]) -> Result<Rule<String>> {
    let threshold = *matches.get_one::<f64>("threshold").unwrap();
    match matches.get_one::<String>("rule").unwrap().as_str() {
        "majority" => Ok(Rule::Majority),
        "plurality" => Ok(Rule::Plurality),
        "gsl2" => Rule::gsl2(palette.to_vec(), threshold),
        "gsl3" => Rule::gsl3(
            palette.to_vec(),
            threshold,
            *matches.get_one::<f64>("weak_threshold").unwrap(),
            *matches.get_one::<f64>("opposition").unwrap(),
        ),
        other => Err(Error::InvalidParameter(format!("unknown rule {}", other))),
    }
}

fn coloring_generator(matches: &ArgMatches, palette: Vec<String>) -> Result<BiasedColoring<String>> {
    let Some(biases) = matches.get_one::<String>("bias") else {
        return BiasedColoring::uniform(palette);
    };

    let biases = biases
        .split(',')
        .map(|b| {
            b.trim()
                .parse::<f64>()
                .map_err(|e| Error::InvalidColoring(format!("bad bias {:?}: {}", b, e)))
        })
        .collect::<Result<Vec<f64>>>()?;
    if biases.len() != palette.len() {
        return Err(Error::InvalidColoring(format!(
            "{} biases given for {} colors",
            biases.len(),
            palette.len()
        )));
    }
    BiasedColoring::new(palette.into_iter().zip(biases).collect())
}

fn graph_generator(matches: &ArgMatches) -> Box<dyn GraphGenerator> {
    let rows = *matches.get_one::<usize>("rows").unwrap();
    let cols = *matches.get_one::<usize>("cols").unwrap();
    let torus = matches.get_flag("torus");

    let base: Box<dyn GraphGenerator> = match matches.get_one::<String>("graph").unwrap().as_str() {
        "erdos-renyi" => Box::new(ErdosRenyi {
            n: *matches.get_one::<usize>("vertices").unwrap(),
            p: *matches.get_one::<f64>("edge_probability").unwrap(),
            directed: matches.get_flag("directed"),
        }),
        "square" => Box::new(SquareLattice { rows, cols, moore: false, torus }),
        "triangular" => Box::new(TriangularLattice { rows, cols, torus }),
        _ => Box::new(SquareLattice { rows, cols, moore: true, torus }),
    };

    let swaps = *matches.get_one::<usize>("rewire").unwrap();
    if swaps > 0 {
        Box::new(Rewired { base, swaps })
    } else {
        base
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let rule_name = matches.get_one::<String>("rule").unwrap();
    let palette = palette(matches, rule_name);
    let rule = rule(matches, &palette)?;
    let colorings = coloring_generator(matches, palette)?;
    let graphs = graph_generator(matches);
    let num_steps = *matches.get_one::<usize>("steps").unwrap();
    let num_runs = *matches.get_one::<usize>("runs").unwrap();

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        "running {} trials of {} on {} with {}",
        num_runs,
        rule,
        graphs.name(),
        colorings.name()
    );

    let progress = ProgressBar::new(num_runs as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {wide_bar:.green/gray} {pos}/{len} [{elapsed_precise}]({eta})")
            .unwrap()
            .progress_chars("█▓░"),
    );
    progress.set_message("Running trials");

    let runner = BatchRunner::new(&rule, &*graphs, &colorings, num_steps);
    let stats = runner.run_many_with_progress(num_runs, &mut rng, &progress)?;

    let report = Report {
        rule: rule.to_string(),
        graph_generator: graphs.name(),
        coloring_generator: colorings.name(),
        num_steps,
        stats: &stats,
    };
    println!("{}", report);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        command()
            .try_get_matches_from(std::iter::once("main").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn seeded_run_on_small_lattice() {
        let args = matches(&["--runs", "5", "--seed", "1", "--rows", "5", "--cols", "5"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn coloring_generator_is_named_in_reports() {
        let args = matches(&["--bias", "0.7,0.2,0.1"]);
        let colorings = coloring_generator(&args, palette(&args, "majority")).unwrap();
        assert!(colorings.name().starts_with("biased random"));
        assert_eq!(colorings.palette(), vec!["green", "red", "yellow"]);
    }

    #[test]
    fn mismatched_biases_are_rejected() {
        let args = matches(&["--bias", "0.5,0.5"]);
        let result = coloring_generator(&args, palette(&args, "gsl3"));
        assert!(matches!(result, Err(Error::InvalidColoring(_))));
    }

    #[test]
    fn default_log_filter_shows_binary_and_library() {
        let filter = tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER).to_string();
        assert!(filter.contains("main=info"));
        assert!(filter.contains("graph_dynamics=info"));
    }
}
