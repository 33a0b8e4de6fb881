use clap::{value_parser, Arg, ArgAction, Command};
use std::{fs::OpenOptions, path::Path, process, time::Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{info, warn};

use graph_dynamics::batch::report::write_csv;
use graph_dynamics::batch::{run_many, Stats};
use graph_dynamics::coloring::generators::{BiasedColoring, ColoringGenerator};
use graph_dynamics::graph::generators::{GraphGenerator, SquareLattice};
use graph_dynamics::rules::Rule;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threshold_sweep=info,graph_dynamics=warn".into()),
        )
        .init();

    let matches = Command::new("threshold_sweep")
        .about("Runs one batch per strong-influence threshold T of a GSL rule")
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .value_parser(["gsl2", "gsl3"])
                .default_value("gsl2"),
        )
        .arg(
            Arg::new("thresholds")
                .long("thresholds")
                .help("Comma-separated values of T")
                .default_value("0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.8,0.9"),
        )
        .arg(
            Arg::new("weak_threshold")
                .long("weak-threshold")
                .short('t')
                .value_parser(value_parser!(f64))
                .default_value("0.1"),
        )
        .arg(
            Arg::new("opposition")
                .long("opposition")
                .short('s')
                .value_parser(value_parser!(f64))
                .default_value("0.1"),
        )
        .arg(
            Arg::new("green_bias")
                .long("green-bias")
                .help("Probability of green in the initial colorings; the rest is split evenly")
                .value_parser(value_parser!(f64))
                .default_value("0.4"),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .help("Side length of the lattice")
                .value_parser(value_parser!(usize))
                .default_value("20"),
        )
        .arg(Arg::new("moore").long("moore").action(ArgAction::SetTrue))
        .arg(
            Arg::new("steps")
                .long("steps")
                .value_parser(value_parser!(usize))
                .default_value("50"),
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
                .value_parser(value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .default_value("outputs/threshold_sweep.csv"),
        )
        .get_matches();

    let rule_name = matches.get_one::<String>("rule").unwrap().clone();
    let thresholds: Vec<f64> = matches
        .get_one::<String>("thresholds")
        .unwrap()
        .split(',')
        .map(|t| t.trim().parse().expect("Invalid threshold"))
        .collect();
    let weak_threshold = *matches.get_one::<f64>("weak_threshold").unwrap();
    let opposition = *matches.get_one::<f64>("opposition").unwrap();
    let green_bias = *matches.get_one::<f64>("green_bias").unwrap();
    let size = *matches.get_one::<usize>("size").unwrap();
    let num_steps = *matches.get_one::<usize>("steps").unwrap();
    let num_runs = *matches.get_one::<usize>("runs").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    let output_file = matches.get_one::<String>("output").unwrap();

    let palette: Vec<String> = if rule_name == "gsl2" {
        vec!["green".to_string(), "yellow".to_string()]
    } else {
        vec!["green".to_string(), "red".to_string(), "yellow".to_string()]
    };
    let rest = (1.0 - green_bias) / (palette.len() - 1) as f64;
    let weights = palette
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), if i == 0 { green_bias } else { rest }))
        .collect();
    let colorings = match BiasedColoring::new(weights) {
        Ok(colorings) => colorings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let graphs = SquareLattice {
        rows: size,
        cols: size,
        moore: matches.get_flag("moore"),
        torus: true,
    };

    println!(
        "Sweeping {} over {} thresholds on {} with {}",
        rule_name,
        thresholds.len(),
        graphs.name(),
        colorings.name()
    );
    let start = Instant::now();

    // every sweep point gets its own rng stream so the points can run in parallel
    let results: Vec<Option<(String, Stats<String>)>> = thresholds
        .par_iter()
        .enumerate()
        .map(|(i, &threshold)| {
            let rule = if rule_name == "gsl2" {
                Rule::gsl2(palette.clone(), threshold)
            } else {
                Rule::gsl3(palette.clone(), threshold, weak_threshold, opposition)
            };
            let rule = match rule {
                Ok(rule) => rule,
                Err(e) => {
                    warn!("skipping T={}: {}", threshold, e);
                    return None;
                }
            };

            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            match run_many(&rule, &graphs, &colorings, num_steps, num_runs, &mut rng) {
                Ok(stats) => {
                    info!(
                        "T={}: {}/{} stabilized",
                        threshold, stats.stabilized_count, stats.num_runs
                    );
                    Some((threshold.to_string(), stats))
                }
                Err(e) => {
                    warn!("T={} failed: {}", threshold, e);
                    None
                }
            }
        })
        .collect();
    let rows: Vec<(String, Stats<String>)> = results.into_iter().flatten().collect();

    let elapsed = start.elapsed();
    println!(
        "ran {} batches in {}.{:03} seconds",
        rows.len(),
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    if let Some(parent) = Path::new(output_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create output directory");
        }
    }
    // if there's no file, create it and write the header
    let file_exists = Path::new(output_file).exists();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(output_file)
        .expect("Failed to open output file");
    write_csv(file, "threshold", &colorings.palette(), &rows, !file_exists)
        .expect("Failed to write to output file");

    println!("Experiment complete. Results saved to {}", output_file);
}
