//! Human-readable batch summaries and CSV export.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::Write;

use itertools::Itertools;

use crate::batch::Stats;
use crate::coloring::Color;
use crate::util::round_significant;

/// significant figures used for means in reports
const REPORT_DIGITS: u32 = 3;

/// Summary of one batch: what was run and what came out.
pub struct Report<'a, C: Ord> {
    pub rule: String,
    pub graph_generator: String,
    pub coloring_generator: String,
    pub num_steps: usize,
    pub stats: &'a Stats<C>,
}

fn format_means<C: Display>(means: &Option<BTreeMap<C, f64>>) -> String {
    match means {
        Some(means) => means
            .iter()
            .map(|(color, mean)| format!("{}: {}", color, round_significant(*mean, REPORT_DIGITS)))
            .join(", "),
        None => "undefined".to_string(),
    }
}

impl<C: Color + Display> Display for Report<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rule: {}", self.rule)?;
        writeln!(f, "graph generator: {}", self.graph_generator)?;
        writeln!(f, "coloring generator: {}", self.coloring_generator)?;
        writeln!(f, "step cap: {}", self.num_steps)?;
        writeln!(f, "runs: {}", self.stats.num_runs)?;
        writeln!(f, "stabilized: {}", self.stats.stabilized_count)?;
        match self.stats.mean_steps {
            Some(mean) => writeln!(f, "mean steps: {}", round_significant(mean, REPORT_DIGITS))?,
            None => writeln!(f, "mean steps: undefined (no trial stabilized)")?,
        }
        writeln!(
            f,
            "mean initial color counts: {}",
            format_means(&self.stats.mean_initial_color_count)
        )?;
        write!(
            f,
            "mean final color counts: {}",
            format_means(&self.stats.mean_final_color_count)
        )
    }
}

/// CSV header matching `csv_record`: one initial and one final column per palette color
pub fn csv_header<C: Display>(label: &str, palette: &[C]) -> Vec<String> {
    let mut header = vec![
        label.to_string(),
        "num_runs".to_string(),
        "stabilized_count".to_string(),
        "mean_steps".to_string(),
    ];
    header.extend(palette.iter().map(|c| format!("initial_{}", c)));
    header.extend(palette.iter().map(|c| format!("final_{}", c)));
    header
}

/// one CSV row; undefined means are written as empty fields
pub fn csv_record<C: Color + Display>(label: &str, stats: &Stats<C>, palette: &[C]) -> Vec<String> {
    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    let per_color = |means: &Option<BTreeMap<C, f64>>, color: &C| {
        optional(means.as_ref().map(|m| m.get(color).copied().unwrap_or(0.0)))
    };

    let mut record = vec![
        label.to_string(),
        stats.num_runs.to_string(),
        stats.stabilized_count.to_string(),
        optional(stats.mean_steps),
    ];
    record.extend(palette.iter().map(|c| per_color(&stats.mean_initial_color_count, c)));
    record.extend(palette.iter().map(|c| per_color(&stats.mean_final_color_count, c)));
    record
}

/// writes `(label, stats)` rows as CSV, preceded by a header if `write_header` is set
pub fn write_csv<W, C>(
    writer: W,
    label: &str,
    palette: &[C],
    rows: &[(String, Stats<C>)],
    write_header: bool,
) -> csv::Result<()>
where
    W: Write,
    C: Color + Display,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if write_header {
        csv_writer.write_record(csv_header(label, palette))?;
    }
    for (row_label, stats) in rows {
        csv_writer.write_record(csv_record(row_label, stats, palette))?;
    }
    csv_writer.flush()?;
    Ok(())
}
