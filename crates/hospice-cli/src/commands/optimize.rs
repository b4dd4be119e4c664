//! Optimize a ward's bed layout.

use anyhow::{bail, Result};
use colored::Colorize;
use hospice::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::Config;

pub struct OptimizeArgs {
    pub input: String,
    pub output: Option<String>,
    pub iterations: Option<usize>,
    pub ants: Option<usize>,
    pub seed: Option<u64>,
}

pub fn run(args: OptimizeArgs, verbose: bool) -> Result<()> {
    let input = Path::new(&args.input);
    if !input.exists() {
        bail!("Bed file does not exist: {}", input.display());
    }

    let config = Config::load()?;
    let mut aco = config.aco.clone();
    if let Some(iterations) = args.iterations {
        aco = aco.with_iterations(iterations);
    }
    if let Some(ants) = args.ants {
        aco = aco.with_ant_count(ants);
    }
    if let Some(seed) = args.seed {
        aco = aco.with_seed(seed);
    }

    let beds = super::load_beds(input, &config.grid)?.snapshot()?;
    println!(
        "{} Optimizing {} beds ({} iterations x {} ants)...",
        "→".blue(),
        beds.len().to_string().cyan(),
        aco.iterations.to_string().cyan(),
        aco.ant_count.to_string().cyan()
    );

    let store = config.open_store()?;
    let optimizer = LayoutOptimizer::new(store).with_grid(config.grid);

    let pb = ProgressBar::new(aco.iterations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} iterations {msg}")?
            .progress_chars("#>-"),
    );
    let report = optimizer.optimize_with(&beds, &aco, |progress| {
        if verbose {
            pb.set_message(format!("best {:.1}", -progress.overall_best));
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    let before = path_length(beds.iter().map(|b| &b.position));
    let after = path_length(report.beds.iter().map(|b| &b.position));

    println!();
    println!("{}", "Layout".bold());
    println!("  Total distance before: {}", format!("{:.1}", before).red());
    println!("  Total distance after:  {}", format!("{:.1}", after).green());
    println!("  Best tour length:      {}", format!("{:.1}", -report.best_fitness).cyan());
    if before > 0.0 {
        let gain = (before - after) / before * 100.0;
        println!("  Improvement:           {}", format!("{:.1}%", gain).green().bold());
    }
    if report.persistence_degraded() {
        println!(
            "  {} {} pheromone writes failed; trails were not fully persisted",
            "!".yellow(),
            report.degraded_writes
        );
    }

    let output = args.output.map(PathBuf::from).unwrap_or_else(|| default_output(input));
    super::save_beds(&output, &report.beds)?;
    println!();
    println!("{} Wrote {}", "✓".green(), output.display());

    Ok(())
}

/// `beds.json` → `beds.optimized.json` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "beds".to_string());
    input.with_file_name(format!("{}.optimized.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output(Path::new("/wards/icu.json")),
            PathBuf::from("/wards/icu.optimized.json")
        );
    }
}
