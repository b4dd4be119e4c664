//! Show what the pheromone store holds.

use anyhow::Result;
use colored::Colorize;
use hospice::prelude::*;

use crate::config::Config;

pub fn run(hospital: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = config.open_store()?;

    println!("{}", "Pheromone Store".bold());
    println!("  Backend:          {}", store.name().cyan());
    println!("  Directed trails:  {}", store.trail_count()?.to_string().cyan());
    println!("  Admission levels: {}", store.scalar_count()?.to_string().cyan());

    if let Some(hospital) = hospital {
        let hospital = HospitalId::from(hospital);
        let mut levels: Vec<(BedId, f64)> = store.scalars_for(&hospital)?.into_iter().collect();
        levels.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        println!();
        println!("{} {}", "Beds in".bold(), hospital.to_string().bold());
        if levels.is_empty() {
            println!("  {} nothing reinforced yet", "•".yellow());
        }
        for (bed, level) in levels {
            println!("  {:<16} {:.3}", bed.to_string(), level);
        }
    }
    Ok(())
}
