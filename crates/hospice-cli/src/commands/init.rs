//! Initialize a new Hospice project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    println!("{} Initializing Hospice project...", "→".blue());

    let data_dir = base_path.join(".hospice");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("  {} Created {}", "✓".green(), data_dir.display());

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let gitignore_path = data_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "*.db\n*.db-wal\n*.db-shm\n")?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} Hospice project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} hospice optimize beds.json", "1.".blue());
    println!("  {} hospice admit --hospital <id> --ward <ward> --beds beds.json", "2.".blue());
    println!("  {} hospice pheromones", "3.".blue());

    Ok(())
}
