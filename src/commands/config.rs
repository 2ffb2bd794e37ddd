use anyhow::Result;
use colored::Colorize;
use ebookai::config::load_config;
use std::path::Path;
use tracing::info;

/// Execute the config show command
pub fn show(path: &Path) -> Result<()> {
    let cfg = load_config(path)?;

    println!("{}", "Effective Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = load_config(path)?;
    let table = cfg.pricing_table();

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  Default target: {} / {}",
        cfg.generation.default_provider, cfg.generation.default_model
    );
    println!(
        "  Poll policy: {}ms → {}ms, timeout {}s",
        cfg.jobs.poll_initial_ms, cfg.jobs.poll_max_ms, cfg.jobs.poll_timeout_secs
    );

    println!("  Priced providers:");
    let mut providers: Vec<_> = table.providers().collect();
    providers.sort_by(|a, b| a.0.cmp(b.0));
    for (name, pricing) in providers {
        let image = if pricing.image.is_some() {
            "with image model".to_string()
        } else {
            "text only".to_string()
        };
        println!("    {} ({} models, {})", name.cyan(), pricing.models.len(), image);
    }

    Ok(())
}
