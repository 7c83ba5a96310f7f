use anyhow::Result;
use colored::Colorize;
use folio::config::{Config, KEYS};

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "(not created yet, showing defaults)".dimmed());
    }
    println!();

    let layout = config.layout_config();
    println!("{}", "Effective settings".bold());
    println!(
        "  defaults.theme     {}",
        config.theme().map(|m| m.as_str()).unwrap_or("system")
    );
    println!("  defaults.progress  {}", config.progress_policy().as_str());
    println!("  defaults.strategy  {}", config.strategy().as_str());
    println!("  defaults.splash    {}", config.splash_enabled());
    println!(
        "  defaults.deck      {}",
        config
            .deck()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in portfolio)".to_string())
    );
    println!("  layout.unit_width  {}", layout.unit_width);
    println!("  layout.unit_height {}", layout.unit_height);
    println!("  layout.gap         {}", layout.gap);
    println!("  layout.satellite_size {}", layout.satellite_size);
    println!("  layout.orbit_margin   {}", layout.orbit_margin);
    println!("  layout.phase       {}°", layout.phase.to_degrees());
    println!();
    println!("{} {}", "Keys:".dimmed(), KEYS.join(", ").dimmed());
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Set".green().bold());
    log::debug!("wrote {}", path.display());
    Ok(())
}
