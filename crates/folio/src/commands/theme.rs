use anyhow::Result;
use colored::Colorize;
use folio::config::Config;
use folio::theme::{Appearance, FileStore, ThemeMode};

use crate::cli::ThemeArg;

pub fn run(mode: Option<ThemeArg>) -> Result<()> {
    let config = Config::load_or_default();
    let mut controller = super::theme_controller(&config);

    if let Some(mode) = mode {
        let mode = match mode {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
            ThemeArg::System => ThemeMode::System,
        };
        controller.set_mode(mode);
        println!("{} theme to {mode}", "Set".green().bold());
    }

    let appearance = match controller.appearance() {
        Appearance::Light => "light",
        Appearance::Dark => "dark",
    };
    let palette = controller.palette();
    println!("{} {}", "Mode:".bold(), controller.mode());
    println!("{} {appearance}", "Showing:".bold());
    println!(
        "{} {}",
        "Accent:".bold(),
        palette
            .accent
            .to_string()
            .truecolor(palette.accent.r, palette.accent.g, palette.accent.b)
    );
    if controller.is_persistent() {
        if let Ok(path) = FileStore::default_location() {
            println!("{} {}", "Saved in:".bold(), path.display());
        }
    } else {
        println!("{}", "Preference is kept for this session only.".yellow());
    }
    Ok(())
}
