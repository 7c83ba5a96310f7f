pub mod check;
pub mod completion;
pub mod config;
pub mod graph;
pub mod theme;
pub mod walk;

use std::path::PathBuf;

use anyhow::{Context, Result};
use folio::config::Config;
use folio::deck::{Deck, builtin};
use folio::theme::{FileStore, ThemeController, system_prefers_dark};

/// Deck named on the command line, else the configured one, else the built-in portfolio.
pub fn load_deck(path: Option<PathBuf>, config: &Config) -> Result<Deck> {
    let path = path.or_else(|| config.deck().map(PathBuf::from));
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Deck::load(&path).with_context(|| format!("Could not load deck {}", path.display()))
        }
        None => {
            log::debug!("using built-in portfolio deck");
            Ok(builtin::portfolio()?)
        }
    }
}

/// Theme state backed by the preferences file, or memory if there is none.
pub fn theme_controller(config: &Config) -> ThemeController {
    let system_dark = system_prefers_dark();
    let controller = match FileStore::open_default() {
        Ok(store) => ThemeController::new(Box::new(store), system_dark),
        Err(e) => {
            log::warn!("theme preference will not be saved: {e}");
            ThemeController::in_memory(system_dark)
        }
    };
    match config.theme() {
        Some(mode) => controller.with_default(mode),
        None => controller,
    }
}
