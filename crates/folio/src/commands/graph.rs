use std::path::PathBuf;

use anyhow::Result;
use folio::config::Config;
use folio::graph::{LayoutStrategy, build_graph};

use crate::cli::Strategy;

pub fn run(deck: Option<PathBuf>, strategy: Option<Strategy>, json: bool, pretty: bool) -> Result<()> {
    let config = Config::load_or_default();
    let deck = super::load_deck(deck, &config)?;
    let strategy = match strategy {
        Some(Strategy::Grid) => LayoutStrategy::Grid,
        Some(Strategy::Traversal) => LayoutStrategy::Traversal,
        None => config.strategy(),
    };

    let graph = build_graph(&deck, &config.layout_config(), strategy)?;
    if json {
        println!("{}", graph.to_json(pretty)?);
    } else {
        print!("{}", graph.summary());
    }
    Ok(())
}
