use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use folio::config::Config;
use folio::deck::Deck;
use folio::graph::build_graph;

/// Content weight above which a slide without its own fit padding is flagged.
const DENSE_WEIGHT: usize = 10;

pub fn run(deck: Option<PathBuf>) -> Result<()> {
    let config = Config::load_or_default();
    let deck = super::load_deck(deck, &config)?;
    let graph = build_graph(&deck, &config.layout_config(), config.strategy())?;

    println!(
        "{} {} nodes, {} edges, {} on the main sequence",
        "✓".green().bold(),
        graph.nodes.len(),
        graph.edges.len(),
        deck.main_sequence.len()
    );

    let mut warnings = 0;
    for id in unreachable(&deck) {
        println!("{} '{id}' cannot be reached from '{}'", "warning:".yellow().bold(), deck.start);
        warnings += 1;
    }
    for (id, weight) in dense(&deck) {
        println!(
            "{} '{id}' is dense (weight {weight}); consider setting fit_padding",
            "hint:".cyan().bold()
        );
    }
    if warnings == 0 {
        println!("{} every node is reachable from '{}'", "✓".green().bold(), deck.start);
    }
    Ok(())
}

/// Nodes that no chain of neighbor or hub links leads to from the start.
///
/// Satellites count as reachable when their hub is.
fn unreachable(deck: &Deck) -> Vec<&str> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([deck.start.as_str()]);

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        for group in deck.satellites_of(id) {
            queue.extend(group.items.iter().map(|item| item.id.as_str()));
        }
        if let Some(slide) = deck.slide(id) {
            queue.extend(slide.neighbors.iter().map(|(_, target)| target));
            queue.extend(slide.hub.as_deref());
        } else if let Some((group, _)) = deck.satellite(id) {
            queue.push_back(group.hub.as_str());
        }
    }

    let slides = deck.slides.keys().map(String::as_str);
    let satellites = deck.satellites.iter().flat_map(|g| g.items.iter().map(|i| i.id.as_str()));
    slides.chain(satellites).filter(|id| !seen.contains(id)).collect()
}

fn dense(deck: &Deck) -> Vec<(&str, usize)> {
    deck.slides
        .iter()
        .filter(|(_, slide)| slide.fit_padding.is_none())
        .map(|(id, slide)| (id.as_str(), slide.content.iter().map(|b| b.weight()).sum()))
        .filter(|(_, weight)| *weight > DENSE_WEIGHT)
        .collect()
}
