//! The portfolio deck shipped with the binary.

use super::{Deck, DeckError};

pub const PORTFOLIO_YAML: &str = include_str!("../../decks/portfolio.yaml");

/// Parse the embedded portfolio deck.
pub fn portfolio() -> Result<Deck, DeckError> {
    Deck::from_yaml(PORTFOLIO_YAML)
}
