//! Graph-structured slide decks with directional navigation.
//!
//! A [`deck::Deck`] declares slides, their neighbor pointers and grid cells.
//! [`graph::build_graph`] turns it into positioned nodes and edges, and a
//! [`nav::Navigator`] moves focus around the result while tracking progress
//! along the deck's main sequence.

pub mod config;
pub mod deck;
pub mod graph;
pub mod layout;
pub mod nav;
pub mod splash;
pub mod theme;
