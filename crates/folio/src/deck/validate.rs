use std::collections::HashSet;

use super::{Deck, DeckError};

impl Deck {
    /// Check every reference in the deck.
    ///
    /// Fails on the first problem found, in this order: neighbor pointers and
    /// hub links (slides in id order), start, main sequence, satellites.
    pub fn validate(&self) -> Result<(), DeckError> {
        for (id, slide) in &self.slides {
            for (direction, target) in slide.neighbors.iter() {
                if !self.contains(target) {
                    return Err(DeckError::DanglingNeighbor {
                        node: id.clone(),
                        direction,
                        target: target.to_string(),
                    });
                }
            }
            if let Some(hub) = &slide.hub {
                if !self.contains(hub) {
                    return Err(DeckError::DanglingHub {
                        node: id.clone(),
                        target: hub.clone(),
                    });
                }
            }
        }

        if !self.slides.contains_key(&self.start) {
            return Err(DeckError::UnknownStart(self.start.clone()));
        }

        let mut seen = HashSet::new();
        for id in &self.main_sequence {
            if !self.slides.contains_key(id) {
                return Err(DeckError::UnknownMainSequenceEntry(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(DeckError::DuplicateMainSequenceEntry(id.clone()));
            }
        }

        let mut hubs = HashSet::new();
        let mut satellite_ids = HashSet::new();
        for group in &self.satellites {
            if !self.slides.contains_key(&group.hub) {
                return Err(DeckError::UnknownSatelliteHub(group.hub.clone()));
            }
            if !hubs.insert(group.hub.as_str()) {
                return Err(DeckError::DuplicateSatelliteHub(group.hub.clone()));
            }
            if group.items.is_empty() {
                return Err(DeckError::EmptySatelliteGroup(group.hub.clone()));
            }
            for item in &group.items {
                if self.slides.contains_key(&item.id) || !satellite_ids.insert(item.id.as_str()) {
                    return Err(DeckError::DuplicateId(item.id.clone()));
                }
            }
        }

        Ok(())
    }
}
