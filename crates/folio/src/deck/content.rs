use serde::{Deserialize, Serialize};

/// A typed content block of a slide body.
///
/// Slide bodies are plain data so the graph and navigation code never depend
/// on how a renderer draws them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        text: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Paragraph {
        text: String,
    },
    BadgeList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        items: Vec<String>,
    },
    StatCards {
        cards: Vec<StatCard>,
    },
    Timeline {
        entries: Vec<TimelineEntry>,
    },
    /// Skill levels drawn as bars, `level` in percent.
    Meters {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        items: Vec<Meter>,
    },
    Contacts {
        items: Vec<Contact>,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
}

fn default_heading_level() -> u8 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub period: String,
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub label: String,
    pub value: String,
}

impl Block {
    /// Short name of the block type, as written in deck files.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::BadgeList { .. } => "badge_list",
            Block::StatCards { .. } => "stat_cards",
            Block::Timeline { .. } => "timeline",
            Block::Meters { .. } => "meters",
            Block::Contacts { .. } => "contacts",
            Block::Image { .. } => "image",
        }
    }

    /// Rough count of text lines the block occupies, used to flag dense slides.
    pub fn weight(&self) -> usize {
        match self {
            Block::Heading { .. } | Block::Paragraph { .. } | Block::Image { .. } => 1,
            Block::BadgeList { items, .. } => 1 + items.len().div_ceil(4),
            Block::StatCards { cards } => cards.len(),
            Block::Timeline { entries } => entries.len() * 2,
            Block::Meters { items, .. } => 1 + items.len(),
            Block::Contacts { items } => items.len(),
        }
    }
}
