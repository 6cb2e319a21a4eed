//! Bubble kinds (the closed set of colors)

use serde::{Deserialize, Serialize};

/// Bubble color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleKind {
    Red,
    Blue,
    Green,
    /// Unlocked once the board has started descending
    Amber,
}

/// Kinds a fresh board is seeded from, and the fallback color pool
pub const START_KINDS: [BubbleKind; 3] = [BubbleKind::Blue, BubbleKind::Red, BubbleKind::Green];

impl BubbleKind {
    pub const ALL: [BubbleKind; 4] = [
        BubbleKind::Red,
        BubbleKind::Blue,
        BubbleKind::Green,
        BubbleKind::Amber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleKind::Red => "red",
            BubbleKind::Blue => "blue",
            BubbleKind::Green => "green",
            BubbleKind::Amber => "amber",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(BubbleKind::Red),
            "blue" => Some(BubbleKind::Blue),
            "green" => Some(BubbleKind::Green),
            "amber" => Some(BubbleKind::Amber),
            _ => None,
        }
    }
}
