//! Per-kind presentation data for an external renderer

use crate::sim::BubbleKind;

/// How a bubble kind is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fill: &'static str,
    pub outline: &'static str,
    /// Shape drawn on top so kinds differ by more than color
    pub symbol: char,
}

impl Palette {
    pub fn for_kind(kind: BubbleKind) -> Self {
        match kind {
            BubbleKind::Red => Palette {
                fill: "#ef4444",
                outline: "#991b1b",
                symbol: '▲',
            },
            BubbleKind::Blue => Palette {
                fill: "#3b82f6",
                outline: "#1e3a8a",
                symbol: '●',
            },
            BubbleKind::Green => Palette {
                fill: "#22c55e",
                outline: "#065f46",
                symbol: '■',
            },
            BubbleKind::Amber => Palette {
                fill: "#f59e0b",
                outline: "#92400e",
                symbol: '✳',
            },
        }
    }

    /// Text color that reads on top of this bubble's fill
    pub fn text_color(&self) -> &'static str {
        text_color_for(self.fill)
    }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into 0-1 channels
fn parse_hex(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let n = u32::from_str_radix(&expanded, 16).ok()?;
    Some([
        ((n >> 16) & 0xff) as f32 / 255.0,
        ((n >> 8) & 0xff) as f32 / 255.0,
        (n & 0xff) as f32 / 255.0,
    ])
}

/// Black on light backgrounds, white on dark ones (and on anything unparsable)
pub fn text_color_for(bg_hex: &str) -> &'static str {
    let Some([r, g, b]) = parse_hex(bg_hex) else {
        return "#fff";
    };
    let luminance = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    if luminance > 0.6 { "#000" } else { "#fff" }
}
