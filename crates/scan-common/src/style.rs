//! Style configuration for confidence-contour rendering.
//!
//! Styles are supplied as four parallel per-sigma-level sequences (line
//! color, line pattern, fill color, fill pattern), either programmatically or
//! from a JSON style sheet. A validation step turns them into one fixed
//! [`ContourStyle`] per sigma level before any drawing happens.

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Default line width in pixels for every sigma level.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Color representation supporting multiple JSON spellings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hex string: "#RRGGBB" or "#RRGGBBAA"
    Hex(String),

    /// Named color
    Named(String),

    /// Explicit RGBA
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::Rgba { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Color::Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Resolve to an RGBA tuple. Unparseable hex strings and unknown names
    /// resolve to opaque black.
    ///
    /// Untagged deserialization maps every JSON string to `Hex`, so both
    /// string variants go through the same hex-then-named resolution.
    pub fn to_rgba(&self) -> (u8, u8, u8, u8) {
        match self {
            Color::Hex(s) | Color::Named(s) => parse_color_string(s),
            Color::Rgba { r, g, b, a } => (*r, *g, *b, *a),
        }
    }
}

fn parse_color_string(s: &str) -> (u8, u8, u8, u8) {
    let hex = s.trim_start_matches('#');
    let is_hex = matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        let byte =
            |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
        match hex.len() {
            6 => (byte(0..2), byte(2..4), byte(4..6), 255),
            _ => (byte(0..2), byte(2..4), byte(4..6), byte(6..8)),
        }
    } else {
        named_color(s)
    }
}

fn named_color(name: &str) -> (u8, u8, u8, u8) {
    match name.to_lowercase().as_str() {
        "transparent" => (0, 0, 0, 0),
        "black" => (0, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "red" => (255, 0, 0, 255),
        "green" => (0, 255, 0, 255),
        "blue" => (0, 0, 255, 255),
        "yellow" => (255, 255, 0, 255),
        "orange" => (255, 165, 0, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        _ => (0, 0, 0, 255),
    }
}

/// Line stroke pattern for contour outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

/// Fill pattern for contour interiors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPattern {
    #[default]
    Solid,
    /// Translucent fill so overlapping regions stay readable.
    Hatched,
    /// Outline only, no fill.
    None,
}

/// Resolved style for one sigma level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourStyle {
    pub line_color: Color,
    pub line_pattern: LinePattern,
    pub line_width: f32,
    pub fill_color: Color,
    pub fill_pattern: FillPattern,
}

/// Four parallel per-sigma-level style sequences, as supplied by a caller or
/// a JSON style sheet. Sequences may be shorter than the number of levels to
/// draw; [`ContourPalette::resolve`] pads them by replicating the last entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourPalette {
    pub line_colors: Vec<Color>,
    pub line_patterns: Vec<LinePattern>,
    pub fill_colors: Vec<Color>,
    pub fill_patterns: Vec<FillPattern>,

    /// Optional per-level line widths; defaults to 2.0 everywhere.
    #[serde(default)]
    pub line_widths: Option<Vec<f32>>,
}

impl ContourPalette {
    /// Build one fixed [`ContourStyle`] per sigma level.
    ///
    /// Every sequence must be non-empty. Sequences shorter than `n_levels`
    /// are padded by replicating their last entry, with a warning.
    pub fn resolve(&self, n_levels: usize) -> ScanResult<Vec<ContourStyle>> {
        if self.line_colors.is_empty()
            || self.line_patterns.is_empty()
            || self.fill_colors.is_empty()
            || self.fill_patterns.is_empty()
        {
            return Err(ScanError::Style(
                "palette sequences must have at least one entry".to_string(),
            ));
        }

        let shortest = self
            .line_colors
            .len()
            .min(self.line_patterns.len())
            .min(self.fill_colors.len())
            .min(self.fill_patterns.len());
        if shortest < n_levels {
            warn!(
                supplied = shortest,
                requested = n_levels,
                "not enough sigma contour styles defined, reusing the last entry"
            );
        }

        let widths = self.line_widths.clone().unwrap_or_default();
        let styles = (0..n_levels)
            .map(|i| ContourStyle {
                line_color: pick(&self.line_colors, i).clone(),
                line_pattern: *pick(&self.line_patterns, i),
                line_width: widths
                    .get(i)
                    .or_else(|| widths.last())
                    .copied()
                    .unwrap_or(DEFAULT_LINE_WIDTH),
                fill_color: pick(&self.fill_colors, i).clone(),
                fill_pattern: *pick(&self.fill_patterns, i),
            })
            .collect();
        Ok(styles)
    }
}

/// Entry `i`, or the last entry when the sequence is shorter.
fn pick<T>(seq: &[T], i: usize) -> &T {
    seq.get(i).unwrap_or_else(|| {
        seq.last()
            .expect("sequence checked non-empty before padding")
    })
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Root style sheet: named palettes loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default = "default_version")]
    pub version: String,

    /// Named palette definitions
    pub palettes: HashMap<String, ContourPalette>,
}

impl StyleSheet {
    /// Parse a style sheet from a JSON string.
    pub fn from_json(json: &str) -> ScanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a style sheet from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ScanError::StyleIo(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Get a palette by name.
    pub fn get(&self, name: &str) -> Option<&ContourPalette> {
        self.palettes.get(name)
    }
}

/// Built-in palette used when the caller never supplies one.
pub fn default_palette() -> ContourPalette {
    ContourPalette {
        line_colors: vec![
            Color::Hex("#08519c".to_string()),
            Color::Hex("#3182bd".to_string()),
            Color::Hex("#6baed6".to_string()),
            Color::Hex("#9ecae1".to_string()),
            Color::Hex("#c6dbef".to_string()),
        ],
        line_patterns: vec![LinePattern::Solid; 5],
        fill_colors: vec![
            Color::Hex("#3182bd".to_string()),
            Color::Hex("#6baed6".to_string()),
            Color::Hex("#9ecae1".to_string()),
            Color::Hex("#c6dbef".to_string()),
            Color::Hex("#eff3ff".to_string()),
        ],
        fill_patterns: vec![FillPattern::Solid; 5],
        line_widths: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(Color::Hex("#FF0000".into()).to_rgba(), (255, 0, 0, 255));
        assert_eq!(Color::Hex("00FF00".into()).to_rgba(), (0, 255, 0, 255));
        assert_eq!(Color::Hex("#0000FF80".into()).to_rgba(), (0, 0, 255, 128));
        // Malformed strings fall back to opaque black
        assert_eq!(Color::Hex("#F0".into()).to_rgba(), (0, 0, 0, 255));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::Named("red".into()).to_rgba(), (255, 0, 0, 255));
        assert_eq!(Color::Named("Grey".into()).to_rgba(), (128, 128, 128, 255));
        assert_eq!(Color::Named("transparent".into()).to_rgba(), (0, 0, 0, 0));
    }

    #[test]
    fn test_resolve_pads_short_sequences() {
        let palette = ContourPalette {
            line_colors: vec![Color::Named("red".into()), Color::Named("blue".into())],
            line_patterns: vec![LinePattern::Solid, LinePattern::Dashed],
            fill_colors: vec![Color::Named("red".into()), Color::Named("blue".into())],
            fill_patterns: vec![FillPattern::Solid, FillPattern::None],
            line_widths: Some(vec![1.0, 3.0]),
        };
        let styles = palette.resolve(5).unwrap();
        assert_eq!(styles.len(), 5);
        // Entries 2..4 replicate entry 1
        for style in &styles[2..] {
            assert_eq!(style.line_color, Color::Named("blue".into()));
            assert_eq!(style.line_pattern, LinePattern::Dashed);
            assert_eq!(style.fill_pattern, FillPattern::None);
            assert_eq!(style.line_width, 3.0);
        }
        assert_eq!(styles[0].line_width, 1.0);
    }

    #[test]
    fn test_resolve_defaults_line_width() {
        let palette = default_palette();
        let styles = palette.resolve(5).unwrap();
        assert!(styles.iter().all(|s| s.line_width == DEFAULT_LINE_WIDTH));
    }

    #[test]
    fn test_resolve_rejects_empty_sequence() {
        let palette = ContourPalette {
            line_colors: vec![],
            line_patterns: vec![LinePattern::Solid],
            fill_colors: vec![Color::Named("red".into())],
            fill_patterns: vec![FillPattern::Solid],
            line_widths: None,
        };
        assert!(palette.resolve(2).is_err());
    }

    #[test]
    fn test_style_sheet_from_json() {
        let json = r##"{
            "palettes": {
                "default": {
                    "line_colors": ["#08519c", {"r": 0, "g": 128, "b": 0, "a": 255}],
                    "line_patterns": ["solid", "dashed"],
                    "fill_colors": ["blue", "green"],
                    "fill_patterns": ["solid", "none"]
                }
            }
        }"##;
        let sheet = StyleSheet::from_json(json).unwrap();
        assert_eq!(sheet.version, "1.0");
        let palette = sheet.get("default").unwrap();
        assert_eq!(palette.line_patterns[1], LinePattern::Dashed);
        assert_eq!(palette.fill_patterns[1], FillPattern::None);
        assert_eq!(palette.line_colors[1].to_rgba(), (0, 128, 0, 255));
    }
}
