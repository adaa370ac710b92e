//! Font loading and text measurement using `ttf-parser`.
//!
//! Without a loaded face, widths come from per-family average advance
//! heuristics that roughly match the PDF builtin fonts the renderer uses.

use std::collections::HashMap;

use crate::style::FontFamily;

/// A loaded font face.
#[derive(Clone)]
pub struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    pub bytes: Vec<u8>,
    pub units_per_em: f32,
}

impl FontData {
    /// Metrics-only stand-in with no glyph data.
    fn synthetic() -> Self {
        Self {
            bytes: Vec::new(),
            units_per_em: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: FontFamily,
    pub bold: bool,
}

/// Manages loaded fonts.
pub struct FontManager {
    fonts: HashMap<FontKey, FontData>,
    /// Used for any family/weight nobody loaded.
    fallback: FontData,
}

impl FontManager {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            fallback: FontData::synthetic(),
        }
    }

    /// Load a TTF/OTF font from bytes for one family and weight.
    pub fn load_font(&mut self, family: FontFamily, bold: bool, bytes: Vec<u8>) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("Failed to parse font: {e}"))?;

        let data = FontData {
            units_per_em: face.units_per_em() as f32,
            bytes,
        };

        log::debug!("loaded {} font (bold: {bold})", family.token());
        self.fonts.insert(FontKey { family, bold }, data);
        Ok(())
    }

    /// Get font data for a key. A bold request falls back to the regular
    /// face of the same family before the synthetic metrics.
    pub fn get(&self, key: &FontKey) -> &FontData {
        self.fonts
            .get(key)
            .or_else(|| {
                self.fonts.get(&FontKey {
                    family: key.family,
                    bold: false,
                })
            })
            .unwrap_or(&self.fallback)
    }

    /// Measure the width of a string at a given font size (in pt).
    /// If we have actual font bytes, we sum glyph advances. Otherwise we
    /// use an average character width heuristic for the family.
    pub fn measure_text_width(&self, text: &str, font_size: f32, family: FontFamily, bold: bool) -> f32 {
        let data = self.get(&FontKey { family, bold });

        if data.bytes.is_empty() {
            return text.chars().count() as f32 * font_size * average_advance(family, bold);
        }

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = font_size / data.units_per_em;
            text.chars()
                .map(|ch| match face.glyph_index(ch) {
                    Some(gid) => face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale,
                    // Missing glyph
                    None => font_size * 0.5,
                })
                .sum()
        } else {
            text.chars().count() as f32 * font_size * average_advance(family, bold)
        }
    }

    /// Line height in pt.
    pub fn line_height(&self, font_size: f32, line_height_factor: f32) -> f32 {
        font_size * line_height_factor
    }

    /// Whether any real face has been loaded.
    pub fn has_real_fonts(&self) -> bool {
        self.fonts.values().any(|d| !d.bytes.is_empty())
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Average advance as a fraction of the font size. Courier is fixed at 0.6
/// em; bold faces run about 10 % wider.
fn average_advance(family: FontFamily, bold: bool) -> f32 {
    let base = match family {
        FontFamily::SansSerif => 0.5,
        FontFamily::Serif => 0.47,
        FontFamily::Monospace => return 0.6,
        FontFamily::Cursive => 0.45,
    };
    if bold {
        base * 1.1
    } else {
        base
    }
}

/// Word-wrap text to fit within `max_width` points. Returns a vec of lines.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    family: FontFamily,
    bold: bool,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    // Split on existing newlines first
    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in &words {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            let w = fonts.measure_text_width(&candidate, font_size, family, bold);
            if w > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = word.to_string();
            } else {
                current_line = candidate;
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
