//! Typography domains for the cover overlay.
//!
//! Every attribute is drawn from a small closed set. Parsing a value outside
//! its set is a usage error ([`ComposeError::InvalidStyle`]); nothing here
//! coerces silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

// ---------------------------------------------------------------------------
// Font family
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Cursive,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::SansSerif,
        FontFamily::Serif,
        FontFamily::Monospace,
        FontFamily::Cursive,
    ];

    pub fn token(self) -> &'static str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Cursive => "cursive",
        }
    }
}

impl FromStr for FontFamily {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.token() == s)
            .ok_or_else(|| ComposeError::InvalidStyle(format!("unknown font family {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Font size
// ---------------------------------------------------------------------------

/// Pixel sizes offered by the overlay editor.
pub const FONT_SIZES_PX: [u16; 6] = [12, 14, 16, 18, 20, 24];

/// A font size restricted to [`FONT_SIZES_PX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontSize(u16);

impl FontSize {
    pub fn new(px: u16) -> Result<Self, ComposeError> {
        if FONT_SIZES_PX.contains(&px) {
            Ok(Self(px))
        } else {
            Err(ComposeError::InvalidStyle(format!(
                "font size {px}px is not one of {FONT_SIZES_PX:?}"
            )))
        }
    }

    pub fn px(self) -> u16 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(16)
    }
}

impl TryFrom<u16> for FontSize {
    type Error = ComposeError;

    fn try_from(px: u16) -> Result<Self, Self::Error> {
        Self::new(px)
    }
}

impl From<FontSize> for u16 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

// ---------------------------------------------------------------------------
// Font weight
// ---------------------------------------------------------------------------

/// Font weight, encoded on the wire as its numeric CSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 4] = [
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::Bold,
    ];

    pub fn token(self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
        }
    }

    pub fn from_token(token: u16) -> Result<Self, ComposeError> {
        Self::ALL
            .into_iter()
            .find(|w| w.token() == token)
            .ok_or_else(|| ComposeError::InvalidStyle(format!("unknown font weight {token}")))
    }

    /// PDF builtin fonts only come in regular and bold cuts.
    pub fn is_bold(self) -> bool {
        self.token() >= 600
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = ComposeError;

    fn try_from(token: u16) -> Result<Self, Self::Error> {
        Self::from_token(token)
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.token()
    }
}

// ---------------------------------------------------------------------------
// Text alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn token(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            other => Err(ComposeError::InvalidStyle(format!(
                "unknown text alignment {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// 8-bit RGB colour, serialised as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ComposeError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ComposeError::InvalidStyle(format!("invalid colour {hex:?}"));
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => Ok(Self {
                r: channel(&digits[0..1].repeat(2))?,
                g: channel(&digits[1..2].repeat(2))?,
                b: channel(&digits[2..3].repeat(2))?,
            }),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// RGBA in the 0.0 – 1.0 range used by the layout config.
    pub fn to_unit_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ComposeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}
