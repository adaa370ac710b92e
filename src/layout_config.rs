//! Layout config – the intermediate representation between composition and
//! PDF rendering. This is the "frozen" structure that encodes exactly what
//! goes on each page of an exported preview.

use serde::{Deserialize, Serialize};

use crate::page::PageId;
use crate::style::{FontFamily, TextAlign};

/// A complete preview layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "LayoutConfig::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// One entry per lookbook page, in document order.
    pub pages: Vec<PageLayout>,
}

/// One page of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_index: usize,
    /// Lookbook page this was composed from.
    pub page_id: PageId,
    pub boxes: Vec<LayoutBox>,
}

/// A positioned rectangle with optional content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Position relative to page top-left, in points.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    #[serde(default)]
    pub role: BoxRole,

    /// Visual styling
    #[serde(default)]
    pub background_color: Option<[f32; 4]>,
    #[serde(default)]
    pub border: Option<BorderStyle>,

    /// Content (mutually exclusive in practice)
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub image: Option<ImageContent>,

    /// Children (nested boxes)
    #[serde(default)]
    pub children: Vec<LayoutBox>,
}

/// What a box stands for on the page. Used by tests and by consumers of the
/// JSON form; the renderer draws every role the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxRole {
    #[default]
    Plain,
    Slot,
    SlotPlaceholder,
    TemplateNotFound,
    Overlay,
    Captions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderStyle {
    pub width: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// Pre-wrapped lines of text.
    pub lines: Vec<TextLine>,
    pub font_family: FontFamily,
    pub font_size: f32,
    pub bold: bool,
    pub color: [f32; 4],
    pub line_height: f32,
    pub text_align: TextAlign,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    /// X offset within the layout box (for alignment)
    pub x_offset: f32,
    /// Y offset from the top of the text content area
    pub y_offset: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    pub width: f32,
    pub height: f32,
}

impl LayoutConfig {
    /// Create an A4 portrait layout config with no pages.
    pub fn a4() -> Self {
        Self {
            title: Self::default_title(),
            // A4: 210mm × 297mm = 595.28 × 841.89 points
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            pages: Vec::new(),
        }
    }

    fn default_title() -> String {
        "Lookbook preview".to_string()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl PageLayout {
    /// Boxes of the given role, searched through the whole tree.
    pub fn boxes_with_role(&self, role: BoxRole) -> Vec<&LayoutBox> {
        fn walk<'a>(boxes: &'a [LayoutBox], role: BoxRole, out: &mut Vec<&'a LayoutBox>) {
            for b in boxes {
                if b.role == role {
                    out.push(b);
                }
                walk(&b.children, role, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.boxes, role, &mut out);
        out
    }
}

impl LayoutBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            role: BoxRole::Plain,
            background_color: None,
            border: None,
            text: None,
            image: None,
            children: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: BoxRole) -> Self {
        self.role = role;
        self
    }
}

impl TextContent {
    /// All line texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
