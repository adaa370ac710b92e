//! Pipeline – ties together the preview view, composition and rendering
//! into a single function call.

use crate::compose::compose_preview;
use crate::document::LookbookDocument;
use crate::fonts::FontManager;
use crate::layout_config::LayoutConfig;
use crate::products::Product;
use crate::render::render_pdf;
use crate::view::PreviewView;

/// Default page margin in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;
/// Default gutter between image slots in points.
pub const SLOT_GUTTER_PT: f32 = 12.0;
/// Default height of the product caption strip in points.
pub const CAPTION_HEIGHT_PT: f32 = 72.0;

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageOrientation {
    /// Portrait mode: height > width (default).
    #[default]
    Portrait,
    /// Landscape mode: width > height.
    Landscape,
}

/// Configuration for preview export.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// PDF metadata title; the lookbook title when `None`.
    pub title: Option<String>,
    /// Page width in points (default: A4 = 595.28).
    pub page_width: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height: f32,
    pub page_margin: f32,
    pub slot_gutter: f32,
    /// Reserved at the page foot only on pages with linked products.
    pub caption_height: f32,
    /// Page orientation; swaps effective width/height when `Landscape`.
    pub orientation: PageOrientation,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: None,
            page_width: 595.28,
            page_height: 841.89,
            page_margin: PAGE_MARGIN_PT,
            slot_gutter: SLOT_GUTTER_PT,
            caption_height: CAPTION_HEIGHT_PT,
            orientation: PageOrientation::Portrait,
        }
    }
}

impl PreviewConfig {
    /// Effective page width after applying orientation.
    pub fn effective_width(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_width,
            PageOrientation::Landscape => self.page_height,
        }
    }

    /// Effective page height after applying orientation.
    pub fn effective_height(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_height,
            PageOrientation::Landscape => self.page_width,
        }
    }

    /// Create an A4 landscape config.
    pub fn a4_landscape() -> Self {
        Self {
            orientation: PageOrientation::Landscape,
            ..Self::default()
        }
    }
}

/// Full pipeline: lookbook → PDF bytes, using heuristic font metrics.
///
/// Returns `(pdf_bytes, layout_config)`.
pub fn generate_preview_pdf(
    document: &LookbookDocument,
    catalog: &[Product],
    config: &PreviewConfig,
) -> Result<(Vec<u8>, LayoutConfig), String> {
    generate_preview_pdf_with_fonts(document, catalog, config, &FontManager::default())
}

/// Same as [`generate_preview_pdf`] with caller-supplied font metrics.
pub fn generate_preview_pdf_with_fonts(
    document: &LookbookDocument,
    catalog: &[Product],
    config: &PreviewConfig,
    fonts: &FontManager,
) -> Result<(Vec<u8>, LayoutConfig), String> {
    // 1. Resolve the read-only preview
    let preview = PreviewView::build(document, catalog);

    // 2. Compose pages
    let layout_config = compose_preview(&preview, config, fonts);

    // 3. Render PDF
    let pdf_bytes = render_pdf(&layout_config)?;

    Ok((pdf_bytes, layout_config))
}

/// Generate only the layout config (no PDF rendering) – useful for testing.
pub fn compute_layout_config(
    document: &LookbookDocument,
    catalog: &[Product],
    config: &PreviewConfig,
) -> LayoutConfig {
    let preview = PreviewView::build(document, catalog);
    compose_preview(&preview, config, &FontManager::default())
}
