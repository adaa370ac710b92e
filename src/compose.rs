//! Compose – turns a [`PreviewView`] into a [`LayoutConfig`], one PDF page
//! per lookbook page.
//!
//! Page anatomy, top to bottom inside the margins: the template area (image
//! slots from Taffy, or a "template not found" panel), the cover overlay
//! drawn over that area, and a caption strip listing linked products when
//! there are any.

use crate::fonts::{wrap_text, FontManager};
use crate::layout::{slot_rects, SlotRect};
use crate::layout_config::*;
use crate::pipeline::PreviewConfig;
use crate::products::Product;
use crate::render::is_data_uri;
use crate::style::{FontFamily, TextAlign};
use crate::view::{OverlayView, PageView, PreviewView, SlotView, TemplateView};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.25;
/// Overlay heading size relative to the configured overlay font size.
pub const HEADING_SCALE: f32 = 1.5;

const LABEL_FONT_SIZE: f32 = 10.0;
const CAPTION_FONT_SIZE: f32 = 9.0;
const CAPTION_PADDING: f32 = 6.0;
const LABEL_PADDING: f32 = 8.0;

const PLACEHOLDER_FILL: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
const CAPTION_FILL: [f32; 4] = [0.97, 0.97, 0.97, 1.0];
const FRAME_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
const LABEL_COLOR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
const CAPTION_COLOR: [f32; 4] = [0.15, 0.15, 0.15, 1.0];
const MISSING_TEMPLATE_COLOR: [f32; 4] = [0.75, 0.1, 0.1, 1.0];

/// Compose every preview page into a frozen layout.
pub fn compose_preview(preview: &PreviewView, config: &PreviewConfig, fonts: &FontManager) -> LayoutConfig {
    let page_w = config.effective_width();
    let page_h = config.effective_height();

    let pages = preview
        .pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| PageLayout {
            page_index,
            page_id: page.page_id,
            boxes: compose_page(page, config, page_w, page_h, fonts),
        })
        .collect();

    LayoutConfig {
        title: config
            .title
            .clone()
            .unwrap_or_else(|| preview.title.to_string()),
        page_width_pt: page_w,
        page_height_pt: page_h,
        pages,
    }
}

fn compose_page(
    page: &PageView,
    config: &PreviewConfig,
    page_w: f32,
    page_h: f32,
    fonts: &FontManager,
) -> Vec<LayoutBox> {
    let margin = config.page_margin;
    let content_w = (page_w - 2.0 * margin).max(0.0);
    let caption_h = if page.products.is_empty() {
        0.0
    } else {
        config.caption_height
    };
    let content_h = (page_h - 2.0 * margin - caption_h).max(0.0);
    let area = SlotRect {
        x: margin,
        y: margin,
        width: content_w,
        height: content_h,
    };

    let mut boxes = Vec::new();

    match page.template {
        TemplateView::Resolved(template) => {
            let rects = slot_rects(template.kind, content_w, content_h, config.slot_gutter);
            for (slot, rect) in page.slots.iter().zip(rects) {
                let rect = SlotRect {
                    x: area.x + rect.x,
                    y: area.y + rect.y,
                    ..rect
                };
                boxes.push(slot_box(slot, rect, fonts));
            }
        }
        TemplateView::NotFound { template_id } => {
            boxes.push(missing_template_box(template_id, area, fonts));
        }
    }

    if let Some(overlay) = &page.overlay {
        if let Some(b) = overlay_box(overlay, area, fonts) {
            boxes.push(b);
        }
    }

    if !page.products.is_empty() {
        let strip = SlotRect {
            x: margin,
            y: page_h - margin - caption_h,
            width: content_w,
            height: caption_h,
        };
        boxes.push(caption_box(&page.products, strip, fonts));
    }

    boxes
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

fn slot_box(slot: &SlotView, rect: SlotRect, fonts: &FontManager) -> LayoutBox {
    let mut b = LayoutBox::new(rect.x, rect.y, rect.width, rect.height);
    b.border = Some(frame());

    match slot.image {
        Some(src) if is_data_uri(src) => {
            b.role = BoxRole::Slot;
            b.image = Some(ImageContent {
                src: src.to_string(),
                width: rect.width,
                height: rect.height,
            });
        }
        reference => {
            b.role = BoxRole::SlotPlaceholder;
            b.background_color = Some(PLACEHOLDER_FILL);
            let label = match reference {
                Some(r) => r.to_string(),
                None => format!("Image {}", slot.index + 1),
            };
            b.text = Some(centered_label(&label, LABEL_COLOR, rect, fonts));
        }
    }
    b
}

fn missing_template_box(template_id: &str, area: SlotRect, fonts: &FontManager) -> LayoutBox {
    let mut b = LayoutBox::new(area.x, area.y, area.width, area.height).with_role(BoxRole::TemplateNotFound);
    b.background_color = Some(PLACEHOLDER_FILL);
    b.border = Some(BorderStyle {
        width: 1.0,
        color: MISSING_TEMPLATE_COLOR,
    });
    let label = format!("Template not found: {template_id}");
    b.text = Some(centered_label(&label, MISSING_TEMPLATE_COLOR, area, fonts));
    b
}

fn frame() -> BorderStyle {
    BorderStyle {
        width: 0.5,
        color: FRAME_COLOR,
    }
}

/// A single-line label centred both ways in `rect`, shortened to fit.
fn centered_label(label: &str, color: [f32; 4], rect: SlotRect, fonts: &FontManager) -> TextContent {
    let family = FontFamily::SansSerif;
    let available = (rect.width - 2.0 * LABEL_PADDING).max(0.0);
    let text = fit_line(label, LABEL_FONT_SIZE, family, false, available, fonts);
    let line_height = fonts.line_height(LABEL_FONT_SIZE, LINE_HEIGHT_FACTOR);
    let top = ((rect.height - line_height) / 2.0).max(0.0);
    TextContent {
        lines: aligned_lines(vec![text], LABEL_FONT_SIZE, family, false, TextAlign::Center, rect.width, top, fonts),
        font_family: family,
        font_size: LABEL_FONT_SIZE,
        bold: false,
        color,
        line_height,
        text_align: TextAlign::Center,
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// The overlay box: heading and body stacked, horizontally from the left
/// edge percentage, vertically centred on the top percentage. Height grows
/// with the text and is not clamped to the area.
fn overlay_box(overlay: &OverlayView, area: SlotRect, fonts: &FontManager) -> Option<LayoutBox> {
    let style = overlay.style;
    let x = area.x + style.position_left() / 100.0 * area.width;
    let width = style.width() / 100.0 * area.width;
    let family = style.font_family();
    let bold = style.font_weight().is_bold();
    let align = style.text_align();
    let color = style.color().to_unit_rgba();
    let body_size = f32::from(style.font_size().px());

    let mut blocks = Vec::new();
    let mut height = 0.0;
    for (text, size) in [(overlay.heading, body_size * HEADING_SCALE), (overlay.body, body_size)] {
        if text.trim().is_empty() {
            continue;
        }
        let wrapped = wrap_text(text.trim(), size, family, bold, width, fonts);
        let line_height = fonts.line_height(size, LINE_HEIGHT_FACTOR);
        let block_h = wrapped.len() as f32 * line_height;

        let mut block = LayoutBox::new(x, height, width, block_h);
        block.text = Some(TextContent {
            lines: aligned_lines(wrapped, size, family, bold, align, width, 0.0, fonts),
            font_family: family,
            font_size: size,
            bold,
            color,
            line_height,
            text_align: align,
        });
        blocks.push(block);
        height += block_h;
    }

    if blocks.is_empty() {
        return None;
    }

    let center_y = area.y + style.position_top() / 100.0 * area.height;
    let y = center_y - height / 2.0;
    for block in &mut blocks {
        // `y` held the offset within the overlay until now.
        block.y += y;
    }

    let mut b = LayoutBox::new(x, y, width, height).with_role(BoxRole::Overlay);
    b.children = blocks;
    Some(b)
}

// ---------------------------------------------------------------------------
// Captions
// ---------------------------------------------------------------------------

/// "Name · CODE · 129.00"
pub fn caption_line(product: &Product) -> String {
    let mut parts = vec![product.name.clone()];
    if !product.identifier_code.is_empty() {
        parts.push(product.identifier_code.clone());
    }
    parts.push(format!("{:.2}", product.unit_price));
    parts.join(" \u{00B7} ")
}

fn caption_box(products: &[&Product], strip: SlotRect, fonts: &FontManager) -> LayoutBox {
    let family = FontFamily::SansSerif;
    let line_height = fonts.line_height(CAPTION_FONT_SIZE, LINE_HEIGHT_FACTOR);
    let available_w = (strip.width - 2.0 * CAPTION_PADDING).max(0.0);
    let capacity = ((strip.height - 2.0 * CAPTION_PADDING) / line_height).floor().max(0.0) as usize;

    let mut lines: Vec<String> = products.iter().map(|p| caption_line(p)).collect();
    if lines.len() > capacity && capacity > 0 {
        let hidden = lines.len() - (capacity - 1);
        lines.truncate(capacity - 1);
        lines.push(format!("+{hidden} more"));
    } else {
        lines.truncate(capacity);
    }
    let lines = lines
        .iter()
        .map(|l| fit_line(l, CAPTION_FONT_SIZE, family, false, available_w, fonts))
        .collect();

    let mut b = LayoutBox::new(strip.x, strip.y, strip.width, strip.height).with_role(BoxRole::Captions);
    b.background_color = Some(CAPTION_FILL);
    let mut text_lines = aligned_lines(
        lines,
        CAPTION_FONT_SIZE,
        family,
        false,
        TextAlign::Left,
        available_w,
        CAPTION_PADDING,
        fonts,
    );
    for line in &mut text_lines {
        line.x_offset += CAPTION_PADDING;
    }
    b.text = Some(TextContent {
        lines: text_lines,
        font_family: family,
        font_size: CAPTION_FONT_SIZE,
        bold: false,
        color: CAPTION_COLOR,
        line_height,
        text_align: TextAlign::Left,
    });
    b
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn aligned_lines(
    lines: Vec<String>,
    font_size: f32,
    family: FontFamily,
    bold: bool,
    align: TextAlign,
    box_width: f32,
    top: f32,
    fonts: &FontManager,
) -> Vec<TextLine> {
    let line_height = fonts.line_height(font_size, LINE_HEIGHT_FACTOR);
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let w = fonts.measure_text_width(&text, font_size, family, bold);
            let x_offset = match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((box_width - w) / 2.0).max(0.0),
                TextAlign::Right => (box_width - w).max(0.0),
            };
            TextLine {
                text,
                x_offset,
                y_offset: top + i as f32 * line_height,
            }
        })
        .collect()
}

/// Shorten `text` with a trailing "..." until it fits `max_width`.
fn fit_line(text: &str, font_size: f32, family: FontFamily, bold: bool, max_width: f32, fonts: &FontManager) -> String {
    if fonts.measure_text_width(text, font_size, family, bold) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}...", chars.iter().collect::<String>().trim_end());
        if fonts.measure_text_width(&candidate, font_size, family, bold) <= max_width {
            return candidate;
        }
    }
    String::new()
}
