//! Slot layout – uses Taffy to turn a template's grid arrangement into
//! positioned image slots.
//!
//! The result is expressed in the units of the container passed in; the
//! percentage form ([`slot_layout`]) is what views carry, and the PDF
//! composer scales it to points.

use serde::{Deserialize, Serialize};
use taffy::prelude::*;

use crate::templates::{Arrangement, TemplateKind};

/// Gutter between slots, as a percentage of the container.
pub const SLOT_GAP_PCT: f32 = 2.0;

/// A positioned slot rectangle, origin at the container's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SlotRect {
    /// Scale a percentage rect into a concrete container.
    pub fn scaled(&self, origin_x: f32, origin_y: f32, width: f32, height: f32) -> SlotRect {
        SlotRect {
            x: origin_x + self.x / 100.0 * width,
            y: origin_y + self.y / 100.0 * height,
            width: self.width / 100.0 * width,
            height: self.height / 100.0 * height,
        }
    }
}

/// Slot rectangles for a template, in percent of a 100 × 100 container.
pub fn slot_layout(kind: TemplateKind) -> Vec<SlotRect> {
    slot_rects(kind, 100.0, 100.0, SLOT_GAP_PCT)
}

/// Slot rectangles for a template in a `width` × `height` container with
/// `gap` between cells, in row-major order.
pub fn slot_rects(kind: TemplateKind, width: f32, height: f32, gap: f32) -> Vec<SlotRect> {
    compute_grid(kind.arrangement(), width, height, gap).unwrap_or_else(|e| {
        log::error!("slot layout failed for {kind:?}: {e}");
        Vec::new()
    })
}

fn compute_grid(
    arrangement: Arrangement,
    width: f32,
    height: f32,
    gap: f32,
) -> Result<Vec<SlotRect>, taffy::TaffyError> {
    let mut taffy: TaffyTree<()> = TaffyTree::new();
    taffy.disable_rounding();

    let cells = (0..arrangement.slot_count())
        .map(|_| taffy.new_leaf(Style::default()))
        .collect::<Result<Vec<NodeId>, _>>()?;

    let grid_style = Style {
        display: taffy::Display::Grid,
        grid_template_columns: vec![taffy::TrackSizingFunction::from_flex(1.0); arrangement.columns],
        grid_template_rows: vec![taffy::TrackSizingFunction::from_flex(1.0); arrangement.rows],
        size: Size {
            width: taffy::Dimension::Length(width),
            height: taffy::Dimension::Length(height),
        },
        gap: Size {
            width: LengthPercentage::Length(gap),
            height: LengthPercentage::Length(gap),
        },
        ..Default::default()
    };
    let root = taffy.new_with_children(grid_style, &cells)?;

    taffy.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        },
    )?;

    cells
        .iter()
        .map(|&cell| -> Result<SlotRect, taffy::TaffyError> {
            let layout = taffy.layout(cell)?;
            Ok(SlotRect {
                x: layout.location.x,
                y: layout.location.y,
                width: layout.size.width,
                height: layout.size.height,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::CATALOG;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn slot_count_matches_catalog() {
        for template in CATALOG {
            assert_eq!(slot_layout(template.kind).len(), template.slot_count());
        }
    }

    #[test]
    fn single_fills_container() {
        let slots = slot_layout(TemplateKind::Single);
        assert_eq!(slots.len(), 1);
        let s = slots[0];
        assert!(approx(s.x, 0.0) && approx(s.y, 0.0));
        assert!(approx(s.width, 100.0) && approx(s.height, 100.0));
    }

    #[test]
    fn grid_two_splits_columns_with_gap() {
        let slots = slot_layout(TemplateKind::Grid2);
        assert!(approx(slots[0].width, 49.0));
        assert!(approx(slots[1].x, 51.0));
        assert!(approx(slots[1].height, 100.0));
    }

    #[test]
    fn grid_four_is_row_major_two_by_two() {
        let slots = slot_layout(TemplateKind::Grid4);
        assert!(approx(slots[0].y, slots[1].y));
        assert!(slots[2].y > slots[0].y);
        assert!(approx(slots[0].x, slots[2].x));
        for s in &slots {
            assert!(s.x >= 0.0 && s.x + s.width <= 100.01);
            assert!(s.y >= 0.0 && s.y + s.height <= 100.01);
        }
    }

    #[test]
    fn scaled_maps_into_points() {
        let rect = SlotRect {
            x: 50.0,
            y: 0.0,
            width: 50.0,
            height: 100.0,
        };
        let scaled = rect.scaled(40.0, 40.0, 500.0, 700.0);
        assert!(approx(scaled.x, 290.0));
        assert!(approx(scaled.width, 250.0));
        assert!(approx(scaled.height, 700.0));
    }
}
