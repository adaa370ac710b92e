//! Integration tests for the lookbook composition engine.
//!
//! These tests validate:
//! - Page lifecycle invariants (non-empty, fresh ids, selection)
//! - Overlay geometry stays clamped through width changes and drags
//! - Links and overlay style survive re-templating
//! - Preview renders the same state the editor sees
//! - Preview export produces a valid PDF with one page per lookbook page

use std::collections::HashSet;

use proptest::prelude::*;

use lookbook_forge::layout_config::{BoxRole, LayoutConfig};
use lookbook_forge::overlay::{OverlayStyle, Point, Rect};
use lookbook_forge::pipeline::{compute_layout_config, generate_preview_pdf, PreviewConfig};
use lookbook_forge::products::{demo_catalog, load_catalog_json, search_catalog, Product};
use lookbook_forge::render::render_pdf;
use lookbook_forge::snapshot::LookbookSnapshot;
use lookbook_forge::style::{Color, FontFamily, FontSize, FontWeight, TextAlign};
use lookbook_forge::view::{SessionView, TemplateView};
use lookbook_forge::{ComposeError, CompositionSession, LookbookDocument, Mode};

// =====================================================================
// Helper
// =====================================================================

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

fn page_ids(doc: &LookbookDocument) -> Vec<u32> {
    doc.pages().iter().map(|p| p.id()).collect()
}

/// One step of a random page-lifecycle sequence. `Delete` picks a victim by
/// index into the current page list, modulo its length.
#[derive(Debug, Clone, Copy)]
enum PageOp {
    Add,
    Delete(usize),
}

fn page_op() -> impl Strategy<Value = PageOp> {
    prop_oneof![
        1 => Just(PageOp::Add),
        2 => any::<usize>().prop_map(PageOp::Delete),
    ]
}

/// Screen rect of the overlay for a style inside `container`.
fn overlay_rect(style: &OverlayStyle, container: Rect, height: f32) -> Rect {
    let x = container.x + style.position_left() / 100.0 * container.width;
    let centre = container.y + style.position_top() / 100.0 * container.height;
    Rect::new(x, centre - height / 2.0, style.width() / 100.0 * container.width, height)
}

// =====================================================================
// Page lifecycle
// =====================================================================

proptest! {
    #[test]
    fn document_never_becomes_empty(ops in prop::collection::vec(page_op(), 1..200)) {
        let mut doc = LookbookDocument::default();
        for op in ops {
            match op {
                PageOp::Add => {
                    doc.add_page().unwrap();
                }
                PageOp::Delete(pick) => {
                    let before = page_ids(&doc);
                    let victim = before[pick % before.len()];
                    match doc.delete_page(victim) {
                        Ok(()) => prop_assert!(!doc.contains(victim)),
                        Err(e) => {
                            prop_assert_eq!(e, ComposeError::LastPage);
                            prop_assert_eq!(page_ids(&doc), before, "failed delete must be a no-op");
                        }
                    }
                }
            }
            prop_assert!(doc.page_count() >= 1);
        }
    }

    #[test]
    fn page_ids_are_distinct_and_never_reused(ops in prop::collection::vec(page_op(), 1..200)) {
        let mut doc = LookbookDocument::default();
        let mut issued: HashSet<u32> = HashSet::from([1]);
        for op in ops {
            match op {
                PageOp::Add => {
                    let id = doc.add_page().unwrap();
                    prop_assert!(issued.insert(id), "id {} was issued twice", id);
                }
                PageOp::Delete(pick) => {
                    let ids = page_ids(&doc);
                    let _ = doc.delete_page(ids[pick % ids.len()]);
                }
            }
            let ids = page_ids(&doc);
            let unique: HashSet<_> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn ids_stay_fresh_across_save_and_cancel(
        rounds in prop::collection::vec((prop::collection::vec(page_op(), 0..20), any::<bool>()), 1..10)
    ) {
        let mut session = CompositionSession::default();
        let mut issued: HashSet<u32> = HashSet::from([1]);
        let mut store = |_: &LookbookSnapshot| -> Result<(), String> { Ok(()) };
        for (ops, keep) in rounds {
            for op in ops {
                match op {
                    PageOp::Add => {
                        let id = session.add_page().unwrap();
                        prop_assert!(issued.insert(id), "id {} was issued twice", id);
                    }
                    PageOp::Delete(pick) => {
                        let ids = page_ids(session.document());
                        let _ = session.delete_page(ids[pick % ids.len()]);
                    }
                }
            }
            if keep {
                session.save(&mut store).unwrap();
            } else {
                session.cancel();
            }
            prop_assert!(!session.is_dirty());
        }
    }
}

#[test]
fn deleting_selected_page_selects_new_first_page() {
    let mut session = CompositionSession::default();
    session.add_page().unwrap();
    session.add_page().unwrap();
    assert_eq!(page_ids(session.document()), vec![1, 2, 3]);

    session.select_page(2).unwrap();
    session.delete_page(2).unwrap();
    assert_eq!(session.selected_page_id(), 1);

    session.select_page(3).unwrap();
    session.delete_page(3).unwrap();
    assert_eq!(session.selected_page_id(), 1);
    assert_eq!(session.delete_page(1), Err(ComposeError::LastPage));
}

#[test]
fn reorder_keeps_ids_and_selection() {
    let mut session = CompositionSession::default();
    let second = session.add_page().unwrap();
    session.move_page(second, 0).unwrap();
    assert_eq!(page_ids(session.document()), vec![2, 1]);
    assert_eq!(session.selected_page_id(), second);
}

// =====================================================================
// Overlay geometry
// =====================================================================

proptest! {
    #[test]
    fn width_then_drag_stays_in_bounds(
        width in -50.0f32..200.0,
        moves in prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 1..50)
    ) {
        let container = Rect::new(100.0, 50.0, 400.0, 300.0);
        let mut session = CompositionSession::default();
        session.set_template(1, "cover").unwrap();
        session.set_overlay_width(width).unwrap();

        let style = *session.selected_page().active_overlay().unwrap();
        let start = Point::new(250.0, 200.0);
        session
            .begin_drag(start, container, overlay_rect(&style, container, 40.0))
            .unwrap();

        for (dx, dy) in moves {
            prop_assert_eq!(session.update_drag(Point::new(start.x + dx, start.y + dy)), Ok(true));

            let style = *session.selected_page().active_overlay().unwrap();
            prop_assert!(style.width() >= 20.0 && style.width() <= 100.0);
            prop_assert!(style.position_left() >= 0.0);
            prop_assert!(style.position_left() <= 100.0 - style.width() + 1e-4);
            prop_assert!((0.0..=100.0).contains(&style.position_top()));
            prop_assert_eq!(style.clamped(), style, "clamp must be idempotent");
        }
        prop_assert!(session.end_drag());
    }
}

#[test]
fn drag_moves_by_pointer_delta_percentage() {
    let container = Rect::new(0.0, 0.0, 200.0, 100.0);
    let mut session = CompositionSession::default();
    session.set_template(1, "cover").unwrap();
    session.set_overlay_width(40.0).unwrap();

    let style = *session.selected_page().active_overlay().unwrap();
    let start = Point::new(60.0, 50.0);
    session
        .begin_drag(start, container, overlay_rect(&style, container, 20.0))
        .unwrap();
    // +20 px of 200 = +10 %, -10 px of 100 = -10 %
    session.update_drag(Point::new(80.0, 40.0)).unwrap();
    session.end_drag();

    let moved = session.selected_page().active_overlay().unwrap();
    assert!((moved.position_left() - 20.0).abs() < 1e-3);
    assert!((moved.position_top() - 40.0).abs() < 1e-3);
}

#[test]
fn degenerate_container_cannot_start_drag() {
    let mut session = CompositionSession::default();
    session.set_template(1, "cover").unwrap();
    let flat = Rect::new(0.0, 0.0, 0.0, 100.0);
    assert_eq!(
        session.begin_drag(Point::new(0.0, 0.0), flat, flat),
        Err(ComposeError::DegenerateContainer)
    );
    assert!(!session.is_dragging());
}

// =====================================================================
// Product links and templates
// =====================================================================

#[test]
fn toggle_twice_restores_links() {
    let mut doc = LookbookDocument::default();
    doc.toggle_link(1, 3).unwrap();
    let before = doc.page(1).unwrap().links().clone();
    for id in [3, 5, 3] {
        doc.toggle_link(1, id).unwrap();
        doc.toggle_link(1, id).unwrap();
        assert_eq!(doc.page(1).unwrap().links(), &before);
    }
}

#[test]
fn template_round_trip_preserves_links_and_style() {
    let mut session = CompositionSession::default();
    session.set_template(1, "cover").unwrap();
    session.toggle_link(1, 3).unwrap();
    session.toggle_link(1, 7).unwrap();
    session.set_overlay_width(60.0).unwrap();
    session.set_font_family(FontFamily::Serif).unwrap();
    session.set_font_size(FontSize::new(24).unwrap()).unwrap();
    session.set_font_weight(FontWeight::Bold).unwrap();
    session.set_text_align(TextAlign::Left).unwrap();
    session.set_color(Color::from_hex("#1a1a1a").unwrap()).unwrap();
    let style = *session.selected_page().active_overlay().unwrap();

    session.set_template(1, "grid-2").unwrap();
    assert!(session.selected_page().active_overlay().is_none());
    assert_eq!(session.set_overlay_width(30.0), Err(ComposeError::NoOverlayRegion { page_id: 1 }));

    session.set_template(1, "cover").unwrap();
    let page = session.selected_page();
    assert_eq!(page.links().ids().collect::<Vec<_>>(), vec![3, 7]);
    assert_eq!(page.active_overlay(), Some(&style));
}

#[test]
fn unknown_template_is_rejected_but_loaded_ones_render_placeholder() {
    let mut doc = LookbookDocument::default();
    assert!(matches!(
        doc.set_template(1, "carousel"),
        Err(ComposeError::TemplateNotFound { .. })
    ));

    let json = r#"{"title":"Legacy","pages":[{"id":5,"templateId":"carousel"}]}"#;
    let doc = LookbookDocument::from_snapshot(LookbookSnapshot::from_json(json).unwrap()).unwrap();
    let catalog = demo_catalog();
    let session = CompositionSession::new(doc);
    let preview = session.preview(&catalog);
    assert_eq!(
        preview.pages[0].template,
        TemplateView::NotFound { template_id: "carousel" }
    );
}

// =====================================================================
// Search
// =====================================================================

#[test]
fn search_matches_case_insensitively() {
    let catalog = vec![
        Product::new(1, "Silk Blend Tailored Blazer", "", "", 289.0),
        Product::new(2, "Leather Crossbody Bag", "", "", 198.0),
    ];
    let hits: Vec<_> = search_catalog("silk", &catalog).iter().map(|p| p.id).collect();
    assert_eq!(hits, vec![1]);
    let hits: Vec<_> = search_catalog("SILK", &catalog).iter().map(|p| p.id).collect();
    assert_eq!(hits, vec![1]);
    assert_eq!(search_catalog("", &catalog).len(), 2);
}

#[test]
fn catalog_json_accepts_string_ids() {
    let json = r#"[{"id":"12","name":"Wool Coat"},{"id":"abc","name":"Broken"},{"id":4,"name":"Scarf"}]"#;
    let catalog = load_catalog_json(json).unwrap();
    let ids: Vec<_> = catalog.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![12, 4]);
}

// =====================================================================
// Session modes
// =====================================================================

#[test]
fn preview_reflects_live_state() {
    let catalog = demo_catalog();
    let mut session = CompositionSession::new(LookbookDocument::new("Resort", "Linen and light"));
    let cover = session.add_page().unwrap();
    session.set_template(cover, "cover").unwrap();
    session.set_overlay_width(50.0).unwrap();

    let (editing_style, editing_slots) = match session.view(&catalog) {
        SessionView::Editing(editor) => (
            *editor.selected.overlay.as_ref().unwrap().style,
            editor.selected.slots.iter().map(|s| s.rect).collect::<Vec<_>>(),
        ),
        SessionView::Previewing(_) => panic!("session starts in editing mode"),
    };

    assert_eq!(session.toggle_mode(), Mode::Previewing);
    let preview = match session.view(&catalog) {
        SessionView::Previewing(preview) => preview,
        SessionView::Editing(_) => panic!("expected preview"),
    };
    assert_eq!(preview.pages.len(), 2);
    assert!(preview.pages[0].template.is_resolved());
    assert!(preview.pages[0].overlay.is_none());

    let cover_page = &preview.pages[1];
    let overlay = cover_page.overlay.as_ref().unwrap();
    assert_eq!(*overlay.style, editing_style);
    assert_eq!(overlay.style.width(), 50.0);
    assert_eq!(overlay.heading, "Resort");
    let preview_slots: Vec<_> = cover_page.slots.iter().map(|s| s.rect).collect();
    assert_eq!(preview_slots, editing_slots);
}

#[test]
fn previewing_is_read_only_until_toggled_back() {
    let mut session = CompositionSession::default();
    session.set_mode(Mode::Previewing);
    assert_eq!(session.set_title("x"), Err(ComposeError::ReadOnly));
    assert_eq!(session.set_slot_image(1, 0, "asset:1"), Err(ComposeError::ReadOnly));
    assert!(!session.is_dirty());

    session.set_mode(Mode::Editing);
    session.set_title("Holiday").unwrap();
    assert!(session.is_dirty());
}

#[test]
fn save_then_cancel_round_trip() {
    let mut stored: Option<String> = None;
    let mut session = CompositionSession::default();
    session.set_title("Spring Capsule").unwrap();
    session.toggle_link(1, 2).unwrap();
    session
        .save(&mut |s: &LookbookSnapshot| -> Result<(), String> {
            stored = Some(s.to_json());
            Ok(())
        })
        .unwrap();

    session.add_page().unwrap();
    session.set_description("draft").unwrap();
    session.cancel();
    assert!(!session.is_dirty());

    let reloaded = LookbookDocument::from_snapshot(LookbookSnapshot::from_json(&stored.unwrap()).unwrap()).unwrap();
    assert_eq!(reloaded.snapshot(), session.document().snapshot());
}

// =====================================================================
// Preview export
// =====================================================================

#[test]
fn export_produces_one_pdf_page_per_lookbook_page() {
    let mut doc = LookbookDocument::new("Autumn Edit", "Layered neutrals for cooler days");
    let cover = doc.add_page().unwrap();
    doc.set_template(cover, "cover").unwrap();
    let grid = doc.add_page().unwrap();
    doc.set_template(grid, "grid-4").unwrap();
    doc.toggle_link(grid, 1).unwrap();
    doc.toggle_link(grid, 4).unwrap();

    let (bytes, layout) = generate_preview_pdf(&doc, &demo_catalog(), &PreviewConfig::default()).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(layout.pages.len(), 3);
    assert_eq!(layout.pages[1].boxes_with_role(BoxRole::Overlay).len(), 1);
    assert_eq!(layout.pages[2].boxes_with_role(BoxRole::SlotPlaceholder).len(), 4);
    assert_eq!(layout.pages[2].boxes_with_role(BoxRole::Captions).len(), 1);
}

#[test]
fn exported_boxes_stay_within_page() {
    let mut doc = LookbookDocument::default();
    for template in ["grid-3", "grid-4", "single", "cover"] {
        let id = doc.add_page().unwrap();
        doc.set_template(id, template).unwrap();
        doc.toggle_link(id, 5).unwrap();
    }
    for config in [PreviewConfig::default(), PreviewConfig::a4_landscape()] {
        let layout = compute_layout_config(&doc, &demo_catalog(), &config);
        for page in &layout.pages {
            for role in [BoxRole::Slot, BoxRole::SlotPlaceholder, BoxRole::Captions] {
                for b in page.boxes_with_role(role) {
                    assert!(b.x >= 0.0 && b.y >= 0.0, "{role:?} at {},{}", b.x, b.y);
                    assert!(b.x + b.width <= layout.page_width_pt + 0.01);
                    assert!(b.y + b.height <= layout.page_height_pt + 0.01);
                    assert!(b.width > 0.0 && b.height > 0.0);
                }
            }
        }
    }
}

#[test]
fn undecodable_image_is_skipped_not_fatal() {
    let mut doc = LookbookDocument::default();
    doc.set_slot_image(1, 0, "data:image/png;base64,bm90IGFuIGltYWdl").unwrap();
    let (bytes, layout) = generate_preview_pdf(&doc, &[], &PreviewConfig::default()).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(layout.pages[0].boxes_with_role(BoxRole::Slot).len(), 1);
}

#[test]
fn layout_config_json_round_trip_renders() {
    let doc = LookbookDocument::new("Round trip", "");
    let layout = compute_layout_config(&doc, &[], &PreviewConfig::default());
    let restored = LayoutConfig::from_json(&layout.to_json()).unwrap();
    assert_eq!(restored.pages.len(), 1);
    assert_eq!(restored.title, "Round trip");
    assert_valid_pdf(&render_pdf(&restored).unwrap());
}
