//! View models – everything a renderer needs to draw a page, resolved
//! against the template catalog and the product catalog.
//!
//! Both the editor and the preview go through [`page_view`], so the two
//! modes always see the same template, slots and overlay for a page. Views
//! hold shared borrows only; there is no way to mutate the document through
//! them.

use crate::document::LookbookDocument;
use crate::layout::{slot_layout, SlotRect};
use crate::overlay::OverlayStyle;
use crate::page::{Page, PageId};
use crate::products::{search_catalog, Product};
use crate::templates::Template;

/// Result of resolving a page's template id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateView<'a> {
    Resolved(&'static Template),
    /// Rendered as an explicit placeholder, never as an empty layout.
    NotFound { template_id: &'a str },
}

impl TemplateView<'_> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TemplateView::Resolved(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotView<'a> {
    pub index: usize,
    /// Percent of the page container.
    pub rect: SlotRect,
    pub image: Option<&'a str>,
}

/// The cover overlay. On cover pages the lookbook title is the heading and
/// the description is the body.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView<'a> {
    pub style: &'a OverlayStyle,
    pub heading: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub page_id: PageId,
    /// 1-based position in the document.
    pub number: usize,
    pub template: TemplateView<'a>,
    pub slots: Vec<SlotView<'a>>,
    pub overlay: Option<OverlayView<'a>>,
    /// Linked products that exist in the catalog, in catalog order.
    pub products: Vec<&'a Product>,
}

/// Resolve one page into its rendering inputs.
pub fn page_view<'a>(
    document: &'a LookbookDocument,
    number: usize,
    page: &'a Page,
    catalog: &'a [Product],
) -> PageView<'a> {
    let template = match page.template() {
        Some(t) => TemplateView::Resolved(t),
        None => TemplateView::NotFound {
            template_id: page.template_id(),
        },
    };

    let slots = match template {
        TemplateView::Resolved(t) => slot_layout(t.kind)
            .into_iter()
            .enumerate()
            .map(|(index, rect)| SlotView {
                index,
                rect,
                image: page.slot_image(index),
            })
            .collect(),
        TemplateView::NotFound { .. } => Vec::new(),
    };

    let overlay = page.active_overlay().map(|style| OverlayView {
        style,
        heading: document.title(),
        body: document.description(),
    });

    PageView {
        page_id: page.id(),
        number,
        template,
        slots,
        overlay,
        products: page.links().resolve(catalog),
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Read-only rendering of the whole lookbook, every page in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub pages: Vec<PageView<'a>>,
}

impl<'a> PreviewView<'a> {
    pub fn build(document: &'a LookbookDocument, catalog: &'a [Product]) -> Self {
        Self {
            title: document.title(),
            description: document.description(),
            pages: document
                .pages()
                .iter()
                .enumerate()
                .map(|(i, page)| page_view(document, i + 1, page, catalog))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PageTab<'a> {
    pub page_id: PageId,
    pub number: usize,
    pub template_id: &'a str,
    pub selected: bool,
}

/// A catalog entry offered for linking to the selected page.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCandidate<'a> {
    pub product: &'a Product,
    pub linked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tabs: Vec<PageTab<'a>>,
    pub selected: PageView<'a>,
    pub search_query: &'a str,
    pub candidates: Vec<LinkCandidate<'a>>,
    pub dragging: bool,
}

impl<'a> EditorView<'a> {
    pub fn build(
        document: &'a LookbookDocument,
        selected_page_id: PageId,
        search_query: &'a str,
        dragging: bool,
        catalog: &'a [Product],
    ) -> Self {
        let index = document.page_index(selected_page_id).unwrap_or(0);
        let page = &document.pages()[index];

        let tabs = document
            .pages()
            .iter()
            .enumerate()
            .map(|(i, p)| PageTab {
                page_id: p.id(),
                number: i + 1,
                template_id: p.template_id(),
                selected: i == index,
            })
            .collect();

        let candidates = search_catalog(search_query, catalog)
            .into_iter()
            .map(|product| LinkCandidate {
                product,
                linked: page.links().contains(product.id),
            })
            .collect();

        Self {
            title: document.title(),
            description: document.description(),
            tabs,
            selected: page_view(document, index + 1, page, catalog),
            search_query,
            candidates,
            dragging,
        }
    }
}

/// What the host should draw for the current session mode.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView<'a> {
    Editing(EditorView<'a>),
    Previewing(PreviewView<'a>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::demo_catalog;
    use crate::snapshot::LookbookSnapshot;

    #[test]
    fn unknown_template_renders_placeholder() {
        let json = r#"{"title":"t","pages":[{"id":1,"templateId":"mosaic","linkedProductIds":[2]}]}"#;
        let doc = LookbookDocument::from_snapshot(LookbookSnapshot::from_json(json).unwrap()).unwrap();
        let catalog = demo_catalog();
        let preview = PreviewView::build(&doc, &catalog);
        let page = &preview.pages[0];
        assert_eq!(page.template, TemplateView::NotFound { template_id: "mosaic" });
        assert!(page.slots.is_empty());
        assert_eq!(page.products.len(), 1, "links still resolve on placeholder pages");
    }

    #[test]
    fn overlay_only_on_cover_pages() {
        let mut doc = LookbookDocument::new("Resort", "Sun-washed linens");
        let cover = doc.add_page().unwrap();
        doc.set_template(cover, "cover").unwrap();
        let catalog = demo_catalog();
        let preview = PreviewView::build(&doc, &catalog);
        assert!(preview.pages[0].overlay.is_none());
        let overlay = preview.pages[1].overlay.as_ref().unwrap();
        assert_eq!(overlay.heading, "Resort");
        assert_eq!(overlay.body, "Sun-washed linens");
    }

    #[test]
    fn slots_carry_images() {
        let mut doc = LookbookDocument::default();
        doc.set_slot_image(1, 1, "asset:right").unwrap();
        doc.set_slot_image(1, 5, "asset:hidden").unwrap();
        let catalog = demo_catalog();
        let preview = PreviewView::build(&doc, &catalog);
        let images: Vec<_> = preview.pages[0].slots.iter().map(|s| s.image).collect();
        assert_eq!(images, vec![None, Some("asset:right")]);
    }

    #[test]
    fn editor_marks_selection_and_links() {
        let mut doc = LookbookDocument::default();
        let second = doc.add_page().unwrap();
        doc.toggle_link(second, 2).unwrap();
        let catalog = demo_catalog();
        let editor = EditorView::build(&doc, second, "bag", false, &catalog);
        let selected: Vec<_> = editor.tabs.iter().map(|t| t.selected).collect();
        assert_eq!(selected, vec![false, true]);
        assert_eq!(editor.selected.page_id, second);
        assert_eq!(editor.candidates.len(), 1);
        assert!(editor.candidates[0].linked);
    }
}
