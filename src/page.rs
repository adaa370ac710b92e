//! A single lookbook page.

use std::collections::BTreeMap;

use crate::overlay::OverlayStyle;
use crate::products::{ProductId, ProductLinks};
use crate::templates::{self, Template};

/// Page identity: a positive integer, unique and never reused within a
/// session.
pub type PageId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: PageId,
    template_id: String,
    links: ProductLinks,
    /// Allocated the first time the page uses a template with an overlay
    /// region; kept (inert) when switching away.
    overlay: Option<OverlayStyle>,
    slot_images: BTreeMap<usize, String>,
}

impl Page {
    /// A fresh page on the default template with no links.
    pub(crate) fn new(id: PageId) -> Self {
        let mut page = Self {
            id,
            template_id: String::new(),
            links: ProductLinks::new(),
            overlay: None,
            slot_images: BTreeMap::new(),
        };
        page.apply_template(templates::default_template());
        page
    }

    /// Rebuild a page from stored parts. The template id is kept even if it
    /// no longer resolves; renderers show a placeholder for it.
    pub(crate) fn from_parts(
        id: PageId,
        template_id: String,
        links: ProductLinks,
        overlay: Option<OverlayStyle>,
        slot_images: BTreeMap<usize, String>,
    ) -> Self {
        let mut page = Self {
            id,
            template_id,
            links,
            overlay: overlay.map(OverlayStyle::clamped),
            slot_images,
        };
        if let Some(template) = page.template() {
            page.apply_template(template);
        }
        page
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// The resolved template, or `None` if the id is not in the catalog.
    pub fn template(&self) -> Option<&'static Template> {
        templates::resolve(&self.template_id)
    }

    pub fn links(&self) -> &ProductLinks {
        &self.links
    }

    /// The overlay style if one has been allocated, regardless of whether
    /// the current template shows it.
    pub fn overlay_style(&self) -> Option<&OverlayStyle> {
        self.overlay.as_ref()
    }

    /// The overlay style only when the current template renders one.
    pub fn active_overlay(&self) -> Option<&OverlayStyle> {
        match self.template() {
            Some(t) if t.has_overlay_region() => self.overlay.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn active_overlay_mut(&mut self) -> Option<&mut OverlayStyle> {
        match self.template() {
            Some(t) if t.has_overlay_region() => self.overlay.as_mut(),
            _ => None,
        }
    }

    pub fn slot_image(&self, slot: usize) -> Option<&str> {
        self.slot_images.get(&slot).map(String::as_str)
    }

    pub fn slot_images(&self) -> &BTreeMap<usize, String> {
        &self.slot_images
    }

    /// Switch template. Links and any existing overlay style are kept.
    pub(crate) fn apply_template(&mut self, template: &Template) {
        self.template_id = template.id.to_string();
        if template.has_overlay_region() && self.overlay.is_none() {
            self.overlay = Some(OverlayStyle::default());
        }
    }

    pub(crate) fn toggle_link(&mut self, product_id: ProductId) -> bool {
        self.links.toggle(product_id)
    }

    pub(crate) fn set_slot_image(&mut self, slot: usize, reference: String) {
        self.slot_images.insert(slot, reference);
    }

    pub(crate) fn clear_slot_image(&mut self, slot: usize) -> bool {
        self.slot_images.remove(&slot).is_some()
    }
}
