//! The lookbook document: metadata plus a non-empty ordered list of pages.

use crate::error::ComposeError;
use crate::overlay::OverlayStyle;
use crate::page::{Page, PageId};
use crate::products::{Product, ProductId, INVALID_PRODUCT_ID};
use crate::templates;

pub const DEFAULT_TITLE: &str = "Untitled Lookbook";

#[derive(Debug, Clone, PartialEq)]
pub struct LookbookDocument {
    title: String,
    description: String,
    /// Never empty.
    pages: Vec<Page>,
    /// Highest id ever issued, so deleted ids are never handed out again.
    last_issued_id: PageId,
}

impl Default for LookbookDocument {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, "")
    }
}

impl LookbookDocument {
    /// A document with a single default page (id 1).
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            pages: vec![Page::new(1)],
            last_issued_id: 1,
        }
    }

    /// Build from stored pages, rejecting an empty list, id 0 or duplicate
    /// ids.
    pub(crate) fn from_pages(title: String, description: String, pages: Vec<Page>) -> Result<Self, ComposeError> {
        if pages.is_empty() {
            return Err(ComposeError::EmptyDocument);
        }
        let mut seen = std::collections::HashSet::new();
        for page in &pages {
            if page.id() == 0 {
                return Err(ComposeError::InvalidPageId { page_id: 0 });
            }
            if !seen.insert(page.id()) {
                return Err(ComposeError::DuplicatePageId { page_id: page.id() });
            }
        }
        let last_issued_id = pages.iter().map(Page::id).max().unwrap_or(0);
        Ok(Self {
            title,
            description,
            pages,
            last_issued_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn first_page(&self) -> &Page {
        &self.pages[0]
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.page(id).is_some()
    }

    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    fn page_mut(&mut self, id: PageId) -> Result<&mut Page, ComposeError> {
        self.pages
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(ComposeError::PageNotFound { page_id: id })
    }

    // -----------------------------------------------------------------------
    // Page lifecycle
    // -----------------------------------------------------------------------

    /// Append a page on the default template and return its id. Fails once
    /// `PageId::MAX` has been issued.
    pub fn add_page(&mut self) -> Result<PageId, ComposeError> {
        let current_max = self.pages.iter().map(Page::id).max().unwrap_or(0);
        let id = current_max
            .max(self.last_issued_id)
            .checked_add(1)
            .ok_or(ComposeError::PageIdsExhausted)?;
        self.last_issued_id = id;
        self.pages.push(Page::new(id));
        log::debug!("added page {id} ({} pages)", self.pages.len());
        Ok(id)
    }

    /// Carry the issued-id mark over from an earlier incarnation of this
    /// document, so ids handed out there are not issued again.
    pub(crate) fn inherit_issued_ids(&mut self, earlier: &LookbookDocument) {
        self.last_issued_id = self.last_issued_id.max(earlier.last_issued_id);
    }

    /// Remove a page. Refuses to remove the last remaining page.
    pub fn delete_page(&mut self, id: PageId) -> Result<(), ComposeError> {
        let index = self
            .page_index(id)
            .ok_or(ComposeError::PageNotFound { page_id: id })?;
        if self.pages.len() == 1 {
            return Err(ComposeError::LastPage);
        }
        self.pages.remove(index);
        log::debug!("deleted page {id} ({} pages)", self.pages.len());
        Ok(())
    }

    /// Move a page to `to_index`, clamped to the valid range.
    pub fn move_page(&mut self, id: PageId, to_index: usize) -> Result<(), ComposeError> {
        let from = self
            .page_index(id)
            .ok_or(ComposeError::PageNotFound { page_id: id })?;
        let to = to_index.min(self.pages.len() - 1);
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        Ok(())
    }

    /// Re-template a page. Links, slot images and any overlay style survive.
    pub fn set_template(&mut self, id: PageId, template_id: &str) -> Result<(), ComposeError> {
        let template = templates::resolve(template_id).ok_or_else(|| {
            log::warn!("rejecting unknown template {template_id:?} for page {id}");
            ComposeError::TemplateNotFound {
                template_id: template_id.to_string(),
            }
        })?;
        self.page_mut(id)?.apply_template(template);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Product links and slot images
    // -----------------------------------------------------------------------

    /// Toggle a product link. Returns whether the product is linked
    /// afterwards.
    pub fn toggle_link(&mut self, id: PageId, product_id: ProductId) -> Result<bool, ComposeError> {
        if product_id <= INVALID_PRODUCT_ID {
            return Err(ComposeError::InvalidProductId(product_id.to_string()));
        }
        Ok(self.page_mut(id)?.toggle_link(product_id))
    }

    /// Catalog entries linked to a page, in catalog order. Linked ids with
    /// no catalog entry are skipped.
    pub fn linked_products<'a>(&self, id: PageId, catalog: &'a [Product]) -> Result<Vec<&'a Product>, ComposeError> {
        self.page(id)
            .map(|p| p.links().resolve(catalog))
            .ok_or(ComposeError::PageNotFound { page_id: id })
    }

    /// Attach an opaque image reference (URL or asset id) to a slot.
    pub fn set_slot_image(&mut self, id: PageId, slot: usize, reference: &str) -> Result<(), ComposeError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ComposeError::InvalidSlot(format!(
                "empty image reference for slot {slot}"
            )));
        }
        self.page_mut(id)?.set_slot_image(slot, reference.to_string());
        Ok(())
    }

    /// Detach a slot image. Returns whether anything was removed.
    pub fn clear_slot_image(&mut self, id: PageId, slot: usize) -> Result<bool, ComposeError> {
        Ok(self.page_mut(id)?.clear_slot_image(slot))
    }

    // -----------------------------------------------------------------------
    // Overlay
    // -----------------------------------------------------------------------

    /// Mutable access to a page's overlay, only while its template shows one.
    pub fn overlay_mut(&mut self, id: PageId) -> Result<&mut OverlayStyle, ComposeError> {
        self.page_mut(id)?
            .active_overlay_mut()
            .ok_or(ComposeError::NoOverlayRegion { page_id: id })
    }
}
