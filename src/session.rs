//! Composition session – the top-level controller.
//!
//! Owns the document, the selected page, the edit/preview mode, the
//! transient product search query and any active overlay drag. Every
//! mutating call is rejected with [`ComposeError::ReadOnly`] while
//! previewing; preview itself is just a different view over the same
//! document, never a copy.

use crate::document::LookbookDocument;
use crate::error::ComposeError;
use crate::overlay::{OverlayDrag, OverlayStyle, Point, Rect};
use crate::page::{Page, PageId};
use crate::products::{search_catalog, Product, ProductId};
use crate::snapshot::LookbookSnapshot;
use crate::style::{Color, FontFamily, FontSize, FontWeight, TextAlign};
use crate::view::{EditorView, PreviewView, SessionView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editing,
    Previewing,
}

/// Persistence collaborator. The session hands it a snapshot on save and
/// passes its verdict back to the caller unchanged.
pub trait LookbookStore {
    fn save(&mut self, snapshot: &LookbookSnapshot) -> Result<(), String>;
}

impl<F> LookbookStore for F
where
    F: FnMut(&LookbookSnapshot) -> Result<(), String>,
{
    fn save(&mut self, snapshot: &LookbookSnapshot) -> Result<(), String> {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    page_id: PageId,
    drag: OverlayDrag,
}

#[derive(Debug, Clone)]
pub struct CompositionSession {
    document: LookbookDocument,
    /// Last state accepted by the store; `cancel` returns here.
    committed: LookbookSnapshot,
    selected_page_id: PageId,
    mode: Mode,
    search_query: String,
    drag: Option<ActiveDrag>,
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new(LookbookDocument::default())
    }
}

impl CompositionSession {
    /// Open a session on a document. The first page is selected.
    pub fn new(document: LookbookDocument) -> Self {
        let committed = document.snapshot();
        let selected_page_id = document.first_page().id();
        Self {
            document,
            committed,
            selected_page_id,
            mode: Mode::Editing,
            search_query: String::new(),
            drag: None,
        }
    }

    pub fn document(&self) -> &LookbookDocument {
        &self.document
    }

    pub fn selected_page_id(&self) -> PageId {
        self.selected_page_id
    }

    pub fn selected_page(&self) -> &Page {
        self.document
            .page(self.selected_page_id)
            .unwrap_or_else(|| self.document.first_page())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_previewing(&self) -> bool {
        self.mode == Mode::Previewing
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the document differs from the last committed state.
    pub fn is_dirty(&self) -> bool {
        self.document.snapshot() != self.committed
    }

    fn ensure_editing(&self) -> Result<(), ComposeError> {
        match self.mode {
            Mode::Editing => Ok(()),
            Mode::Previewing => Err(ComposeError::ReadOnly),
        }
    }

    // -----------------------------------------------------------------------
    // Mode
    // -----------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Previewing {
            self.drag = None;
        }
        if self.mode != mode {
            log::debug!("session mode {:?} -> {mode:?}", self.mode);
        }
        self.mode = mode;
    }

    /// Flip between editing and previewing. Returns the new mode.
    pub fn toggle_mode(&mut self) -> Mode {
        let next = match self.mode {
            Mode::Editing => Mode::Previewing,
            Mode::Previewing => Mode::Editing,
        };
        self.set_mode(next);
        next
    }

    // -----------------------------------------------------------------------
    // Selection and metadata
    // -----------------------------------------------------------------------

    pub fn select_page(&mut self, id: PageId) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        if !self.document.contains(id) {
            return Err(ComposeError::PageNotFound { page_id: id });
        }
        if id != self.selected_page_id {
            self.drag = None;
        }
        self.selected_page_id = id;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.set_title(title);
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.set_description(description);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Page lifecycle
    // -----------------------------------------------------------------------

    /// Append a page and select it.
    pub fn add_page(&mut self) -> Result<PageId, ComposeError> {
        self.ensure_editing()?;
        let id = self.document.add_page()?;
        self.drag = None;
        self.selected_page_id = id;
        Ok(id)
    }

    /// Delete a page. If it was selected, the first remaining page becomes
    /// the selection.
    pub fn delete_page(&mut self, id: PageId) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.delete_page(id)?;
        if self.drag.is_some_and(|d| d.page_id == id) {
            self.drag = None;
        }
        if self.selected_page_id == id {
            self.selected_page_id = self.document.first_page().id();
        }
        Ok(())
    }

    pub fn move_page(&mut self, id: PageId, to_index: usize) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.move_page(id, to_index)
    }

    pub fn set_template(&mut self, id: PageId, template_id: &str) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.set_template(id, template_id)?;
        if self.drag.is_some_and(|d| d.page_id == id) {
            self.drag = None;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Products and images
    // -----------------------------------------------------------------------

    pub fn toggle_link(&mut self, id: PageId, product_id: ProductId) -> Result<bool, ComposeError> {
        self.ensure_editing()?;
        self.document.toggle_link(id, product_id)
    }

    pub fn set_slot_image(&mut self, id: PageId, slot: usize, reference: &str) -> Result<(), ComposeError> {
        self.ensure_editing()?;
        self.document.set_slot_image(id, slot, reference)
    }

    pub fn clear_slot_image(&mut self, id: PageId, slot: usize) -> Result<bool, ComposeError> {
        self.ensure_editing()?;
        self.document.clear_slot_image(id, slot)
    }

    /// Transient; not part of the document.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn search_results<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        search_catalog(&self.search_query, catalog)
    }

    // -----------------------------------------------------------------------
    // Overlay on the selected page
    // -----------------------------------------------------------------------

    fn selected_overlay_mut(&mut self) -> Result<&mut OverlayStyle, ComposeError> {
        self.ensure_editing()?;
        self.document.overlay_mut(self.selected_page_id)
    }

    /// Start dragging the selected page's overlay. `container` and `overlay`
    /// are the on-screen rectangles the host rendered.
    pub fn begin_drag(&mut self, pointer: Point, container: Rect, overlay: Rect) -> Result<(), ComposeError> {
        let page_id = self.selected_page_id;
        let drag = self.selected_overlay_mut()?.begin_drag(pointer, container, overlay)?;
        self.drag = Some(ActiveDrag { page_id, drag });
        Ok(())
    }

    /// Reposition for a pointer move. Returns `false` when no drag is active.
    pub fn update_drag(&mut self, pointer: Point) -> Result<bool, ComposeError> {
        self.ensure_editing()?;
        let Some(active) = self.drag else {
            return Ok(false);
        };
        self.document
            .overlay_mut(active.page_id)?
            .apply_drag(&active.drag, pointer);
        Ok(true)
    }

    /// Release the drag; the last computed position stays. Returns whether a
    /// drag was active.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn set_overlay_width(&mut self, width: f32) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_width(width)
    }

    pub fn set_font_family(&mut self, family: FontFamily) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_font_family(family);
        Ok(())
    }

    pub fn set_font_size(&mut self, size: FontSize) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_font_size(size);
        Ok(())
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_font_weight(weight);
        Ok(())
    }

    pub fn set_text_align(&mut self, align: TextAlign) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_text_align(align);
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) -> Result<(), ComposeError> {
        self.selected_overlay_mut()?.set_color(color);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Save / cancel
    // -----------------------------------------------------------------------

    /// Hand the current snapshot to the store. On success it becomes the
    /// committed state; on failure nothing changes.
    pub fn save<S: LookbookStore + ?Sized>(&mut self, store: &mut S) -> Result<(), ComposeError> {
        let snapshot = self.document.snapshot();
        store.save(&snapshot).map_err(|e| {
            log::warn!("saving lookbook {:?} failed: {e}", snapshot.title);
            ComposeError::SaveFailed(e)
        })?;
        log::debug!("saved lookbook {:?} ({} pages)", snapshot.title, snapshot.pages.len());
        self.committed = snapshot;
        Ok(())
    }

    /// Discard uncommitted edits and return to the last committed state.
    /// Page ids issued since the last save stay retired.
    pub fn cancel(&mut self) {
        match LookbookDocument::from_snapshot(self.committed.clone()) {
            Ok(mut document) => {
                document.inherit_issued_ids(&self.document);
                self.document = document;
                self.selected_page_id = self.document.first_page().id();
                self.drag = None;
            }
            Err(e) => log::error!("cannot restore committed lookbook: {e}"),
        }
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Read-only rendering of every page, available in either mode.
    pub fn preview<'a>(&'a self, catalog: &'a [Product]) -> PreviewView<'a> {
        PreviewView::build(&self.document, catalog)
    }

    pub fn view<'a>(&'a self, catalog: &'a [Product]) -> SessionView<'a> {
        match self.mode {
            Mode::Editing => SessionView::Editing(EditorView::build(
                &self.document,
                self.selected_page_id,
                &self.search_query,
                self.drag.is_some(),
                catalog,
            )),
            Mode::Previewing => SessionView::Previewing(self.preview(catalog)),
        }
    }
}
