//! Domain errors for the composition engine.
//!
//! Every variant is recoverable: the operation that returns it has not
//! changed any state, and the caller decides how to surface it.

use crate::page::PageId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComposeError {
    #[error("a lookbook must keep at least one page")]
    LastPage,

    #[error("template not found: {template_id:?}")]
    TemplateNotFound { template_id: String },

    #[error("page not found: {page_id}")]
    PageNotFound { page_id: PageId },

    #[error("invalid style value: {0}")]
    InvalidStyle(String),

    #[error("invalid product id: {0:?}")]
    InvalidProductId(String),

    #[error("invalid image slot: {0}")]
    InvalidSlot(String),

    #[error("lookbook is in preview mode and cannot be edited")]
    ReadOnly,

    #[error("page {page_id} uses a template without an overlay region")]
    NoOverlayRegion { page_id: PageId },

    #[error("container has no area; drag cannot start")]
    DegenerateContainer,

    #[error("a lookbook snapshot must contain at least one page")]
    EmptyDocument,

    #[error("duplicate page id in snapshot: {page_id}")]
    DuplicatePageId { page_id: PageId },

    #[error("invalid page id in snapshot: {page_id} (ids start at 1)")]
    InvalidPageId { page_id: PageId },

    #[error("no page ids left to issue")]
    PageIdsExhausted,

    #[error("save failed: {0}")]
    SaveFailed(String),
}
