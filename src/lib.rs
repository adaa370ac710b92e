//! # lookbook-forge – Lookbook composition engine
//!
//! A lookbook is an ordered list of pages, each laid out by a template,
//! linked to catalog products, and (on cover pages) carrying a draggable,
//! styled text overlay. The crate is organised in layers:
//!
//! 1. **Model** – templates, styles, overlay geometry, product links, pages
//!    and the document ([`templates`], [`style`], [`overlay`], [`products`],
//!    [`page`], [`document`], [`snapshot`])
//! 2. **Session** – edit/preview mode, selection, drag and save/cancel
//!    ([`session`])
//! 3. **Views** – read-only rendering inputs shared by editor and preview
//!    ([`view`], [`layout`])
//! 4. **Export** – compose the preview into pages and emit PDF bytes via
//!    printpdf ([`compose`], [`layout_config`], [`fonts`], [`render`],
//!    [`pipeline`])

pub mod compose;
pub mod document;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod layout_config;
pub mod overlay;
pub mod page;
pub mod pipeline;
pub mod products;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod style;
pub mod templates;
pub mod view;

// Re-exports for convenience
pub use document::LookbookDocument;
pub use error::ComposeError;
pub use pipeline::{generate_preview_pdf, PageOrientation, PreviewConfig};
pub use session::{CompositionSession, LookbookStore, Mode};
