//! Snapshot – the serialisable form of a lookbook handed to persistence.
//!
//! This is the "frozen" counterpart of [`LookbookDocument`]: plain data, no
//! invariants enforced until it is turned back into a document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::LookbookDocument;
use crate::error::ComposeError;
use crate::overlay::OverlayStyle;
use crate::page::{Page, PageId};
use crate::products::{ProductId, ProductLinks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookbookSnapshot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pages: Vec<PageSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub id: PageId,
    pub template_id: String,
    /// Ascending.
    #[serde(default)]
    pub linked_product_ids: Vec<ProductId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slot_images: BTreeMap<usize, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_style: Option<OverlayStyle>,
}

impl LookbookSnapshot {
    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl From<&Page> for PageSnapshot {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id(),
            template_id: page.template_id().to_string(),
            linked_product_ids: page.links().ids().collect(),
            slot_images: page.slot_images().clone(),
            overlay_style: page.overlay_style().copied(),
        }
    }
}

impl LookbookDocument {
    /// Capture the current state for persistence.
    pub fn snapshot(&self) -> LookbookSnapshot {
        LookbookSnapshot {
            title: self.title().to_string(),
            description: self.description().to_string(),
            pages: self.pages().iter().map(PageSnapshot::from).collect(),
        }
    }

    /// Rebuild a document from a snapshot. Rejects empty page lists, id 0
    /// and duplicate ids; re-clamps overlay geometry; keeps unknown template ids
    /// so they render as placeholders.
    pub fn from_snapshot(snapshot: LookbookSnapshot) -> Result<Self, ComposeError> {
        let pages = snapshot
            .pages
            .into_iter()
            .map(|p| {
                Page::from_parts(
                    p.id,
                    p.template_id,
                    p.linked_product_ids
                        .into_iter()
                        .filter(|id| *id > 0)
                        .collect::<ProductLinks>(),
                    p.overlay_style,
                    p.slot_images,
                )
            })
            .collect();
        LookbookDocument::from_pages(snapshot.title, snapshot.description, pages)
    }
}
