//! Template catalog – the fixed registry of page layouts.
//!
//! Pages refer to templates by their string id. Resolution never fails
//! loudly: an unknown id yields `None`, which the view layer turns into an
//! explicit "template not found" placeholder.

/// Closed set of layout variants. Adding a layout means adding a variant
/// here and one entry to [`CATALOG`]; page and document code never branch on
/// specific templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Grid2,
    Grid3,
    Grid4,
    Single,
    Cover,
}

/// Grid arrangement of a template's image slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrangement {
    pub columns: usize,
    pub rows: usize,
}

impl Arrangement {
    pub fn slot_count(&self) -> usize {
        self.columns * self.rows
    }
}

impl TemplateKind {
    /// Slot arrangement for this layout.
    pub fn arrangement(self) -> Arrangement {
        match self {
            TemplateKind::Grid2 => Arrangement { columns: 2, rows: 1 },
            TemplateKind::Grid3 => Arrangement { columns: 3, rows: 1 },
            TemplateKind::Grid4 => Arrangement { columns: 2, rows: 2 },
            TemplateKind::Single | TemplateKind::Cover => Arrangement { columns: 1, rows: 1 },
        }
    }

    /// Only the cover layout carries a text overlay.
    pub fn has_overlay_region(self) -> bool {
        matches!(self, TemplateKind::Cover)
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: TemplateKind,
}

impl Template {
    const fn new(id: &'static str, label: &'static str, kind: TemplateKind) -> Self {
        Self { id, label, kind }
    }

    /// Number of image placeholders the layout renders.
    pub fn slot_count(&self) -> usize {
        self.kind.arrangement().slot_count()
    }

    pub fn has_overlay_region(&self) -> bool {
        self.kind.has_overlay_region()
    }
}

/// All registered templates in registration order. The first entry is the
/// default for new pages.
pub const CATALOG: &[Template] = &[
    Template::new("grid-2", "Two-up grid", TemplateKind::Grid2),
    Template::new("grid-3", "Three-up grid", TemplateKind::Grid3),
    Template::new("grid-4", "Four-up grid", TemplateKind::Grid4),
    Template::new("single", "Single image", TemplateKind::Single),
    Template::new("cover", "Cover with text overlay", TemplateKind::Cover),
];

/// Look up a template by id.
pub fn resolve(template_id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == template_id)
}

/// The template assigned to newly added pages.
pub fn default_template() -> &'static Template {
    &CATALOG[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_registered_id() {
        for template in CATALOG {
            assert_eq!(resolve(template.id), Some(template));
        }
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(resolve("grid-9").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("Cover").is_none(), "ids are case-sensitive");
    }

    #[test]
    fn default_is_first_entry() {
        assert_eq!(default_template().id, "grid-2");
    }

    #[test]
    fn only_cover_has_overlay_region() {
        let with_overlay: Vec<_> = CATALOG
            .iter()
            .filter(|t| t.has_overlay_region())
            .map(|t| t.id)
            .collect();
        assert_eq!(with_overlay, vec!["cover"]);
    }

    #[test]
    fn slot_counts() {
        let counts: Vec<_> = CATALOG.iter().map(|t| (t.id, t.slot_count())).collect();
        assert_eq!(
            counts,
            vec![("grid-2", 2), ("grid-3", 3), ("grid-4", 4), ("single", 1), ("cover", 1)]
        );
    }
}
