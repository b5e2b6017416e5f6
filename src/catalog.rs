//! Category labels and icons.
//!
//! The site ships five categories, but the mapping is plain data: a config
//! file may replace it, and categories missing from it still render with the
//! fallback icon and their raw value as label.

use serde::Deserialize;

/// Filter value that matches every article.
pub const ALL_CATEGORY: &str = "all";

/// Icon for categories the catalog does not know.
pub const FALLBACK_ICON: &str = "📝";

const ALL_LABEL: &str = "Все";

/// A known category: its filter value, display label and card icon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl CategoryEntry {
    pub fn new(id: &str, label: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
        }
    }
}

/// Ordered category → label/icon lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<CategoryEntry>,
    fallback_icon: String,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::traffy()
    }
}

impl CategoryCatalog {
    pub fn new(entries: Vec<CategoryEntry>, fallback_icon: impl Into<String>) -> Self {
        Self {
            entries,
            fallback_icon: fallback_icon.into(),
        }
    }

    /// The categories the TRAFFY blog publishes under.
    pub fn traffy() -> Self {
        Self::new(
            vec![
                CategoryEntry::new("telegram-ads", "Telegram Ads", "📢"),
                CategoryEntry::new("mini-apps", "Mini Apps", "📱"),
                CategoryEntry::new("traffic", "Трафик", "📊"),
                CategoryEntry::new("cases", "Кейсы", "💼"),
                CategoryEntry::new("guides", "Гайды", "📚"),
            ],
            FALLBACK_ICON,
        )
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    fn find(&self, category: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.id == category)
    }

    /// Display label; unknown categories are shown verbatim.
    pub fn label<'a>(&'a self, category: &'a str) -> &'a str {
        self.find(category)
            .map(|e| e.label.as_str())
            .unwrap_or(category)
    }

    pub fn icon(&self, category: &str) -> &str {
        self.find(category)
            .and_then(|e| e.icon.as_deref())
            .unwrap_or(&self.fallback_icon)
    }

    /// Filter controls in display order: "all" first, then every entry.
    pub fn filters(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter {
            category: ALL_CATEGORY.to_string(),
            label: ALL_LABEL.to_string(),
        })
        .chain(self.entries.iter().map(|e| CategoryFilter {
            category: e.id.clone(),
            label: e.label.clone(),
        }))
        .collect()
    }
}

/// A category filter control, tagged with the value it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub category: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_lookup() {
        let catalog = CategoryCatalog::traffy();
        assert_eq!(catalog.label("traffic"), "Трафик");
        assert_eq!(catalog.icon("mini-apps"), "📱");
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let catalog = CategoryCatalog::traffy();
        assert_eq!(catalog.label("podcasts"), "podcasts");
        assert_eq!(catalog.icon("podcasts"), FALLBACK_ICON);
    }

    #[test]
    fn test_entry_without_icon_uses_fallback() {
        let catalog = CategoryCatalog::new(
            vec![CategoryEntry {
                id: "news".into(),
                label: "Новости".into(),
                icon: None,
            }],
            "*",
        );
        assert_eq!(catalog.label("news"), "Новости");
        assert_eq!(catalog.icon("news"), "*");
    }

    #[test]
    fn test_filters_start_with_all() {
        let filters = CategoryCatalog::traffy().filters();
        assert_eq!(filters.len(), 6);
        assert_eq!(filters[0].category, ALL_CATEGORY);
        assert_eq!(filters[1].category, "telegram-ads");
        assert_eq!(filters[5].category, "guides");
    }
}
