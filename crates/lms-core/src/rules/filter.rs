//! Remote-side selection of catalog entries

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{CatalogCategory, CatalogEntry, RemoteCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    All,
    /// Category title to selected entry ids
    Only(BTreeMap<String, BTreeSet<String>>),
}

/// Which remote entries are requested for download.
///
/// Produced by [`compile_rules`](super::compile_rules) and applied to the
/// catalog by the session collaborator before the archive is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFilter {
    selection: Selection,
}

impl RemoteFilter {
    /// A filter passing every category and entry through.
    pub fn all() -> Self {
        Self {
            selection: Selection::All,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self.selection, Selection::All)
    }

    pub fn includes(&self, category: &CatalogCategory, entry: &CatalogEntry) -> bool {
        match &self.selection {
            Selection::All => true,
            Selection::Only(kept) => kept
                .get(&category.title)
                .is_some_and(|ids| ids.contains(&entry.id)),
        }
    }

    /// The selected part of `catalog`. Categories left without entries
    /// are dropped.
    pub fn apply(&self, catalog: &RemoteCatalog) -> RemoteCatalog {
        let categories = catalog
            .categories
            .iter()
            .filter_map(|category| {
                let entries: Vec<CatalogEntry> = category
                    .entries
                    .iter()
                    .filter(|entry| self.includes(category, entry))
                    .cloned()
                    .collect();
                if entries.is_empty() {
                    None
                } else {
                    Some(CatalogCategory::new(category.title.clone(), entries))
                }
            })
            .collect();
        RemoteCatalog::new(categories)
    }
}

/// Accumulates the entries a compiler arm decides to keep.
#[derive(Debug, Default)]
pub struct SelectionBuilder {
    kept: BTreeMap<String, BTreeSet<String>>,
}

impl SelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&mut self, category: &CatalogCategory, entry: &CatalogEntry) {
        self.kept
            .entry(category.title.clone())
            .or_default()
            .insert(entry.id.clone());
    }

    pub fn build(self) -> RemoteFilter {
        RemoteFilter {
            selection: Selection::Only(self.kept),
        }
    }
}
