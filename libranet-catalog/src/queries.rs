//! Read queries over the catalog.
//!
//! Every query scans the item collection and returns fresh copies sorted
//! by id; callers never receive a handle into internal storage they could
//! use to corrupt it.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use libranet_core::{CatalogItem, ItemKind};

use crate::catalog::{LibraryCatalog, LoanRecord};

/// Aggregate counts for the whole catalog.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub total_items: usize,
    pub available_items: usize,
    pub borrowed_items: usize,
    pub overdue_items: usize,
    pub books: usize,
    pub audiobooks: usize,
    pub e_magazines: usize,
    /// Sum of all fines owed across borrowers.
    pub total_outstanding_fines: f64,
    /// Distinct borrowers who have ever checked anything out.
    pub total_borrowers: usize,
}

impl LibraryCatalog {
    fn collect_sorted<F>(&self, keep: F) -> Vec<CatalogItem>
    where
        F: Fn(&CatalogItem) -> bool,
    {
        let mut found: Vec<CatalogItem> = self.items.values().filter(|i| keep(i)).cloned().collect();
        found.sort_by_key(CatalogItem::id);
        found
    }

    /// Items whose title contains `query`, case-insensitively.
    /// A blank query matches nothing.
    pub fn search_by_title(&self, query: &str) -> Vec<CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.collect_sorted(|item| item.title().to_lowercase().contains(&needle))
    }

    /// Items whose author contains `query`, case-insensitively.
    /// A blank query matches nothing.
    pub fn search_by_author(&self, query: &str) -> Vec<CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.collect_sorted(|item| item.author().to_lowercase().contains(&needle))
    }

    /// Items of the named kind. Accepts the canonical tag or any alias,
    /// case-insensitively; blank or unrecognized input matches nothing.
    pub fn items_by_kind(&self, kind: &str) -> Vec<CatalogItem> {
        match ItemKind::from_str_loose(kind) {
            None => Vec::new(),
            Some(kind) => self.collect_sorted(|item| item.kind() == kind),
        }
    }

    /// Items currently on the shelf.
    pub fn available_items(&self) -> Vec<CatalogItem> {
        self.collect_sorted(CatalogItem::is_available)
    }

    /// Items currently checked out.
    pub fn borrowed_items(&self) -> Vec<CatalogItem> {
        self.collect_sorted(|item| !item.is_available())
    }

    /// Checked-out items that have accrued a fine as of today.
    pub fn overdue_items(&self) -> Vec<CatalogItem> {
        self.overdue_items_on(Local::now().date_naive())
    }

    /// Checked-out items that have accrued a fine as of `today`.
    pub fn overdue_items_on(&self, today: NaiveDate) -> Vec<CatalogItem> {
        let rate = self.fine_rate;
        self.collect_sorted(|item| item.fine_on(today, rate) > 0.0)
    }

    /// Accumulated fine total for a borrower, 0 if none recorded.
    pub fn borrower_fine(&self, name: &str) -> f64 {
        self.fines.get(name.trim()).copied().unwrap_or(0.0)
    }

    /// Snapshot of the full borrower-to-fine mapping.
    pub fn all_fines(&self) -> HashMap<String, f64> {
        self.fines.clone()
    }

    /// Everything a borrower has ever checked out, oldest first,
    /// including loans still open and items since removed.
    pub fn borrower_history(&self, name: &str) -> Vec<LoanRecord> {
        self.history.get(name.trim()).cloned().unwrap_or_default()
    }

    /// The item with the given id, if present.
    pub fn item(&self, id: u32) -> Option<&CatalogItem> {
        self.items.get(&id)
    }

    /// Copies of every item, sorted by id.
    pub fn all_items(&self) -> Vec<CatalogItem> {
        self.collect_sorted(|_| true)
    }

    /// Number of items currently in the catalog.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Aggregate statistics as of today.
    pub fn statistics(&self) -> LibraryStats {
        self.statistics_on(Local::now().date_naive())
    }

    /// Aggregate statistics as of `today`.
    pub fn statistics_on(&self, today: NaiveDate) -> LibraryStats {
        let total_items = self.items.len();
        let available_items = self.items.values().filter(|i| i.is_available()).count();
        let overdue_items = self
            .items
            .values()
            .filter(|i| i.fine_on(today, self.fine_rate) > 0.0)
            .count();
        let count_kind =
            |kind: ItemKind| self.items.values().filter(|i| i.kind() == kind).count();

        LibraryStats {
            total_items,
            available_items,
            borrowed_items: total_items - available_items,
            overdue_items,
            books: count_kind(ItemKind::Book),
            audiobooks: count_kind(ItemKind::Audiobook),
            e_magazines: count_kind(ItemKind::EMagazine),
            total_outstanding_fines: self.fines.values().sum(),
            total_borrowers: self.history.len(),
        }
    }
}
