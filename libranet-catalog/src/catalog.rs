//! Catalog state and the mutating operations: add, borrow, return, remove.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use libranet_core::{CatalogError, CatalogItem, DEFAULT_FINE_RATE, ItemKind, NewItem};

/// Append-only record of one borrowing, captured when the loan begins.
///
/// Records snapshot the item's identity at borrow time, so a borrower's
/// history survives later removal of the item from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub item_id: u32,
    pub title: String,
    pub author: String,
    pub kind: ItemKind,
    pub borrower: String,
    pub borrowed_on: NaiveDate,
    pub due_on: NaiveDate,
}

/// Owns the item collection and all lending bookkeeping.
///
/// Ids are assigned here, sequentially from 1, and are never reused even
/// after removal. The fine rate is fixed at construction and threaded
/// through every fine computation.
#[derive(Debug)]
pub struct LibraryCatalog {
    pub(crate) items: HashMap<u32, CatalogItem>,
    pub(crate) history: HashMap<String, Vec<LoanRecord>>,
    pub(crate) fines: HashMap<String, f64>,
    next_id: u32,
    pub(crate) fine_rate: f64,
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryCatalog {
    /// Create an empty catalog with the default fine rate.
    pub fn new() -> Self {
        Self::with_fine_rate(DEFAULT_FINE_RATE)
    }

    /// Create an empty catalog charging `fine_rate` per overdue day.
    pub fn with_fine_rate(fine_rate: f64) -> Self {
        Self {
            items: HashMap::new(),
            history: HashMap::new(),
            fines: HashMap::new(),
            next_id: 1,
            fine_rate,
        }
    }

    /// The fine rate charged per overdue day.
    pub fn fine_rate(&self) -> f64 {
        self.fine_rate
    }

    /// Add a draft to the catalog, assigning the next sequential id.
    ///
    /// Returns the assigned id. Ids strictly increase across the life of
    /// the catalog regardless of removals.
    pub fn add_item(&mut self, draft: NewItem) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("cataloged item {id}: '{}' ({})", draft.title(), draft.details().kind());
        self.items.insert(id, draft.into_item(id));
        id
    }

    /// Check an item out using today's date.
    pub fn borrow_item(
        &mut self,
        id: u32,
        borrower: &str,
        term_spec: &str,
    ) -> Result<(), CatalogError> {
        self.borrow_item_on(id, borrower, term_spec, Local::now().date_naive())
    }

    /// Check item `id` out to `borrower` for the given term, dated `today`.
    ///
    /// Unknown ids fail with `InvalidArgument`; item-level failures
    /// (already on loan, blank borrower, unparseable term) propagate
    /// unchanged. On success the loan is appended to the borrower's
    /// history under the trimmed name.
    pub fn borrow_item_on(
        &mut self,
        id: u32,
        borrower: &str,
        term_spec: &str,
        today: NaiveDate,
    ) -> Result<(), CatalogError> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(CatalogError::ItemNotFound(id))?;
        let loan = item.borrow_on(borrower, term_spec, today)?.clone();

        let record = LoanRecord {
            item_id: id,
            title: item.title().to_string(),
            author: item.author().to_string(),
            kind: item.kind(),
            borrower: loan.borrower.clone(),
            borrowed_on: loan.borrowed_on,
            due_on: loan.due_on,
        };
        log::debug!(
            "item {id} checked out to '{}' until {}",
            record.borrower,
            record.due_on
        );
        self.history
            .entry(record.borrower.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Return an item using today's date.
    pub fn return_item(&mut self, id: u32) -> Result<f64, CatalogError> {
        self.return_item_on(id, Local::now().date_naive())
    }

    /// Return item `id`, settling any fine as of `today`.
    ///
    /// This is the single transactional return operation: the fine is
    /// computed from the loan before the item clears it, any positive
    /// amount is added to the borrower's accumulated total, and the amount
    /// charged is returned to the caller.
    pub fn return_item_on(&mut self, id: u32, today: NaiveDate) -> Result<f64, CatalogError> {
        let rate = self.fine_rate;
        let item = self
            .items
            .get_mut(&id)
            .ok_or(CatalogError::ItemNotFound(id))?;
        let loan = item.give_back()?;

        let fine = loan.fine_on(today, rate);
        if fine > 0.0 {
            log::debug!(
                "item {id} returned {} days late by '{}', fine {fine:.2}",
                loan.overdue_days(today),
                loan.borrower
            );
            *self.fines.entry(loan.borrower).or_insert(0.0) += fine;
        } else {
            log::debug!("item {id} returned on time by '{}'", loan.borrower);
        }
        Ok(fine)
    }

    /// Remove an item from the catalog.
    ///
    /// Returns `Ok(false)` when no such id exists, and fails with
    /// `InvalidState` (leaving the catalog unchanged) while the item is on
    /// loan. Borrower history keeps its records for removed items.
    pub fn remove_item(&mut self, id: u32) -> Result<bool, CatalogError> {
        match self.items.get(&id) {
            None => Ok(false),
            Some(item) if !item.is_available() => Err(CatalogError::RemoveWhileOnLoan(id)),
            Some(_) => {
                self.items.remove(&id);
                log::debug!("removed item {id}");
                Ok(true)
            }
        }
    }
}
