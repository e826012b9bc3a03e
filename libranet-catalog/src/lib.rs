//! In-memory catalog manager for the libranet lending library.
//!
//! Owns the item collection, assigns ids, delegates lending transitions to
//! the items, and keeps borrower history and accumulated fines. Queries
//! live in [`queries`] and always hand back fresh copies, never references
//! into internal storage.

pub mod catalog;
pub mod queries;

pub use catalog::{LibraryCatalog, LoanRecord};
pub use queries::LibraryStats;
