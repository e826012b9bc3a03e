//! Data model and lending state machine for the libranet catalog.
//!
//! This crate defines the lendable item entity, its variant payloads
//! (book, audiobook, e-magazine), loan-term parsing, and fine accrual,
//! without any catalog-level bookkeeping. Consumers pass these types to
//! `libranet-catalog` for orchestration and queries.

pub mod details;
pub mod error;
pub mod item;
pub mod kind;
pub mod term;

pub use details::{AudiobookDetails, BookDetails, ItemDetails, MagazineDetails, Playable};
pub use error::{CatalogError, ErrorKind};
pub use item::{CatalogItem, DEFAULT_FINE_RATE, Loan, NewItem};
pub use kind::{ItemKind, KindParseError};
pub use term::LoanTerm;
