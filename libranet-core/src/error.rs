use chrono::NaiveDate;
use thiserror::Error;

/// Broad classification of catalog failures.
///
/// Every [`CatalogError`] variant maps to exactly one kind: bad input
/// (`InvalidArgument`) or an operation incompatible with the current
/// lending state (`InvalidState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input.
    InvalidArgument,
    /// Operation incompatible with the current state.
    InvalidState,
}

/// Errors that can occur during item construction and catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required text field was empty or whitespace-only
    #[error("{field} cannot be empty")]
    BlankField { field: &'static str },

    /// A numeric field that must be strictly positive was not
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    /// Publication year outside the accepted range
    #[error("invalid publication year: {0}")]
    YearOutOfRange(i32),

    /// Publication date lies in the future
    #[error("publication date cannot be in the future: {0}")]
    FutureDate(NaiveDate),

    /// Loan term string could not be parsed
    #[error("invalid loan term '{input}': {reason}")]
    BadLoanTerm { input: String, reason: String },

    /// No item with the given id exists in the catalog
    #[error("no item with id {0}")]
    ItemNotFound(u32),

    /// Attempted to borrow an item that is already on loan
    #[error("item {0} is already on loan")]
    AlreadyOnLoan(u32),

    /// Attempted to return an item that is not on loan
    #[error("item {0} is not on loan")]
    NotOnLoan(u32),

    /// Attempted to remove an item while it is on loan
    #[error("cannot remove item {0} while it is on loan")]
    RemoveWhileOnLoan(u32),

    /// Attempted to archive an already-archived magazine issue
    #[error("issue {0} is already archived")]
    AlreadyArchived(u32),

    /// Attempted to unarchive an issue that is not archived
    #[error("issue {0} is not archived")]
    NotArchived(u32),
}

impl CatalogError {
    /// Classify this error as bad input vs. bad state.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BlankField { .. }
            | Self::NonPositive { .. }
            | Self::YearOutOfRange(_)
            | Self::FutureDate(_)
            | Self::BadLoanTerm { .. }
            | Self::ItemNotFound(_) => ErrorKind::InvalidArgument,

            Self::AlreadyOnLoan(_)
            | Self::NotOnLoan(_)
            | Self::RemoveWhileOnLoan(_)
            | Self::AlreadyArchived(_)
            | Self::NotArchived(_) => ErrorKind::InvalidState,
        }
    }

    pub fn blank(field: &'static str) -> Self {
        Self::BlankField { field }
    }

    pub fn bad_term(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadLoanTerm {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_kind() {
        assert_eq!(
            CatalogError::blank("title").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CatalogError::ItemNotFound(7).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CatalogError::AlreadyOnLoan(1).kind(), ErrorKind::InvalidState);
        assert_eq!(
            CatalogError::RemoveWhileOnLoan(1).kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(CatalogError::AlreadyArchived(3).kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn messages_name_the_offending_item() {
        let err = CatalogError::AlreadyOnLoan(42);
        assert_eq!(err.to_string(), "item 42 is already on loan");
    }
}
