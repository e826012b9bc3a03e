//! The lendable item entity and its borrow/return state machine.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::details::ItemDetails;
use crate::error::CatalogError;
use crate::kind::ItemKind;
use crate::term::LoanTerm;

/// Default fine rate, in currency units per overdue day.
///
/// The catalog threads its own rate through fine computation, so this is
/// only the fallback used when no rate is configured.
pub const DEFAULT_FINE_RATE: f64 = 10.0;

/// An active loan on a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub borrower: String,
    pub borrowed_on: NaiveDate,
    pub due_on: NaiveDate,
}

impl Loan {
    /// Whole days past due as of `today`; zero when not yet due.
    pub fn overdue_days(&self, today: NaiveDate) -> i64 {
        (today - self.due_on).num_days().max(0)
    }

    /// Fine accrued as of `today` at the given daily rate.
    ///
    /// Pure function of the dates: repeated calls on the same day yield
    /// the same amount, and the amount grows as days pass.
    pub fn fine_on(&self, today: NaiveDate, daily_rate: f64) -> f64 {
        self.overdue_days(today) as f64 * daily_rate
    }
}

/// A validated item draft that has not been cataloged yet.
///
/// Drafts carry no id; ids are assigned solely by the catalog when the
/// draft is added.
#[derive(Debug, Clone)]
pub struct NewItem {
    title: String,
    author: String,
    details: ItemDetails,
}

impl NewItem {
    /// Create a draft, validating that title and author are non-blank.
    /// Both are stored trimmed.
    pub fn new(title: &str, author: &str, details: ItemDetails) -> Result<Self, CatalogError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::blank("title"));
        }
        let author = author.trim();
        if author.is_empty() {
            return Err(CatalogError::blank("author"));
        }
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            details,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    /// Attach a catalog-assigned id, producing the cataloged item.
    pub fn into_item(self, id: u32) -> CatalogItem {
        CatalogItem {
            id,
            title: self.title,
            author: self.author,
            details: self.details,
            loan: None,
        }
    }
}

/// One cataloged, lendable item.
///
/// The item owns its own availability state: it is available exactly when
/// `loan` is `None`. All transitions go through [`borrow_on`] and
/// [`give_back`], which validate before mutating.
///
/// [`borrow_on`]: CatalogItem::borrow_on
/// [`give_back`]: CatalogItem::give_back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    id: u32,
    title: String,
    author: String,
    details: ItemDetails,
    loan: Option<Loan>,
}

impl CatalogItem {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    /// Mutable access to the variant payload (e.g. to archive a magazine
    /// issue or append articles). Lending state is not reachable this way.
    pub fn details_mut(&mut self) -> &mut ItemDetails {
        &mut self.details
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    /// The active loan, if the item is checked out.
    pub fn loan(&self) -> Option<&Loan> {
        self.loan.as_ref()
    }

    /// Check the item out using today's date.
    pub fn borrow(&mut self, borrower: &str, term_spec: &str) -> Result<&Loan, CatalogError> {
        self.borrow_on(borrower, term_spec, Local::now().date_naive())
    }

    /// Check the item out to `borrower` for the given term, dated `today`.
    ///
    /// Fails with `InvalidState` when the item is already on loan, and with
    /// `InvalidArgument` when the borrower name is blank or the term does
    /// not parse. Nothing is mutated on failure.
    pub fn borrow_on(
        &mut self,
        borrower: &str,
        term_spec: &str,
        today: NaiveDate,
    ) -> Result<&Loan, CatalogError> {
        if self.loan.is_some() {
            return Err(CatalogError::AlreadyOnLoan(self.id));
        }
        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(CatalogError::blank("borrower name"));
        }
        let term: LoanTerm = term_spec.parse()?;
        let due_on = today
            .checked_add_days(Days::new(u64::from(term.days())))
            .ok_or_else(|| CatalogError::bad_term(term_spec, "due date out of range"))?;

        Ok(self.loan.insert(Loan {
            borrower: borrower.to_string(),
            borrowed_on: today,
            due_on,
        }))
    }

    /// End the loan, returning it so the caller can settle any fine.
    ///
    /// The loan carries everything fine computation needs, so callers who
    /// return first cannot lose the fine by accident.
    pub fn give_back(&mut self) -> Result<Loan, CatalogError> {
        self.loan.take().ok_or(CatalogError::NotOnLoan(self.id))
    }

    /// Fine accrued as of today at the given daily rate; 0 when available.
    pub fn fine(&self, daily_rate: f64) -> f64 {
        self.fine_on(Local::now().date_naive(), daily_rate)
    }

    /// Fine accrued as of `today` at the given daily rate; 0 when available.
    pub fn fine_on(&self, today: NaiveDate, daily_rate: f64) -> f64 {
        self.loan
            .as_ref()
            .map_or(0.0, |loan| loan.fine_on(today, daily_rate))
    }
}

impl std::fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [ID: {}, Title: {}, Author: {}, Available: {}",
            self.kind(),
            self.id,
            self.title,
            self.author,
            self.is_available()
        )?;
        if let Some(loan) = &self.loan {
            write!(f, ", Borrower: {}, Due: {}", loan.borrower, loan.due_on)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::BookDetails;
    use crate::error::ErrorKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item() -> CatalogItem {
        let details = ItemDetails::Book(
            BookDetails::new(218, "978-0-7432-7356-5", "Fiction", "Scribner", 1925).unwrap(),
        );
        NewItem::new("The Great Gatsby", "F. Scott Fitzgerald", details)
            .unwrap()
            .into_item(1)
    }

    #[test]
    fn new_items_start_available_with_no_loan() {
        let item = item();
        assert!(item.is_available());
        assert!(item.loan().is_none());
    }

    #[test]
    fn draft_rejects_blank_title_and_author() {
        let details = ItemDetails::Book(
            BookDetails::new(218, "978-0", "Fiction", "Scribner", 1925).unwrap(),
        );
        assert!(NewItem::new("  ", "Fitzgerald", details.clone()).is_err());
        assert!(NewItem::new("Gatsby", "", details).is_err());
    }

    #[test]
    fn draft_trims_title_and_author() {
        let details = ItemDetails::Book(
            BookDetails::new(218, "978-0", "Fiction", "Scribner", 1925).unwrap(),
        );
        let item = NewItem::new("  Gatsby  ", " Fitzgerald ", details)
            .unwrap()
            .into_item(3);
        assert_eq!(item.title(), "Gatsby");
        assert_eq!(item.author(), "Fitzgerald");
    }

    #[test]
    fn borrow_records_trimmed_borrower_and_due_date() {
        let mut item = item();
        let today = date(2026, 8, 1);
        item.borrow_on("  Alice  ", "7 days", today).unwrap();

        assert!(!item.is_available());
        let loan = item.loan().unwrap();
        assert_eq!(loan.borrower, "Alice");
        assert_eq!(loan.borrowed_on, today);
        assert_eq!(loan.due_on, date(2026, 8, 8));
    }

    #[test]
    fn borrow_while_on_loan_is_invalid_state() {
        let mut item = item();
        item.borrow_on("Alice", "7 days", date(2026, 8, 1)).unwrap();
        let err = item
            .borrow_on("Bob", "7 days", date(2026, 8, 2))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        // the original loan is untouched
        assert_eq!(item.loan().unwrap().borrower, "Alice");
    }

    #[test]
    fn borrow_with_blank_borrower_or_bad_term_is_invalid_argument() {
        let mut item = item();
        let today = date(2026, 8, 1);

        let err = item.borrow_on("   ", "7 days", today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = item.borrow_on("Alice", "7 fortnights", today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // neither failure touched the state
        assert!(item.is_available());
    }

    #[test]
    fn give_back_restores_the_pre_borrow_state() {
        let mut item = item();
        item.borrow_on("Alice", "2 weeks", date(2026, 8, 1)).unwrap();

        let loan = item.give_back().unwrap();
        assert_eq!(loan.borrower, "Alice");
        assert_eq!(loan.due_on, date(2026, 8, 15));
        assert!(item.is_available());
        assert!(item.loan().is_none());
    }

    #[test]
    fn give_back_while_available_is_invalid_state() {
        let mut item = item();
        let err = item.give_back().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn fine_is_zero_until_the_due_date_passes() {
        let mut item = item();
        item.borrow_on("Alice", "7 days", date(2026, 8, 1)).unwrap();

        assert_eq!(item.fine_on(date(2026, 8, 1), 10.0), 0.0);
        assert_eq!(item.fine_on(date(2026, 8, 8), 10.0), 0.0);
    }

    #[test]
    fn fine_accrues_per_overdue_day() {
        let mut item = item();
        item.borrow_on("Alice", "7 days", date(2026, 8, 1)).unwrap();

        assert_eq!(item.fine_on(date(2026, 8, 9), 10.0), 10.0);
        assert_eq!(item.fine_on(date(2026, 8, 13), 10.0), 50.0);
        // the rate is threaded in, not fixed
        assert_eq!(item.fine_on(date(2026, 8, 13), 2.5), 12.5);
    }

    #[test]
    fn fine_is_zero_while_available() {
        let item = item();
        assert_eq!(item.fine_on(date(2030, 1, 1), 10.0), 0.0);
    }

    #[test]
    fn month_terms_use_the_flat_thirty_day_approximation() {
        let mut item = item();
        item.borrow_on("Alice", "1 month", date(2026, 2, 1)).unwrap();
        assert_eq!(item.loan().unwrap().due_on, date(2026, 3, 3));
    }

    #[test]
    fn variant_payload_is_editable_through_the_item() {
        let details = ItemDetails::EMagazine(
            crate::details::MagazineDetails::new(
                12,
                "Condé Nast",
                "Science",
                date(2024, 3, 1),
                96,
                "",
            )
            .unwrap(),
        );
        let mut item = NewItem::new("Wired", "Editorial Staff", details)
            .unwrap()
            .into_item(1);

        if let ItemDetails::EMagazine(mag) = item.details_mut() {
            mag.add_article("The Quiet Ocean").unwrap();
            mag.archive().unwrap();
        }
        if let ItemDetails::EMagazine(mag) = item.details() {
            assert_eq!(mag.article_count(), 1);
            assert!(mag.is_archived());
        } else {
            panic!("expected an e-magazine payload");
        }
    }

    #[test]
    fn display_mentions_the_borrower_only_while_on_loan() {
        let mut item = item();
        assert!(!item.to_string().contains("Borrower"));
        item.borrow_on("Alice", "7 days", date(2026, 8, 1)).unwrap();
        assert!(item.to_string().contains("Borrower: Alice"));
    }
}
