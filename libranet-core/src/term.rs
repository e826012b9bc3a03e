use crate::error::CatalogError;

/// Days in a week, for `"N weeks"` terms.
const DAYS_PER_WEEK: u32 = 7;

/// Flat 30-day month. This matches the lending policy, not the calendar;
/// due dates derived from month terms are deliberately approximate.
const DAYS_PER_MONTH: u32 = 30;

/// A parsed loan term, stored as a whole number of days.
///
/// Parsed from strings of the form `"<positive integer> <unit>"` where the
/// unit is `day(s)`, `week(s)`, or `month(s)`, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerm {
    days: u32,
}

impl LoanTerm {
    /// The term length in days.
    pub fn days(&self) -> u32 {
        self.days
    }
}

impl std::str::FromStr for LoanTerm {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [amount, unit] = parts.as_slice() else {
            return Err(CatalogError::bad_term(
                s,
                "expected '<amount> <unit>' (e.g. '7 days')",
            ));
        };

        let amount: u32 = amount.parse().map_err(|_| {
            CatalogError::bad_term(s, format!("'{amount}' is not a positive whole number"))
        })?;
        if amount == 0 {
            return Err(CatalogError::bad_term(s, "amount must be positive"));
        }

        let per_unit = match unit.to_lowercase().as_str() {
            "day" | "days" => 1,
            "week" | "weeks" => DAYS_PER_WEEK,
            "month" | "months" => DAYS_PER_MONTH,
            other => {
                return Err(CatalogError::bad_term(s, format!("unknown unit '{other}'")));
            }
        };

        let days = amount
            .checked_mul(per_unit)
            .ok_or_else(|| CatalogError::bad_term(s, "term is too long"))?;
        Ok(LoanTerm { days })
    }
}

impl std::fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days == 1 {
            write!(f, "1 day")
        } else {
            write!(f, "{} days", self.days)
        }
    }
}
