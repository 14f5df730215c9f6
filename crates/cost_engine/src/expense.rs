//! The module contains the representation of a one-time expense.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ExpenseCategory, money::is_usable};

/// A one-time expense, as recorded by the farm.
///
/// Expenses are immutable facts: the engine only reads them. For capital
/// expenses `date` is also the start of the amortization clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        category: ExpenseCategory,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            amount,
            date,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Negative or non-finite amounts are skipped by aggregations.
    pub(crate) fn has_usable_amount(&self) -> bool {
        is_usable(self.amount)
    }
}
