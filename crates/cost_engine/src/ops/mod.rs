use crate::{Classify, Expense, ExpenseCategory, ExpenseClass, StandardClassification, amortization};

mod aggregate;
mod performance;
mod sales;
mod trend;
mod unit_cost;

pub use performance::performance_status;
pub use sales::{quantity_sold, sale_margin};
pub use unit_cost::cost_per_unit;

/// Relative gap under which a positive margin is still considered fragile.
pub const FRAGILE_MARGIN_RATIO: f64 = 0.05;

/// Cost-accounting engine.
///
/// Holds the category classification; every other input (expenses, periods,
/// amortization duration, quantities) is passed to each call. All operations
/// are pure and take `&self`, so one engine can be shared freely across
/// threads.
#[derive(Clone, Debug, Default)]
pub struct CostEngine<C = StandardClassification> {
    classifier: C,
}

impl CostEngine {
    /// Return a builder for `CostEngine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<C: Classify> CostEngine<C> {
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Class of `category` under this engine's classification.
    pub fn classify(&self, category: ExpenseCategory) -> ExpenseClass {
        self.classifier.classify(category)
    }

    pub fn is_capital(&self, category: ExpenseCategory) -> bool {
        self.classifier.is_capital(category)
    }

    /// Constant monthly amortization of `expense`.
    ///
    /// 0 for operating expenses, which are expensed in their own period, and
    /// for a non-positive `duration_months`. Otherwise
    /// `amount / duration_months`, unrounded.
    pub fn monthly_amortization(&self, expense: &Expense, duration_months: i32) -> f64 {
        if !self.is_capital(expense.category) {
            return 0.0;
        }
        amortization::monthly_rate(expense.amount, duration_months)
    }

    /// Expenses of `class`. Records with a negative or non-finite amount are
    /// logged and skipped.
    fn expenses_of<'a>(
        &'a self,
        expenses: &'a [Expense],
        class: ExpenseClass,
    ) -> impl Iterator<Item = &'a Expense> + 'a {
        expenses.iter().filter(move |expense| {
            if self.classify(expense.category) != class {
                return false;
            }
            if !expense.has_usable_amount() {
                tracing::warn!(
                    "skipping expense {} with invalid amount {}",
                    expense.id,
                    expense.amount
                );
                return false;
            }
            true
        })
    }
}

/// The builder for `CostEngine`
#[derive(Debug)]
pub struct EngineBuilder<C = StandardClassification> {
    classifier: C,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            classifier: StandardClassification,
        }
    }
}

impl<C: Classify> EngineBuilder<C> {
    /// Replace the category classification
    pub fn classifier<D: Classify>(self, classifier: D) -> EngineBuilder<D> {
        EngineBuilder { classifier }
    }

    /// Construct `CostEngine`
    pub fn build(self) -> CostEngine<C> {
        CostEngine {
            classifier: self.classifier,
        }
    }
}
