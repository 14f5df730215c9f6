use std::collections::BTreeMap;

use crate::{
    AmortizedExpense, CategoryAmortizationSummary, Classify, Expense, ExpenseCategory,
    ExpenseClass, OpexCategorySummary, ReportingPeriod, amortization,
};

use super::CostEngine;

impl<C: Classify> CostEngine<C> {
    /// Sum of the operating expenses dated inside `period` (both ends
    /// included).
    pub fn total_opex(&self, expenses: &[Expense], period: &ReportingPeriod) -> f64 {
        self.expenses_of(expenses, ExpenseClass::Opex)
            .filter(|expense| period.contains(expense.date))
            .map(|expense| expense.amount)
            .sum()
    }

    /// Amortization charged to `period` by every capital expense whose window
    /// overlaps it: `monthly_amortization × active_months_in_period`.
    pub fn total_capex_amortization(
        &self,
        expenses: &[Expense],
        period: &ReportingPeriod,
        duration_months: i32,
    ) -> f64 {
        self.expenses_of(expenses, ExpenseClass::Capex)
            .filter(|expense| amortization::window_overlaps(expense, period, duration_months))
            .map(|expense| {
                let months = amortization::active_months_in_period(expense, period, duration_months);
                self.monthly_amortization(expense, duration_months) * f64::from(months)
            })
            .sum()
    }

    /// Capital expenses grouped by category, largest investment first.
    ///
    /// `monthly_amortization_total` is the steady-state monthly burn of the
    /// category, not scoped to any period. Categories without capital
    /// expenses do not appear.
    pub fn amortization_by_category(
        &self,
        expenses: &[Expense],
        duration_months: i32,
    ) -> Vec<CategoryAmortizationSummary> {
        let mut groups: BTreeMap<ExpenseCategory, Vec<&Expense>> = BTreeMap::new();
        for expense in self.expenses_of(expenses, ExpenseClass::Capex) {
            groups.entry(expense.category).or_default().push(expense);
        }

        let mut summaries: Vec<CategoryAmortizationSummary> = groups
            .into_iter()
            .map(|(category, group)| {
                let details: Vec<AmortizedExpense> = group
                    .iter()
                    .map(|expense| AmortizedExpense {
                        id: expense.id.clone(),
                        label: expense.label.clone(),
                        amount: expense.amount,
                        date: expense.date,
                        monthly_amortization: self.monthly_amortization(expense, duration_months),
                        amortization_end_date: amortization::amortization_end_date(
                            expense,
                            duration_months,
                        ),
                    })
                    .collect();

                CategoryAmortizationSummary {
                    category,
                    total_invested: details.iter().map(|d| d.amount).sum(),
                    monthly_amortization_total: details.iter().map(|d| d.monthly_amortization).sum(),
                    expense_count: details.len(),
                    expenses: details,
                }
            })
            .collect();

        summaries.sort_by(|a, b| b.total_invested.total_cmp(&a.total_invested));
        summaries
    }

    /// Operating expenses of `period` grouped by category, largest first.
    pub fn opex_by_category(
        &self,
        expenses: &[Expense],
        period: &ReportingPeriod,
    ) -> Vec<OpexCategorySummary> {
        let mut groups: BTreeMap<ExpenseCategory, (f64, usize)> = BTreeMap::new();
        for expense in self
            .expenses_of(expenses, ExpenseClass::Opex)
            .filter(|expense| period.contains(expense.date))
        {
            let (total, count) = groups.entry(expense.category).or_default();
            *total += expense.amount;
            *count += 1;
        }

        let period_total: f64 = groups.values().map(|(total, _)| total).sum();
        let mut summaries: Vec<OpexCategorySummary> = groups
            .into_iter()
            .map(|(category, (total, expense_count))| OpexCategorySummary {
                category,
                total,
                expense_count,
                share_percent: if period_total > 0.0 {
                    total / period_total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        summaries.sort_by(|a, b| b.total.total_cmp(&a.total));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> CostEngine {
        CostEngine::builder().build()
    }

    fn ledger() -> Vec<Expense> {
        vec![
            Expense::new("feed-jan", ExpenseCategory::Feed, 100_000.0, date(2024, 1, 10)),
            Expense::new("vacc-jan", ExpenseCategory::Vaccines, 20_000.0, date(2024, 1, 31)),
            Expense::new("feed-feb", ExpenseCategory::Feed, 80_000.0, date(2024, 2, 1)),
            Expense::new("tractor", ExpenseCategory::HeavyEquipment, 360_000.0, date(2024, 1, 1))
                .with_label("Tracteur"),
            Expense::new("barn", ExpenseCategory::BuildingFitout, 720_000.0, date(2023, 7, 15)),
            Expense::new("boar", ExpenseCategory::BreedingStockPurchase, 150_000.0, date(2024, 1, 20)),
            Expense::new("sow", ExpenseCategory::BreedingStockPurchase, 90_000.0, date(2024, 2, 5)),
        ]
    }

    #[test]
    fn total_opex_uses_inclusive_bounds() {
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        assert_eq!(engine().total_opex(&ledger(), &jan), 120_000.0);
        let feb = ReportingPeriod::month(2024, 2).unwrap();
        assert_eq!(engine().total_opex(&ledger(), &feb), 80_000.0);
    }

    #[test]
    fn total_opex_skips_invalid_amounts() {
        let mut expenses = ledger();
        expenses.push(Expense::new("bad", ExpenseCategory::Feed, f64::NAN, date(2024, 1, 12)));
        expenses.push(Expense::new("neg", ExpenseCategory::Feed, -10.0, date(2024, 1, 12)));
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        assert_eq!(engine().total_opex(&expenses, &jan), 120_000.0);
    }

    #[test]
    fn capex_amortization_for_january() {
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        // tractor and barn charge one month each, the boar bought on the 20th
        // too; the sow is bought after the period.
        let expected = 10_000.0 + 20_000.0 + 150_000.0 / 36.0;
        let total = engine().total_capex_amortization(&ledger(), &jan, 36);
        assert!((total - expected).abs() < 1e-6);
    }

    #[test]
    fn capex_amortization_over_a_quarter() {
        let q1 = ReportingPeriod::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        let tractor = [ledger()[3].clone()];
        // 2024-01-01 .. 2024-03-31 holds two whole months.
        assert_eq!(engine().total_capex_amortization(&tractor, &q1, 36), 20_000.0);
    }

    #[test]
    fn capex_amortization_ignores_operating_expenses() {
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        let only_opex = &ledger()[..3];
        assert_eq!(engine().total_capex_amortization(only_opex, &jan, 36), 0.0);
    }

    #[test]
    fn capex_amortization_is_zero_without_duration() {
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        assert_eq!(engine().total_capex_amortization(&ledger(), &jan, 0), 0.0);
    }

    #[test]
    fn by_category_groups_and_sorts_descending() {
        let summaries = engine().amortization_by_category(&ledger(), 36);
        let categories: Vec<_> = summaries.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                ExpenseCategory::BuildingFitout,
                ExpenseCategory::HeavyEquipment,
                ExpenseCategory::BreedingStockPurchase,
            ]
        );

        let breeding = &summaries[2];
        assert_eq!(breeding.total_invested, 240_000.0);
        assert_eq!(breeding.expense_count, 2);
        assert!((breeding.monthly_amortization_total - 240_000.0 / 36.0).abs() < 1e-9);

        let tractor = &summaries[1].expenses[0];
        assert_eq!(tractor.label.as_deref(), Some("Tracteur"));
        assert_eq!(tractor.monthly_amortization, 10_000.0);
        assert_eq!(tractor.amortization_end_date, date(2027, 1, 1));
    }

    #[test]
    fn by_category_is_empty_without_capex() {
        let summaries = engine().amortization_by_category(&ledger()[..3], 36);
        assert!(summaries.is_empty());
    }

    #[test]
    fn opex_by_category_shares() {
        let jan = ReportingPeriod::month(2024, 1).unwrap();
        let summaries = engine().opex_by_category(&ledger(), &jan);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category, ExpenseCategory::Feed);
        assert_eq!(summaries[0].expense_count, 1);
        assert!((summaries[0].share_percent - 100_000.0 / 120_000.0 * 100.0).abs() < 1e-9);
        assert_eq!(summaries[1].category, ExpenseCategory::Vaccines);
    }

    #[test]
    fn opex_by_category_empty_period() {
        let dec = ReportingPeriod::month(2023, 12).unwrap();
        assert!(engine().opex_by_category(&ledger(), &dec).is_empty());
    }
}
