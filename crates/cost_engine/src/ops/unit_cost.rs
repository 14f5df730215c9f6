use crate::{Classify, CostPeriodSummary, Expense, ReportingPeriod};

use super::CostEngine;

/// `total_cost / quantity_sold`, or 0 when nothing was sold.
///
/// A zero (or invalid) quantity is a legitimate state, such as a month without
/// sales, so it yields 0 instead of `NaN`/`inf`.
#[must_use]
pub fn cost_per_unit(total_cost: f64, quantity_sold: f64) -> f64 {
    if quantity_sold == 0.0 || !quantity_sold.is_finite() {
        return 0.0;
    }
    total_cost / quantity_sold
}

impl<C: Classify> CostEngine<C> {
    /// Production costs of `period` and the per-unit figures for
    /// `quantity_sold` units (kilograms).
    pub fn period_summary(
        &self,
        expenses: &[Expense],
        period: &ReportingPeriod,
        quantity_sold: f64,
        duration_months: i32,
    ) -> CostPeriodSummary {
        let total_opex = self.total_opex(expenses, period);
        let total_capex_amortization =
            self.total_capex_amortization(expenses, period, duration_months);

        tracing::debug!(
            "period {period}: opex {total_opex}, capex amortization {total_capex_amortization}, quantity {quantity_sold}"
        );

        CostPeriodSummary {
            period_start: period.start(),
            period_end: period.end(),
            total_opex,
            total_capex_amortization,
            quantity_sold,
            cost_per_unit_opex_only: cost_per_unit(total_opex, quantity_sold),
            cost_per_unit_full: cost_per_unit(
                total_opex + total_capex_amortization,
                quantity_sold,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ExpenseCategory;

    #[test]
    fn cost_per_unit_divides() {
        assert_eq!(cost_per_unit(60_000.0, 60.0), 1_000.0);
    }

    #[test]
    fn cost_per_unit_without_sales_is_zero() {
        assert_eq!(cost_per_unit(60_000.0, 0.0), 0.0);
        assert_eq!(cost_per_unit(60_000.0, f64::NAN), 0.0);
        assert_eq!(cost_per_unit(0.0, 0.0), 0.0);
    }

    #[test]
    fn summary_echoes_inputs() {
        let engine = CostEngine::builder().build();
        let day = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let expenses = vec![
            Expense::new("f", ExpenseCategory::Feed, 50_000.0, day),
            Expense::new("t", ExpenseCategory::HeavyEquipment, 360_000.0, day),
        ];
        let may = ReportingPeriod::month(2024, 5).unwrap();
        let summary = engine.period_summary(&expenses, &may, 60.0, 36);

        assert_eq!(summary.period_start, may.start());
        assert_eq!(summary.period_end, may.end());
        assert_eq!(summary.quantity_sold, 60.0);
        assert_eq!(summary.total_opex, 50_000.0);
        assert_eq!(summary.total_capex_amortization, 10_000.0);
        assert_eq!(summary.total_cost(), 60_000.0);
        assert!((summary.cost_per_unit_opex_only - 833.333_333).abs() < 1e-3);
        assert_eq!(summary.cost_per_unit_full, 1_000.0);
    }
}
