use chrono::NaiveDate;

use crate::{
    Classify, Expense, ExpenseClass, GlobalPerformance, PerformanceStatus, ReportingPeriod, Sale,
};

use super::{CostEngine, FRAGILE_MARGIN_RATIO, cost_per_unit};

impl<C: Classify> CostEngine<C> {
    /// All-time production cost per kg compared to `market_price_per_kg`.
    ///
    /// The production period runs from the first sale to `today`. OPEX is
    /// counted over the whole history, CAPEX amortization over the production
    /// period only. Returns `None` while no kilogram has been sold.
    pub fn global_performance(
        &self,
        expenses: &[Expense],
        sales: &[Sale],
        today: NaiveDate,
        market_price_per_kg: f64,
        duration_months: i32,
    ) -> Option<GlobalPerformance> {
        let total_kg_sold: f64 = sales.iter().map(Sale::counted_weight).sum();
        if total_kg_sold <= 0.0 {
            tracing::debug!("no kilogram sold yet, skipping global performance");
            return None;
        }
        let first_sale = sales.iter().map(|sale| sale.date).min()?;
        let production = ReportingPeriod::spanning(first_sale, today);

        let total_opex: f64 = self
            .expenses_of(expenses, ExpenseClass::Opex)
            .map(|expense| expense.amount)
            .sum();
        let total_capex_amortization =
            self.total_capex_amortization(expenses, &production, duration_months);

        let cost_per_kg_opex = cost_per_unit(total_opex, total_kg_sold);
        let cost_per_kg_full = cost_per_unit(total_opex + total_capex_amortization, total_kg_sold);

        let gap_absolute = market_price_per_kg - cost_per_kg_full;
        let gap_percent = if market_price_per_kg > 0.0 {
            gap_absolute / market_price_per_kg * 100.0
        } else {
            0.0
        };
        let status = performance_status(cost_per_kg_full, market_price_per_kg);

        tracing::debug!(
            "global performance over {production}: {total_kg_sold} kg, full cost {cost_per_kg_full}/kg, status {status:?}"
        );

        Some(GlobalPerformance {
            production_start: production.start(),
            production_end: production.end(),
            total_kg_sold,
            total_opex,
            total_capex_amortization,
            cost_per_kg_opex,
            cost_per_kg_full,
            market_price_per_kg,
            gap_absolute,
            gap_percent,
            status,
            suggestions: status.suggestions().to_vec(),
        })
    }
}

/// `Loss` above the market price, `Fragile` within
/// [`FRAGILE_MARGIN_RATIO`] of it, `Profitable` otherwise.
#[must_use]
pub fn performance_status(cost_per_kg: f64, market_price_per_kg: f64) -> PerformanceStatus {
    if cost_per_kg > market_price_per_kg {
        return PerformanceStatus::Loss;
    }
    if market_price_per_kg <= 0.0 {
        return PerformanceStatus::Fragile;
    }
    let relative_gap = (market_price_per_kg - cost_per_kg) / market_price_per_kg;
    if relative_gap <= FRAGILE_MARGIN_RATIO {
        PerformanceStatus::Fragile
    } else {
        PerformanceStatus::Profitable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExpenseCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(performance_status(1_400.0, 1_300.0), PerformanceStatus::Loss);
        assert_eq!(performance_status(1_300.0, 1_300.0), PerformanceStatus::Fragile);
        assert_eq!(performance_status(1_240.0, 1_300.0), PerformanceStatus::Fragile);
        assert_eq!(performance_status(1_000.0, 1_300.0), PerformanceStatus::Profitable);
        assert_eq!(performance_status(0.0, 0.0), PerformanceStatus::Fragile);
    }

    #[test]
    fn none_without_weighed_sales() {
        let engine = CostEngine::builder().build();
        let sales = vec![Sale::new("s1", 50_000.0, None, date(2024, 2, 1))];
        assert!(
            engine
                .global_performance(&[], &sales, date(2024, 6, 1), 1_300.0, 36)
                .is_none()
        );
        assert!(
            engine
                .global_performance(&[], &[], date(2024, 6, 1), 1_300.0, 36)
                .is_none()
        );
    }

    #[test]
    fn performance_over_production_period() {
        let engine = CostEngine::builder().build();
        let expenses = vec![
            Expense::new("feed-2023", ExpenseCategory::Feed, 400_000.0, date(2023, 11, 2)),
            Expense::new("feed-2024", ExpenseCategory::Feed, 200_000.0, date(2024, 2, 2)),
            Expense::new("tractor", ExpenseCategory::HeavyEquipment, 360_000.0, date(2024, 1, 1)),
        ];
        let sales = vec![
            Sale::new("s1", 650_000.0, Some(500.0), date(2024, 1, 15)),
            Sale::new("s2", 650_000.0, Some(500.0), date(2024, 4, 15)),
        ];

        let perf = engine
            .global_performance(&expenses, &sales, date(2024, 7, 15), 1_300.0, 36)
            .unwrap();

        assert_eq!(perf.production_start, date(2024, 1, 15));
        assert_eq!(perf.production_end, date(2024, 7, 15));
        assert_eq!(perf.total_kg_sold, 1_000.0);
        assert_eq!(perf.total_opex, 600_000.0);
        // 2024-01-15 .. 2024-07-15: six whole months of 10_000
        assert_eq!(perf.total_capex_amortization, 60_000.0);
        assert_eq!(perf.cost_per_kg_opex, 600.0);
        assert_eq!(perf.cost_per_kg_full, 660.0);
        assert_eq!(perf.gap_absolute, 640.0);
        assert!((perf.gap_percent - 640.0 / 1_300.0 * 100.0).abs() < 1e-9);
        assert_eq!(perf.status, PerformanceStatus::Profitable);
        assert_eq!(perf.suggestions, PerformanceStatus::Profitable.suggestions());
    }
}
