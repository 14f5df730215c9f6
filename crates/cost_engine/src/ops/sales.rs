use crate::{
    Classify, CostPeriodSummary, Expense, PeriodStatistics, ReportingPeriod, Sale, SaleMargin,
};

use super::CostEngine;

/// Kilograms sold during `period`. Sales without a usable weight count 0.
#[must_use]
pub fn quantity_sold(sales: &[Sale], period: &ReportingPeriod) -> f64 {
    sales
        .iter()
        .filter(|sale| period.contains(sale.date))
        .map(Sale::counted_weight)
        .sum()
}

/// Real cost and margin of `sale` at the per-kg costs of `costs`.
#[must_use]
pub fn sale_margin(sale: &Sale, costs: &CostPeriodSummary) -> SaleMargin {
    let weight_kg = sale.counted_weight();
    let real_cost_opex = weight_kg * costs.cost_per_unit_opex_only;
    let real_cost_full = weight_kg * costs.cost_per_unit_full;
    let margin_opex = sale.amount - real_cost_opex;
    let margin_full = sale.amount - real_cost_full;
    let percent_of_sale = |margin: f64| {
        if sale.amount == 0.0 {
            0.0
        } else {
            margin / sale.amount * 100.0
        }
    };

    SaleMargin {
        sale_id: sale.id.clone(),
        weight_kg,
        cost_per_kg_opex: costs.cost_per_unit_opex_only,
        cost_per_kg_full: costs.cost_per_unit_full,
        real_cost_opex,
        real_cost_full,
        margin_opex,
        margin_full,
        margin_opex_percent: percent_of_sale(margin_opex),
        margin_full_percent: percent_of_sale(margin_full),
    }
}

impl<C: Classify> CostEngine<C> {
    /// Margins of every sale dated inside `period`, priced at the period's
    /// per-kg costs.
    pub fn period_margins(
        &self,
        expenses: &[Expense],
        sales: &[Sale],
        period: &ReportingPeriod,
        duration_months: i32,
    ) -> Vec<SaleMargin> {
        let costs = self.period_summary(
            expenses,
            period,
            quantity_sold(sales, period),
            duration_months,
        );
        sales
            .iter()
            .filter(|sale| period.contains(sale.date))
            .map(|sale| sale_margin(sale, &costs))
            .collect()
    }

    /// Costs, revenue and OPEX-based profitability of `period`.
    ///
    /// The quantity sold is taken from the period's sales.
    pub fn period_statistics(
        &self,
        expenses: &[Expense],
        sales: &[Sale],
        period: &ReportingPeriod,
        duration_months: i32,
    ) -> PeriodStatistics {
        let costs = self.period_summary(
            expenses,
            period,
            quantity_sold(sales, period),
            duration_months,
        );

        let in_period: Vec<&Sale> = sales
            .iter()
            .filter(|sale| period.contains(sale.date))
            .collect();
        let margins: Vec<SaleMargin> = in_period
            .iter()
            .map(|sale| sale_margin(sale, &costs))
            .collect();

        let sales_count = in_period.len();
        let average_margin_percent = if margins.is_empty() {
            0.0
        } else {
            margins.iter().map(|m| m.margin_opex_percent).sum::<f64>() / margins.len() as f64
        };

        PeriodStatistics {
            sales_count,
            revenue: in_period.iter().map(|sale| sale.amount).sum(),
            total_profit: margins.iter().map(|m| m.margin_opex).sum(),
            average_margin_percent,
            costs,
        }
    }
}
