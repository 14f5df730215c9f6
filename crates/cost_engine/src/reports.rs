//! Computed summaries returned by the engine.
//!
//! Every amount is a full-precision `f64`; nothing here is rounded. These
//! values are recomputed on each call and never stored by the engine.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ExpenseCategory, ReportingPeriod};

/// Production costs of one reporting period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostPeriodSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_opex: f64,
    pub total_capex_amortization: f64,
    pub quantity_sold: f64,
    pub cost_per_unit_opex_only: f64,
    pub cost_per_unit_full: f64,
}

impl CostPeriodSummary {
    /// OPEX plus amortized CAPEX.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.total_opex + self.total_capex_amortization
    }
}

/// Steady-state amortization of one capital category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmortizationSummary {
    pub category: ExpenseCategory,
    pub total_invested: f64,
    /// Sum of the monthly rates of every expense in the category, whatever
    /// the period.
    pub monthly_amortization_total: f64,
    pub expense_count: usize,
    pub expenses: Vec<AmortizedExpense>,
}

/// One capital expense inside a [`CategoryAmortizationSummary`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmortizedExpense {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    pub monthly_amortization: f64,
    pub amortization_end_date: NaiveDate,
}

/// OPEX spent on one category during a period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpexCategorySummary {
    pub category: ExpenseCategory,
    pub total: f64,
    pub expense_count: usize,
    /// Share of the period's total OPEX, in percent.
    pub share_percent: f64,
}

/// OPEX and amortized CAPEX of a single calendar month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyCostPoint {
    pub period: ReportingPeriod,
    pub opex: f64,
    pub capex_amortization: f64,
    pub total: f64,
}

/// Totals and OPEX/CAPEX split over a series of [`MonthlyCostPoint`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendSplit {
    pub total_opex: f64,
    pub total_capex_amortization: f64,
    pub total: f64,
    pub opex_percent: f64,
    pub capex_percent: f64,
}

impl TrendSplit {
    #[must_use]
    pub fn from_points(points: &[MonthlyCostPoint]) -> Self {
        let total_opex: f64 = points.iter().map(|p| p.opex).sum();
        let total_capex_amortization: f64 = points.iter().map(|p| p.capex_amortization).sum();
        let total = total_opex + total_capex_amortization;
        let percent = |part: f64| if total > 0.0 { part / total * 100.0 } else { 0.0 };

        Self {
            total_opex,
            total_capex_amortization,
            total,
            opex_percent: percent(total_opex),
            capex_percent: percent(total_capex_amortization),
        }
    }
}

/// Real cost and margin of one sale, on both cost bases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleMargin {
    pub sale_id: String,
    pub weight_kg: f64,
    pub cost_per_kg_opex: f64,
    pub cost_per_kg_full: f64,
    pub real_cost_opex: f64,
    pub real_cost_full: f64,
    pub margin_opex: f64,
    pub margin_full: f64,
    pub margin_opex_percent: f64,
    pub margin_full_percent: f64,
}

/// Costs and sales figures of one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    pub costs: CostPeriodSummary,
    pub sales_count: usize,
    pub revenue: f64,
    /// Sum of the OPEX-based margins of the period's sales.
    pub total_profit: f64,
    /// Mean OPEX-based margin percentage, 0 without sales.
    pub average_margin_percent: f64,
}

/// How the full production cost compares to the market price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    /// Cost below the market price by more than the fragility threshold.
    Profitable,
    /// Cost within the fragility threshold of the market price.
    Fragile,
    /// Cost above the market price.
    Loss,
}

impl PerformanceStatus {
    /// Follow-up actions advised for this status, most pressing first.
    #[must_use]
    pub const fn suggestions(self) -> &'static [Suggestion] {
        match self {
            PerformanceStatus::Loss => &[
                Suggestion::ReduceFeedCost,
                Suggestion::ImproveGrowthRate,
                Suggestion::ReduceMortality,
                Suggestion::ReviewSalePrice,
            ],
            PerformanceStatus::Fragile => &[
                Suggestion::MonitorFeedCost,
                Suggestion::LimitNonEssentialOpex,
                Suggestion::OptimizeBatchPerformance,
            ],
            PerformanceStatus::Profitable => {
                &[Suggestion::ConsiderScalingUp, Suggestion::KeepTrackingCosts]
            }
        }
    }
}

/// Action key attached to a [`GlobalPerformance`]. Rendering the text is left
/// to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    ReduceFeedCost,
    ImproveGrowthRate,
    ReduceMortality,
    ReviewSalePrice,
    MonitorFeedCost,
    LimitNonEssentialOpex,
    OptimizeBatchPerformance,
    ConsiderScalingUp,
    KeepTrackingCosts,
}

/// All-time production cost of the farm against the market price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalPerformance {
    pub production_start: NaiveDate,
    pub production_end: NaiveDate,
    pub total_kg_sold: f64,
    pub total_opex: f64,
    pub total_capex_amortization: f64,
    pub cost_per_kg_opex: f64,
    pub cost_per_kg_full: f64,
    pub market_price_per_kg: f64,
    /// `market_price_per_kg - cost_per_kg_full`.
    pub gap_absolute: f64,
    /// `gap_absolute` relative to the market price, in percent.
    pub gap_percent: f64,
    pub status: PerformanceStatus,
    pub suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: u32, opex: f64, capex: f64) -> MonthlyCostPoint {
        MonthlyCostPoint {
            period: ReportingPeriod::month(2024, month).unwrap(),
            opex,
            capex_amortization: capex,
            total: opex + capex,
        }
    }

    #[test]
    fn split_percentages_add_up() {
        let split = TrendSplit::from_points(&[point(1, 300.0, 100.0), point(2, 300.0, 300.0)]);
        assert_eq!(split.total, 1_000.0);
        assert!((split.opex_percent - 60.0).abs() < 1e-9);
        assert!((split.capex_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn split_of_empty_series_is_zero() {
        let split = TrendSplit::from_points(&[]);
        assert_eq!(split.total, 0.0);
        assert_eq!(split.opex_percent, 0.0);
        assert_eq!(split.capex_percent, 0.0);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&PerformanceStatus::Profitable).unwrap();
        assert_eq!(json, "\"profitable\"");
    }

    #[test]
    fn every_status_has_suggestions() {
        assert_eq!(PerformanceStatus::Loss.suggestions().len(), 4);
        assert_eq!(PerformanceStatus::Fragile.suggestions().len(), 3);
        assert_eq!(
            PerformanceStatus::Profitable.suggestions(),
            &[Suggestion::ConsiderScalingUp, Suggestion::KeepTrackingCosts]
        );
        let json = serde_json::to_string(&Suggestion::LimitNonEssentialOpex).unwrap();
        assert_eq!(json, "\"limit_non_essential_opex\"");
    }
}
