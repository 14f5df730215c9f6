//! Production-cost engine for livestock farms.
//!
//! Classifies one-time expenses as operating (OPEX) or capital (CAPEX),
//! amortizes capital expenses over a project-wide number of months and
//! aggregates both into per-period and per-kg production costs.
//!
//! Every operation is a pure function of its inputs. The amortization duration
//! is a project setting passed to each call rather than stored on expenses.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cost_engine::{CostEngine, Expense, ExpenseCategory, ReportingPeriod};
//!
//! let engine = CostEngine::builder().build();
//! let bought = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expenses = vec![
//!     Expense::new("tractor", ExpenseCategory::HeavyEquipment, 360_000.0, bought),
//!     Expense::new("feed", ExpenseCategory::Feed, 50_000.0, bought),
//! ];
//! let january = ReportingPeriod::month(2024, 1).unwrap();
//!
//! let summary = engine.period_summary(&expenses, &january, 60.0, 36);
//! assert_eq!(summary.total_capex_amortization, 10_000.0);
//! assert_eq!(summary.cost_per_unit_full, 1_000.0);
//! ```

pub use amortization::{
    active_months_in_period, amortization_end_date, monthly_rate, window_overlaps,
};
pub use category::{
    ClassificationTable, Classify, ExpenseCategory, ExpenseClass, StandardClassification,
};
pub use error::EngineError;
pub use expense::Expense;
pub use money::{parse_amount, parse_quantity};
pub use ops::{
    CostEngine, EngineBuilder, FRAGILE_MARGIN_RATIO, cost_per_unit, performance_status,
    quantity_sold, sale_margin,
};
pub use period::ReportingPeriod;
pub use reports::{
    AmortizedExpense, CategoryAmortizationSummary, CostPeriodSummary, GlobalPerformance,
    MonthlyCostPoint, OpexCategorySummary, PerformanceStatus, PeriodStatistics, SaleMargin,
    Suggestion, TrendSplit,
};
pub use sale::Sale;

mod amortization;
mod category;
mod error;
mod expense;
mod money;
mod ops;
mod period;
mod reports;
mod sale;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Amortization duration used when a project does not configure one.
pub const DEFAULT_DURATION_MONTHS: i32 = 36;
