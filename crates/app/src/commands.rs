//! Subcommands of the `farmcost` binary.
use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use cost_engine::{
    ClassificationTable, CostEngine, EngineError, Expense, MonthlyCostPoint, ReportingPeriod, Sale,
    TrendSplit, quantity_sold,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{AppError, Result},
    settings::Settings,
};

/// Months shown by `trend` when `--months` is not given.
const DEFAULT_TREND_MONTHS: u32 = 6;

/// A calendar month written `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn period(self) -> Result<ReportingPeriod> {
        Ok(ReportingPeriod::month(self.year, self.month)?)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("expected YYYY-MM, got '{s}'");
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct MonthArg {
    /// Month to report on (YYYY-MM), defaults to the current month.
    #[arg(long)]
    pub month: Option<YearMonth>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// First day of the period (YYYY-MM-DD).
    #[arg(long, requires = "end", conflicts_with = "month")]
    pub start: Option<NaiveDate>,
    /// Last day of the period, inclusive (YYYY-MM-DD).
    #[arg(long, requires = "start", conflicts_with = "month")]
    pub end: Option<NaiveDate>,
    /// Month to report on (YYYY-MM), defaults to the current month.
    #[arg(long)]
    pub month: Option<YearMonth>,
    /// Kilograms sold in the period; read from the sales file when omitted.
    #[arg(long)]
    pub quantity: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Production cost and cost per kg of a period.
    Period(PeriodArgs),
    /// Monthly amortization of every capital category.
    Categories,
    /// Operating expenses of a month, by category.
    Opex(MonthArg),
    /// Monthly OPEX against amortized CAPEX.
    Trend {
        /// Number of months, ending with the current one.
        #[arg(long, default_value_t = DEFAULT_TREND_MONTHS)]
        months: u32,
    },
    /// Costs, revenue and margins of a month.
    Stats(MonthArg),
    /// All-time cost per kg against the market price.
    Performance,
    /// Margin of every sale of a month.
    Margins(MonthArg),
}

#[derive(Debug, Serialize)]
struct Trend {
    months: Vec<MonthlyCostPoint>,
    split: TrendSplit,
}

/// Everything a command needs: loaded ledgers and the resolved settings.
pub struct Context {
    pub engine: CostEngine<ClassificationTable>,
    pub expenses: Vec<Expense>,
    pub sales: Vec<Sale>,
    pub duration_months: i32,
    pub market_price_per_kg: f64,
    pub today: NaiveDate,
}

impl Context {
    pub fn new(settings: &Settings, expenses: Vec<Expense>, sales: Vec<Sale>) -> Result<Self> {
        Ok(Self {
            engine: CostEngine::builder()
                .classifier(settings.classification()?)
                .build(),
            expenses,
            sales,
            duration_months: settings.effective_duration(),
            market_price_per_kg: settings.market_price_per_kg,
            today: settings.today()?,
        })
    }

    fn month(&self, month: Option<YearMonth>) -> Result<ReportingPeriod> {
        match month {
            Some(month) => month.period(),
            None => Ok(ReportingPeriod::month_containing(self.today)),
        }
    }
}

impl Command {
    pub fn run(&self, ctx: &Context) -> Result<Value> {
        let engine = &ctx.engine;
        let duration = ctx.duration_months;

        let value = match self {
            Command::Period(args) => {
                let period = match (args.start, args.end) {
                    (Some(start), Some(end)) => ReportingPeriod::new(start, end)?,
                    _ => ctx.month(args.month)?,
                };
                let quantity = match args.quantity {
                    Some(quantity) if quantity.is_finite() && quantity >= 0.0 => quantity,
                    Some(quantity) => {
                        return Err(AppError::Engine(EngineError::InvalidQuantity(
                            quantity.to_string(),
                        )));
                    }
                    None => quantity_sold(&ctx.sales, &period),
                };
                tracing::info!("reporting on {period}");
                serde_json::to_value(engine.period_summary(
                    &ctx.expenses,
                    &period,
                    quantity,
                    duration,
                ))?
            }
            Command::Categories => {
                serde_json::to_value(engine.amortization_by_category(&ctx.expenses, duration))?
            }
            Command::Opex(args) => {
                let period = ctx.month(args.month)?;
                serde_json::to_value(engine.opex_by_category(&ctx.expenses, &period))?
            }
            Command::Trend { months } => {
                let months = engine.monthly_trend(&ctx.expenses, ctx.today, *months, duration);
                let split = TrendSplit::from_points(&months);
                serde_json::to_value(Trend { months, split })?
            }
            Command::Stats(args) => {
                let period = ctx.month(args.month)?;
                serde_json::to_value(engine.period_statistics(
                    &ctx.expenses,
                    &ctx.sales,
                    &period,
                    duration,
                ))?
            }
            Command::Performance => serde_json::to_value(engine.global_performance(
                &ctx.expenses,
                &ctx.sales,
                ctx.today,
                ctx.market_price_per_kg,
                duration,
            ))?,
            Command::Margins(args) => {
                let period = ctx.month(args.month)?;
                serde_json::to_value(engine.period_margins(
                    &ctx.expenses,
                    &ctx.sales,
                    &period,
                    duration,
                ))?
            }
        };
        Ok(value)
    }
}
