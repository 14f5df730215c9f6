use chrono::NaiveDate;

use crate::{Classify, Expense, MonthlyCostPoint, ReportingPeriod};

use super::CostEngine;

impl<C: Classify> CostEngine<C> {
    /// OPEX and amortized CAPEX for the `months` calendar months ending with
    /// the month that contains `last_month`, oldest first.
    pub fn monthly_trend(
        &self,
        expenses: &[Expense],
        last_month: NaiveDate,
        months: u32,
        duration_months: i32,
    ) -> Vec<MonthlyCostPoint> {
        let anchor = ReportingPeriod::month_containing(last_month);

        (0..months)
            .rev()
            .map(|back| {
                let period = anchor.months_back(back);
                let opex = self.total_opex(expenses, &period);
                let capex_amortization =
                    self.total_capex_amortization(expenses, &period, duration_months);
                MonthlyCostPoint {
                    period,
                    opex,
                    capex_amortization,
                    total: opex + capex_amortization,
                }
            })
            .collect()
    }
}
