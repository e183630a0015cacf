use serde::{Deserialize, Serialize};

use crate::record::round_currency;

/// Running totals across closed business days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStatsModel {
    current_day: u32,
    sales: u32,
    revenues: f64,
    expenses: f64,
}

impl DailyStatsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of days closed so far.
    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn sales(&self) -> u32 {
        self.sales
    }

    pub fn revenues(&self) -> f64 {
        self.revenues
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn profit(&self) -> f64 {
        round_currency(self.revenues - self.expenses)
    }

    pub fn add_sales(&mut self, units: u32) {
        self.sales = self.sales.saturating_add(units);
    }

    pub fn add_revenues(&mut self, amount: f64) {
        self.revenues = round_currency(self.revenues + amount);
    }

    pub fn add_expenses(&mut self, amount: f64) {
        self.expenses = round_currency(self.expenses + amount);
    }

    pub fn next_day(&mut self) {
        self.current_day += 1;
    }
}
