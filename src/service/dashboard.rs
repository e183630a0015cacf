use crate::model::ProductModel;
use crate::record::round_currency;

/// Lifetime totals across every product.
pub struct DashboardTotals<'a> {
    products: &'a ProductModel,
}

impl<'a> DashboardTotals<'a> {
    pub fn new(products: &'a ProductModel) -> Self {
        DashboardTotals { products }
    }

    /// Total revenue.
    pub fn gross_sales(&self) -> f64 {
        round_currency(
            self.products
                .entities()
                .iter()
                .map(|product| product.total_revenue())
                .sum(),
        )
    }

    /// Total revenue less total expenses.
    pub fn net_sales(&self) -> f64 {
        round_currency(
            self.products
                .entities()
                .iter()
                .map(|product| product.total_revenue() - product.total_expenses())
                .sum(),
        )
    }

    /// Units sold.
    pub fn total_sales(&self) -> u64 {
        self.products
            .entities()
            .iter()
            .map(|product| u64::from(product.total_sales()))
            .sum()
    }
}
