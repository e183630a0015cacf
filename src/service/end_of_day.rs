use crate::logging::Logger;
use crate::model::{DailyStatsModel, ProductModel};

/// Closes the business day: folds each product's daily sales into the
/// running stats and resets the daily counters.
pub struct ComputeEndOfDay<'a> {
    stats: &'a mut DailyStatsModel,
    products: &'a mut ProductModel,
    logger: Logger,
}

impl<'a> ComputeEndOfDay<'a> {
    pub fn new(stats: &'a mut DailyStatsModel, products: &'a mut ProductModel) -> Self {
        let logger = products.logger().scoped("ComputeEndOfDay");
        ComputeEndOfDay {
            stats,
            products,
            logger,
        }
    }

    pub fn execute(&mut self) {
        for product in self.products.entities_mut() {
            let units = product.daily_sales();
            self.stats.add_sales(units);
            self.stats.add_revenues(f64::from(units) * product.price());
            self.stats.add_expenses(f64::from(units) * product.cost());
            product.reset_daily_sales();
        }

        self.stats.next_day();
        self.logger.verbose(format!(
            "Closed day {}: {} units, revenue {:.2}, expenses {:.2}.",
            self.stats.current_day(),
            self.stats.sales(),
            self.stats.revenues(),
            self.stats.expenses()
        ));
    }
}
