use crate::catalog::Catalog;
use crate::entity::{Check, CheckLineItem, Product, Record, TransactionOutcome};
use crate::error::ModelError;
use crate::logging::Logger;
use crate::model::CheckModel;
use crate::record::round_currency;

/// Applies a check to product sales and records it.
pub struct TransactionService<'a> {
    catalog: &'a mut Catalog,
    checks: &'a mut CheckModel,
    logger: Logger,
}

impl<'a> TransactionService<'a> {
    pub fn new(catalog: &'a mut Catalog, checks: &'a mut CheckModel) -> Self {
        let logger = checks.logger().scoped("TransactionService");
        TransactionService {
            catalog,
            checks,
            logger,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Process every line item of `check` and store the check.
    ///
    /// Returns false only when the check has no line items. A line item whose
    /// product cannot be persisted is put back as it was and the check ends
    /// up `COMPLETED_WITH_ERRORS`; the stage reflects the last line item
    /// processed. Product counters already bumped in memory for a failed
    /// line item are not reverted, and a failure to store the check does not
    /// undo product writes.
    pub fn process_transaction(&mut self, check: &mut Check) -> bool {
        if check.line_items().is_empty() {
            self.logger.verbose(format!(
                "Check {} has no line items; nothing to process.",
                check.id()
            ));
            return false;
        }

        check.set_stage(TransactionOutcome::Pending);

        for index in 0..check.line_items().len() {
            let snapshot = check.line_items()[index].clone();
            match self.apply_line_item(&snapshot) {
                Ok((revenue, cogs)) => {
                    check.add_to_totals(revenue, cogs);
                    check.complete_transaction(true);
                }
                Err(err) => {
                    self.logger.warning(format!(
                        "Could not process line item for product {} on check {}: {}. Rolling back line item.",
                        snapshot.product_id(),
                        check.id(),
                        err
                    ));
                    check.replace_line_item(index, snapshot);
                    check.complete_transaction(false);
                }
            }
        }

        if let Err(err) = self.checks.insert(check) {
            self.logger.fatal(format!(
                "Could not persist check {}: {}. Product updates were kept.",
                check.id(),
                err
            ));
        }
        true
    }

    /// Returns the revenue and cost of goods sold for the line item.
    fn apply_line_item(&mut self, item: &CheckLineItem) -> Result<(f64, f64), ModelError> {
        let (products, variants, _) = self.catalog.split_mut();
        let product = products
            .find_mut(item.product_id())
            .ok_or_else(|| ModelError::NotFound {
                model: Product::KIND,
                id: item.product_id().to_string(),
            })?;

        product.record_sale(item.quantity());
        let units = f64::from(item.quantity());
        let revenue = round_currency(product.price() * units);
        let cogs = round_currency(product.cost() * units);

        let mut updated = product.clone();
        products.upsert(&mut updated, variants)?;
        Ok((revenue, cogs))
    }
}
