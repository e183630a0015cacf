use crate::entity::{Product, ProductVariant, ProductVariantOption, Record};
use crate::error::ModelError;
use crate::logging::Logger;
use crate::model::{ProductModel, VariantModel, VariantOptionModel};

/// Keeps products, variants and options referentially consistent.
pub struct VariantService<'a> {
    products: &'a mut ProductModel,
    variants: &'a mut VariantModel,
    options: &'a mut VariantOptionModel,
    logger: Logger,
}

impl<'a> VariantService<'a> {
    pub fn new(
        products: &'a mut ProductModel,
        variants: &'a mut VariantModel,
        options: &'a mut VariantOptionModel,
    ) -> Self {
        let logger = variants.logger().scoped("VariantService");
        VariantService {
            products,
            variants,
            options,
            logger,
        }
    }

    /// The variants behind `ids` that still exist. Stale ids are skipped.
    pub fn variants_tied_to_product(&self, ids: &[String]) -> Vec<&ProductVariant> {
        ids.iter().filter_map(|id| self.variants.find(id)).collect()
    }

    pub fn validate_variants_tied_to_product(&self, product: &Product) -> bool {
        self.variants.missing_ids(product.variant_ids()).is_empty()
    }

    pub fn validate_variant_options_tied_to_variant(&self, variant: &ProductVariant) -> bool {
        self.options.missing_ids(variant.option_ids()).is_empty()
    }

    /// Detach the variant from every product offering it and persist those
    /// products. The variant is dropped from every cached product even when
    /// that product's write is rejected; such products are logged and
    /// skipped. Returns how many products were persisted.
    pub fn delete_variant_from_products(&mut self, variant_id: &str) -> usize {
        let affected: Vec<String> = self
            .products
            .entities()
            .into_iter()
            .filter(|product| product.has_variant(variant_id))
            .map(|product| product.id().to_string())
            .collect();

        let mut persisted = 0;
        for product_id in &affected {
            let Some(product) = self.products.find_mut(product_id) else {
                continue;
            };
            product.remove_variant(variant_id);
            let mut detached = product.clone();

            match self.products.upsert(&mut detached, self.variants) {
                Ok(()) => persisted += 1,
                Err(err) => self.logger.warning(format!(
                    "Could not detach variant {} from product {}: {}",
                    variant_id, product_id, err
                )),
            }
        }
        persisted
    }

    /// Delete every option the variant lists that still exists. Returns how
    /// many were deleted.
    pub fn delete_variant_options_from_variant(&mut self, variant: &ProductVariant) -> usize {
        let mut deleted = 0;
        for option_id in variant.option_ids() {
            if !self.options.exists(option_id) {
                continue;
            }
            match self.options.delete(option_id) {
                Ok(()) => deleted += 1,
                Err(err) => self.logger.warning(format!(
                    "Could not delete option {} of variant {}: {}",
                    option_id,
                    variant.id(),
                    err
                )),
            }
        }
        deleted
    }

    /// Delete the variant, then its options, then its product links.
    ///
    /// Only the variant's own delete can fail; the rest of the cascade logs
    /// what it could not persist and carries on.
    pub fn delete_variant(&mut self, variant_id: &str) -> Result<(), ModelError> {
        let variant = self.variants.find(variant_id).cloned();
        self.variants.delete(variant_id)?;

        if let Some(variant) = variant {
            let options = self.delete_variant_options_from_variant(&variant);
            let products = self.delete_variant_from_products(variant_id);
            self.logger.verbose(format!(
                "Deleted variant {} with {} options and detached it from {} products.",
                variant_id, options, products
            ));
        }
        Ok(())
    }

    /// Make `option` a child of the variant: persist the option under its new
    /// parent, then add it to the variant and persist the variant.
    pub fn link_variant_option_to_variant(
        &mut self,
        variant_id: &str,
        option: &mut ProductVariantOption,
    ) -> Result<(), ModelError> {
        let mut variant = match self.variants.find(variant_id) {
            Some(variant) => variant.clone(),
            None => {
                self.logger.warning(format!(
                    "Could not link option {}; variant {} does not exist.",
                    option.id(),
                    variant_id
                ));
                return Err(ModelError::NotFound {
                    model: ProductVariant::KIND,
                    id: variant_id.to_string(),
                });
            }
        };

        option.set_parent_variant(variant_id);
        self.options.upsert(option)?;

        variant.add_option(option);
        self.variants.upsert(&mut variant, self.options)
    }
}
