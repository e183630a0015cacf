use crate::config::StoreConfig;
use crate::entity::{Product, ProductVariant, ProductVariantOption};
use crate::error::ModelError;
use crate::model::{ProductModel, VariantModel, VariantOptionModel};
use crate::service::VariantService;

/// The three menu models, loaded and persisted together.
///
/// Products reference variants and variants reference options, so every
/// guarded write needs a sibling model. `Catalog` owns all three and lends
/// them out in the right combination.
#[derive(Debug)]
pub struct Catalog {
    products: ProductModel,
    variants: VariantModel,
    options: VariantOptionModel,
}

impl Catalog {
    pub fn new(products: ProductModel, variants: VariantModel, options: VariantOptionModel) -> Self {
        Catalog {
            products,
            variants,
            options,
        }
    }

    pub fn open(config: &StoreConfig) -> Self {
        Catalog::new(
            ProductModel::new(config.products_path()),
            VariantModel::new(config.variants_path()),
            VariantOptionModel::new(config.options_path()),
        )
    }

    /// Load variants, then options (stitched into their variants), then
    /// products (resolved against the variants).
    pub fn load(&mut self) -> Result<(), ModelError> {
        self.variants.load_entities()?;
        self.options.load_entities(&mut self.variants)?;
        self.products.load_entities(&self.variants)
    }

    pub fn products(&self) -> &ProductModel {
        &self.products
    }

    pub fn variants(&self) -> &VariantModel {
        &self.variants
    }

    pub fn options(&self) -> &VariantOptionModel {
        &self.options
    }

    pub fn split_mut(&mut self) -> (&mut ProductModel, &mut VariantModel, &mut VariantOptionModel) {
        (&mut self.products, &mut self.variants, &mut self.options)
    }

    pub fn variant_service(&mut self) -> VariantService<'_> {
        VariantService::new(&mut self.products, &mut self.variants, &mut self.options)
    }

    pub fn insert_product(&mut self, product: &mut Product) -> Result<(), ModelError> {
        self.products.insert(product, &self.variants)
    }

    pub fn upsert_product(&mut self, product: &mut Product) -> Result<(), ModelError> {
        self.products.upsert(product, &self.variants)
    }

    pub fn delete_product(&mut self, id: &str) -> Result<(), ModelError> {
        self.products.delete(id)
    }

    pub fn insert_variant(&mut self, variant: &mut ProductVariant) -> Result<(), ModelError> {
        self.variants.insert(variant, &self.options)
    }

    pub fn upsert_variant(&mut self, variant: &mut ProductVariant) -> Result<(), ModelError> {
        self.variants.upsert(variant, &self.options)
    }

    /// Delete a variant together with its options and its product links.
    pub fn delete_variant(&mut self, id: &str) -> Result<(), ModelError> {
        self.variant_service().delete_variant(id)
    }

    pub fn link_option(
        &mut self,
        variant_id: &str,
        option: &mut ProductVariantOption,
    ) -> Result<(), ModelError> {
        self.variant_service()
            .link_variant_option_to_variant(variant_id, option)
    }
}
