use std::ops::Deref;
use std::path::PathBuf;

use super::{EntityModel, VariantModel};
use crate::entity::{Product, Record};
use crate::error::ModelError;
use crate::logging::Logger;

/// Products, guarded so that every persisted product only references
/// variants that exist.
#[derive(Debug)]
pub struct ProductModel {
    inner: EntityModel<Product>,
}

impl ProductModel {
    pub const DEFAULT_FILE: &'static str = "ProductList.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProductModel {
            inner: EntityModel::new(path, Logger::new("ProductModel")),
        }
    }

    /// Load products, dropping variant references the variant model does
    /// not know about.
    pub fn load_entities(&mut self, variants: &VariantModel) -> Result<(), ModelError> {
        self.inner.load_entities_with(|product| {
            let resolved = variants.existing_ids(product.variant_ids());
            product.set_resolved_variants(resolved);
        })
    }

    pub fn insert(&mut self, product: &mut Product, variants: &VariantModel) -> Result<(), ModelError> {
        self.check_variants(product, variants)?;
        self.inner.insert(product)
    }

    pub fn upsert(&mut self, product: &mut Product, variants: &VariantModel) -> Result<(), ModelError> {
        self.check_variants(product, variants)?;
        self.inner.upsert(product)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), ModelError> {
        self.inner.delete(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.inner.find_mut(id)
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.inner.entities_mut()
    }

    fn check_variants(&self, product: &Product, variants: &VariantModel) -> Result<(), ModelError> {
        let missing = variants.missing_ids(product.variant_ids());
        if missing.is_empty() {
            return Ok(());
        }

        self.inner.logger().warning(format!(
            "Could not upsert entity {}; not all variants are valid on the product object.",
            product.id()
        ));
        Err(ModelError::BrokenReference {
            model: Product::KIND,
            id: product.id().to_string(),
            missing,
        })
    }
}

impl Deref for ProductModel {
    type Target = EntityModel<Product>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
