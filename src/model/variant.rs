use std::ops::Deref;
use std::path::PathBuf;

use super::{EntityModel, VariantOptionModel};
use crate::entity::{ProductVariant, Record};
use crate::error::ModelError;
use crate::logging::Logger;

/// Variants, guarded so that every persisted variant only lists options
/// that exist.
///
/// Variants are deleted through `Catalog::delete_variant` or
/// `VariantService::delete_variant`, which also remove the variant's options
/// and detach it from every product.
#[derive(Debug)]
pub struct VariantModel {
    inner: EntityModel<ProductVariant>,
}

impl VariantModel {
    pub const DEFAULT_FILE: &'static str = "ProductVariants.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        VariantModel {
            inner: EntityModel::new(path, Logger::new("VariantModel")),
        }
    }

    pub fn load_entities(&mut self) -> Result<(), ModelError> {
        self.inner.load_entities()
    }

    pub fn insert(
        &mut self,
        variant: &mut ProductVariant,
        options: &VariantOptionModel,
    ) -> Result<(), ModelError> {
        self.check_options(variant, options)?;
        self.inner.insert(variant)
    }

    pub fn upsert(
        &mut self,
        variant: &mut ProductVariant,
        options: &VariantOptionModel,
    ) -> Result<(), ModelError> {
        self.check_options(variant, options)?;
        self.inner.upsert(variant)
    }

    /// Removes the row only. Callers own the cascade.
    pub(crate) fn delete(&mut self, id: &str) -> Result<(), ModelError> {
        self.inner.delete(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ProductVariant> {
        self.inner.find_mut(id)
    }

    /// Forget every stitched option link ahead of an option reload.
    pub(crate) fn clear_option_links(&mut self) {
        for variant in self.inner.entities_mut() {
            variant.clear_option_ids();
        }
    }

    fn check_options(
        &self,
        variant: &ProductVariant,
        options: &VariantOptionModel,
    ) -> Result<(), ModelError> {
        let missing = options.missing_ids(variant.option_ids());
        if missing.is_empty() {
            return Ok(());
        }

        self.inner.logger().warning(format!(
            "Could not upsert entity {}; not all options are valid on the variant object.",
            variant.id()
        ));
        Err(ModelError::BrokenReference {
            model: ProductVariant::KIND,
            id: variant.id().to_string(),
            missing,
        })
    }
}

impl Deref for VariantModel {
    type Target = EntityModel<ProductVariant>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
