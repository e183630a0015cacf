use std::ops::Deref;
use std::path::PathBuf;

use super::{EntityModel, VariantModel};
use crate::entity::{ProductVariantOption, Record};
use crate::error::ModelError;
use crate::logging::Logger;

#[derive(Debug)]
pub struct VariantOptionModel {
    inner: EntityModel<ProductVariantOption>,
}

impl VariantOptionModel {
    pub const DEFAULT_FILE: &'static str = "ProductVariantOptions.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        VariantOptionModel {
            inner: EntityModel::new(path, Logger::new("VariantOptionModel")),
        }
    }

    /// Load options and stitch each one into its parent variant's option
    /// list. An option whose parent is unknown is still loaded.
    ///
    /// If the file cannot be read, neither the options nor the variants'
    /// option lists change.
    pub fn load_entities(&mut self, variants: &mut VariantModel) -> Result<(), ModelError> {
        let lines = self.inner.read_all()?;
        let logger = self.inner.logger().clone();
        variants.clear_option_links();

        self.inner.load_lines_with(&lines, |option| match variants.find_mut(option.variant_id()) {
            Some(variant) => variant.attach_option_id(option.id()),
            None => logger.warning(format!(
                "Option {} references variant {} which does not exist.",
                option.id(),
                option.variant_id()
            )),
        });
        Ok(())
    }

    pub fn insert(&mut self, option: &mut ProductVariantOption) -> Result<(), ModelError> {
        self.inner.insert(option)
    }

    pub fn upsert(&mut self, option: &mut ProductVariantOption) -> Result<(), ModelError> {
        self.inner.upsert(option)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), ModelError> {
        self.inner.delete(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ProductVariantOption> {
        self.inner.find_mut(id)
    }
}

impl Deref for VariantOptionModel {
    type Target = EntityModel<ProductVariantOption>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
