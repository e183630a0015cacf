use std::fs;
use std::path::Path;

use tempfile::TempDir;
use toastry::{Catalog, ProductVariant, ProductVariantOption, StoreConfig};

/// A data directory that lives as long as the test.
pub struct Store {
    _dir: TempDir,
    pub config: StoreConfig,
}

impl Store {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::in_dir(dir.path());
        Store { _dir: dir, config }
    }

    /// A freshly loaded catalog over this store's files.
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::open(&self.config);
        catalog.load().unwrap();
        catalog
    }
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// A persisted "Sauce" variant with `names` linked as its options.
pub fn sauce_with_options(
    catalog: &mut Catalog,
    names: &[&str],
) -> (ProductVariant, Vec<ProductVariantOption>) {
    let mut sauce = ProductVariant::new("Sauce", 0.5, true, "single");
    catalog.upsert_variant(&mut sauce).unwrap();

    let mut options = Vec::new();
    for name in names {
        let mut option = ProductVariantOption::new(sauce.entity.id(), *name);
        catalog.link_option(sauce.entity.id(), &mut option).unwrap();
        options.push(option);
    }

    let sauce = catalog.variants().find(sauce.entity.id()).unwrap().clone();
    (sauce, options)
}
