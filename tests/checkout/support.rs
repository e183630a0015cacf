use tempfile::TempDir;
use toastry::{
    Catalog, Check, CheckLineItem, CheckModel, Product, ProductCategory, ProductVariant,
    ProductVariantSelected, Record, StoreConfig,
};

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

    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::open(&self.config);
        catalog.load().unwrap();
        catalog
    }

    pub fn checks(&self) -> CheckModel {
        let mut checks = CheckModel::new(self.config.checks_path());
        checks.load_entities().unwrap();
        checks
    }
}

/// Two persisted products: fries without variants and wings offering a
/// sauce variant.
pub struct Menu {
    pub fries: Product,
    pub wings: Product,
    pub sauce: ProductVariant,
}

pub fn menu(catalog: &mut Catalog) -> Menu {
    let mut sauce = ProductVariant::new("Sauce", 0.5, true, "single");
    catalog.upsert_variant(&mut sauce).unwrap();

    let mut fries = Product::new("Fries", 3.5, 1.25, ProductCategory::SideDish);
    let mut wings = Product::new("Wings", 5.99, 2.0, ProductCategory::MainDish);
    wings.add_variant(sauce.id());
    catalog.upsert_product(&mut fries).unwrap();
    catalog.upsert_product(&mut wings).unwrap();

    Menu { fries, wings, sauce }
}

/// Delete the sauce through a second catalog over the same files, then
/// refresh only `catalog`'s variants. Its cached wings keeps the stale
/// sauce reference.
pub fn forget_sauce_elsewhere(store: &Store, catalog: &mut Catalog, menu: &Menu) {
    store.catalog().delete_variant(menu.sauce.id()).unwrap();
    let (_, variants, _) = catalog.split_mut();
    variants.load_entities().unwrap();
    assert!(!variants.exists(menu.sauce.id()));
}

pub fn check(items: &[(&Product, u32)]) -> Check {
    let mut check = Check::new();
    check.set_customers_served(1);
    for (product, quantity) in items {
        check.add_line_item(CheckLineItem::new(
            ProductVariantSelected::new(product.id()),
            *quantity,
        ));
    }
    check
}
