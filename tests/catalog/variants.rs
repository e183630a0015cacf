use std::fs;

use toastry::{ModelError, Product, ProductCategory, ProductVariant, ProductVariantOption, Record};

use crate::support::{read, sauce_with_options, Store};

#[test]
fn deleting_a_variant_cascades_to_options_and_products() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let (sauce, options) = sauce_with_options(&mut catalog, &["Buffalo", "Honey BBQ"]);
    let mut size = ProductVariant::new("Size", 1.0, true, "single");
    catalog.upsert_variant(&mut size).unwrap();

    let mut wings = Product::new("Wings", 8.5, 3.25, ProductCategory::MainDish);
    wings.add_variant(sauce.id());
    wings.add_variant(size.id());
    let mut tenders = Product::new("Tenders", 7.5, 3.0, ProductCategory::MainDish);
    tenders.add_variant(sauce.id());
    catalog.upsert_product(&mut wings).unwrap();
    catalog.upsert_product(&mut tenders).unwrap();

    catalog.delete_variant(sauce.id()).unwrap();

    assert!(!catalog.variants().exists(sauce.id()));
    for option in &options {
        assert!(!catalog.options().exists(option.id()));
    }
    assert_eq!(
        catalog.products().retrieve(wings.id()).unwrap().variant_ids(),
        [size.id().to_string()]
    );
    assert!(catalog
        .products()
        .retrieve(tenders.id())
        .unwrap()
        .variant_ids()
        .is_empty());

    let reloaded = store.catalog();
    assert!(reloaded.options().is_empty());
    assert_eq!(reloaded.variants().len(), 1);
    assert!(!read(store.config.products_path()).contains(sauce.id()));
    assert!(!read(store.config.options_path()).contains(sauce.id()));
}

#[test]
fn deleting_an_unknown_variant_is_not_found() {
    let store = Store::new();
    let mut catalog = store.catalog();
    assert!(matches!(
        catalog.delete_variant("missing"),
        Err(ModelError::NotFound { .. })
    ));
}

#[test]
fn linking_reparents_the_option_and_persists_both_sides() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let (sauce, _) = sauce_with_options(&mut catalog, &[]);
    let mut size = ProductVariant::new("Size", 1.0, true, "single");
    catalog.upsert_variant(&mut size).unwrap();

    let mut large = ProductVariantOption::new(sauce.id(), "Large");
    catalog.link_option(size.id(), &mut large).unwrap();

    assert_eq!(large.variant_id(), size.id());
    assert!(!large.has_changed());
    assert!(catalog.variants().retrieve(size.id()).unwrap().has_option(large.id()));

    let reloaded = store.catalog();
    let stored_size = reloaded.variants().retrieve(size.id()).unwrap();
    assert_eq!(stored_size.option_ids(), [large.id().to_string()]);
    assert!(reloaded
        .variants()
        .retrieve(sauce.id())
        .unwrap()
        .option_ids()
        .is_empty());
}

#[test]
fn linking_to_an_unknown_variant_saves_nothing() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut orphan = ProductVariantOption::new("abcdefgh-1234-abcd-1234-abcdefgh1234", "Mild");

    assert!(catalog.link_option("missing", &mut orphan).is_err());
    assert!(catalog.options().is_empty());
    assert!(!store.config.options_path().exists());
}

#[test]
fn options_are_stitched_onto_variants_on_load() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let (sauce, options) = sauce_with_options(&mut catalog, &["Buffalo", "Honey BBQ"]);

    let reloaded = store.catalog();
    let stored = reloaded.variants().retrieve(sauce.id()).unwrap();
    assert_eq!(stored.option_ids().len(), 2);
    for option in &options {
        assert!(stored.has_option(option.id()));
    }
    assert!(!stored.has_changed());
}

#[test]
fn orphan_options_load_with_a_warning() {
    let store = Store::new();
    let parent = "abcdefgh-1234-abcd-1234-abcdefgh1234";
    let option = "zyxwvuts-4321-zyxw-4321-zyxwvuts4321";
    fs::write(
        store.config.options_path(),
        format!("{},{},Mild\n", option, parent),
    )
    .unwrap();

    let catalog = store.catalog();
    assert!(catalog.options().exists(option));
    assert_eq!(
        catalog.options().logger().warnings_containing(parent).len(),
        1
    );
}

#[test]
fn variant_upsert_rejects_missing_option() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut sauce = ProductVariant::new("Sauce", 0.5, true, "single");
    let never_saved = ProductVariantOption::new(sauce.id(), "Ranch");
    assert!(sauce.add_option(&never_saved));

    assert!(matches!(
        catalog.upsert_variant(&mut sauce),
        Err(ModelError::BrokenReference { .. })
    ));
    assert_eq!(
        catalog
            .variants()
            .logger()
            .warnings_containing(sauce.id())
            .len(),
        1
    );
}

#[test]
fn variant_service_filters_stale_ids() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let (sauce, _) = sauce_with_options(&mut catalog, &["Buffalo"]);
    let ids = vec![sauce.id().to_string(), "stale".to_string()];

    let mut product = Product::new("Wings", 8.5, 3.25, ProductCategory::MainDish);
    product.add_variant("stale");

    let service = catalog.variant_service();
    let tied = service.variants_tied_to_product(&ids);
    assert_eq!(tied.len(), 1);
    assert_eq!(tied[0].name(), "Sauce");
    assert!(!service.validate_variants_tied_to_product(&product));
    assert!(service.validate_variant_options_tied_to_variant(&sauce));
}
