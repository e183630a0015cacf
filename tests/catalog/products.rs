use std::fs;

use toastry::{ModelError, Product, ProductCategory, ProductVariant, Record};

use crate::support::{read, sauce_with_options, Store};

#[test]
fn product_round_trips_through_its_file() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let (sauce, _) = sauce_with_options(&mut catalog, &["Buffalo"]);

    let mut wings = Product::new("Wings", 8.5, 3.25, ProductCategory::MainDish);
    wings.add_variant(sauce.id());
    catalog.upsert_product(&mut wings).unwrap();

    let reloaded = store.catalog();
    let stored = reloaded.products().retrieve(wings.id()).unwrap();
    assert_eq!(stored, &wings);
    assert_eq!(stored.variant_ids(), [sauce.id().to_string()]);
    assert!(!stored.has_changed());
}

#[test]
fn sunken_ship_price_change_survives_reload() {
    let store = Store::new();
    let mut catalog = store.catalog();

    let mut ship = Product::new("Sunken Ship", 5.99, 2.0, ProductCategory::MainDish);
    catalog.insert_product(&mut ship).unwrap();

    let mut catalog = store.catalog();
    let mut ship = catalog.products().retrieve(ship.id()).unwrap().clone();
    assert_eq!(ship.price(), 5.99);

    ship.set_price(6.99);
    assert!(ship.has_changed());
    catalog.upsert_product(&mut ship).unwrap();

    let catalog = store.catalog();
    let stored = catalog.products().retrieve(ship.id()).unwrap();
    assert_eq!(stored.name(), "Sunken Ship");
    assert_eq!(stored.price(), 6.99);
    assert!(!stored.has_changed());
    assert_eq!(read(store.config.products_path()).lines().count(), 1);
}

#[test]
fn upsert_rejects_product_with_missing_variant() {
    let store = Store::new();
    let mut catalog = store.catalog();

    let ghost = ProductVariant::new("Ghost", 0.0, false, "single");
    let mut soup = Product::new("Soup", 4.0, 1.0, ProductCategory::Soup);
    soup.add_variant(ghost.id());

    let err = catalog.upsert_product(&mut soup).unwrap_err();
    match err {
        ModelError::BrokenReference { id, missing, .. } => {
            assert_eq!(id, soup.id());
            assert_eq!(missing, vec![ghost.id().to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }

    let warnings = catalog.products().logger().warnings_containing(soup.id());
    assert_eq!(warnings.len(), 1);
    assert!(!store.config.products_path().exists());
    assert!(!catalog.products().exists(soup.id()));
    assert!(soup.has_changed());
}

#[test]
fn insert_rejects_duplicate_and_keeps_file() {
    let store = Store::new();
    let mut catalog = store.catalog();

    let mut fries = Product::new("Fries", 3.5, 1.0, ProductCategory::SideDish);
    catalog.insert_product(&mut fries).unwrap();
    let before = read(store.config.products_path());

    fries.set_price(4.5);
    assert!(matches!(
        catalog.insert_product(&mut fries),
        Err(ModelError::Duplicate { .. })
    ));
    assert_eq!(read(store.config.products_path()), before);
    assert_eq!(
        catalog
            .products()
            .logger()
            .warnings_containing(fries.id())
            .len(),
        1
    );
}

#[test]
fn reload_counts_invalid_lines_the_same_every_time() {
    let store = Store::new();
    let valid = Product::new("Tea", 2.0, 0.5, ProductCategory::Beverage);
    let lines = [
        valid.serialize(),
        "not-a-guid,Tea,2.00,0.50,0,0.00,0.00,BEVERAGE,[]".to_string(),
        format!("{},Tea,2.00", valid.id()),
        format!("{},,2.00,0.50,0,0.00,0.00,BEVERAGE,[]", "abcdefgh-1234-abcd-1234-abcdefgh1234"),
    ];
    fs::write(store.config.products_path(), lines.join("\n")).unwrap();

    let mut catalog = store.catalog();
    assert_eq!(catalog.products().len(), 1);
    assert_eq!(catalog.products().failed_to_parse_count(), 3);

    catalog.load().unwrap();
    assert_eq!(catalog.products().len(), 1);
    assert_eq!(catalog.products().failed_to_parse_count(), 3);
}

#[test]
fn stale_variant_ids_are_dropped_on_load() {
    let store = Store::new();
    let ghost = "abcdefgh-1234-abcd-1234-abcdefgh1234";
    let product_id = "zyxwvuts-4321-zyxw-4321-zyxwvuts4321";
    fs::write(
        store.config.products_path(),
        format!(
            "{},Burger,9.00,4.00,0,0.00,0.00,MAIN_DISH,[{}]\n",
            product_id, ghost
        ),
    )
    .unwrap();

    let catalog = store.catalog();
    let burger = catalog.products().retrieve(product_id).unwrap();
    assert!(burger.variant_ids().is_empty());
    assert!(!burger.has_changed());
}

#[test]
fn retrieve_unknown_product_is_not_found() {
    let store = Store::new();
    let catalog = store.catalog();
    assert!(matches!(
        catalog.products().retrieve("missing"),
        Err(ModelError::NotFound { .. })
    ));
}
