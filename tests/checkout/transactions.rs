use toastry::{
    Check, CheckLineItem, ProductVariantSelected, Record, TransactionOutcome, TransactionService,
};

use crate::support::{check, forget_sauce_elsewhere, menu, Store};

#[test]
fn successful_check_updates_products_and_is_stored() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    let mut order = check(&[(&menu.wings, 3), (&menu.fries, 2)]);
    let processed = TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    assert!(processed);
    assert_eq!(order.stage(), TransactionOutcome::CompletedSuccessfully);
    assert_eq!(order.subtotal(), 24.97);
    assert_eq!(order.total(), 24.97);
    assert_eq!(order.cogs(), 8.5);

    let wings = catalog.products().retrieve(menu.wings.id()).unwrap();
    assert_eq!(wings.total_sales(), 3);
    assert_eq!(wings.daily_sales(), 3);
    assert_eq!(wings.total_revenue(), 17.97);
    assert_eq!(wings.total_expenses(), 6.0);

    let reloaded = store.catalog();
    let stored = reloaded.products().retrieve(menu.fries.id()).unwrap();
    assert_eq!(stored.total_sales(), 2);
    assert_eq!(stored.total_revenue(), 7.0);
    assert_eq!(stored.daily_sales(), 0);

    let stored_check = store.checks();
    assert_eq!(stored_check.retrieve(order.id()).unwrap(), &order);
}

#[test]
fn failed_line_item_is_rolled_back_and_flagged() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    // Another terminal deletes the sauce; this catalog only refreshes its
    // variants, so its cached wings still offers the sauce.
    forget_sauce_elsewhere(&store, &mut catalog, &menu);

    let mut order = check(&[(&menu.fries, 2), (&menu.wings, 1)]);
    let wings_line = order.line_items()[1].clone();
    let processed = TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    assert!(processed);
    assert_eq!(order.stage(), TransactionOutcome::CompletedWithErrors);
    assert_eq!(order.line_items().len(), 2);
    assert_eq!(order.line_items()[1], wings_line);
    assert_eq!(order.subtotal(), 7.0);

    assert_eq!(
        checks.logger().warnings_containing(menu.wings.id()).len(),
        1
    );
    assert_eq!(
        catalog
            .products()
            .logger()
            .warnings_containing(menu.wings.id())
            .len(),
        1
    );

    // The in-memory counters were already bumped when the write failed.
    let cached = catalog.products().retrieve(menu.wings.id()).unwrap();
    assert_eq!(cached.total_sales(), 1);

    let reloaded = store.catalog();
    let wings = reloaded.products().retrieve(menu.wings.id()).unwrap();
    assert_eq!(wings.total_sales(), 0);
    assert_eq!(wings.total_revenue(), 0.0);
    let fries = reloaded.products().retrieve(menu.fries.id()).unwrap();
    assert_eq!(fries.total_sales(), 2);

    let stored = store.checks();
    assert_eq!(
        stored.retrieve(order.id()).unwrap().stage(),
        TransactionOutcome::CompletedWithErrors
    );
}

#[test]
fn stage_reflects_the_last_line_item() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    forget_sauce_elsewhere(&store, &mut catalog, &menu);

    let mut order = check(&[(&menu.wings, 1), (&menu.fries, 1)]);
    TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    assert_eq!(order.stage(), TransactionOutcome::CompletedSuccessfully);
    assert_eq!(order.subtotal(), 3.5);
}

#[test]
fn unknown_product_fails_only_its_line_item() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    let mut order = check(&[(&menu.fries, 1)]);
    order.add_line_item(CheckLineItem::new(
        ProductVariantSelected::new("abcdefgh-1234-abcd-1234-abcdefgh1234"),
        4,
    ));

    let mut service = TransactionService::new(&mut catalog, &mut checks);
    assert!(service.process_transaction(&mut order));
    assert_eq!(order.stage(), TransactionOutcome::CompletedWithErrors);
    assert_eq!(
        service
            .logger()
            .warnings_containing("abcdefgh-1234-abcd-1234-abcdefgh1234")
            .len(),
        1
    );
}

#[test]
fn empty_check_is_not_processed() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();

    let mut order = Check::new();
    let processed = TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    assert!(!processed);
    assert_eq!(order.stage(), TransactionOutcome::Created);
    assert!(checks.is_empty());
    assert!(!store.config.checks_path().exists());
}

#[test]
fn reprocessing_a_stored_check_is_logged_fatal() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    let mut order = check(&[(&menu.fries, 1)]);
    TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);
    TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    assert_eq!(checks.logger().fatals().len(), 1);
    assert_eq!(
        catalog
            .products()
            .retrieve(menu.fries.id())
            .unwrap()
            .total_sales(),
        2
    );
}
