use toastry::{ComputeEndOfDay, DailyStatsModel, DashboardTotals, Record, TransactionService};

use crate::support::{check, menu, Store};

#[test]
fn end_of_day_folds_daily_sales_into_stats() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    let mut order = check(&[(&menu.wings, 3), (&menu.fries, 2)]);
    TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut order);

    let mut stats = DailyStatsModel::new();
    let (products, _, _) = catalog.split_mut();
    ComputeEndOfDay::new(&mut stats, products).execute();

    assert_eq!(stats.current_day(), 1);
    assert_eq!(stats.sales(), 5);
    assert_eq!(stats.revenues(), 24.97);
    assert_eq!(stats.expenses(), 8.5);
    assert_eq!(stats.profit(), 16.47);

    for product in catalog.products().entities() {
        assert_eq!(product.daily_sales(), 0);
    }
    let wings = catalog.products().retrieve(menu.wings.id()).unwrap();
    assert_eq!(wings.total_sales(), 3);
}

#[test]
fn a_quiet_day_still_advances() {
    let store = Store::new();
    let mut catalog = store.catalog();
    menu(&mut catalog);

    let mut stats = DailyStatsModel::new();
    let (products, _, _) = catalog.split_mut();
    ComputeEndOfDay::new(&mut stats, products).execute();
    let (products, _, _) = catalog.split_mut();
    ComputeEndOfDay::new(&mut stats, products).execute();

    assert_eq!(stats.current_day(), 2);
    assert_eq!(stats.sales(), 0);
    assert_eq!(stats.profit(), 0.0);
}

#[test]
fn dashboard_totals_cover_every_product() {
    let store = Store::new();
    let mut catalog = store.catalog();
    let mut checks = store.checks();
    let menu = menu(&mut catalog);

    let mut first = check(&[(&menu.wings, 3)]);
    let mut second = check(&[(&menu.fries, 2)]);
    let mut service = TransactionService::new(&mut catalog, &mut checks);
    service.process_transaction(&mut first);
    service.process_transaction(&mut second);

    let reloaded = store.catalog();
    let totals = DashboardTotals::new(reloaded.products());
    assert_eq!(totals.gross_sales(), 24.97);
    assert_eq!(totals.net_sales(), 16.47);
    assert_eq!(totals.total_sales(), 5);
}
