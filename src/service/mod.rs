//! Workflows spanning more than one model.
//!
//! Services borrow the models they coordinate for as long as they live, so
//! a service is usually built, used and dropped within one call site:
//!
//! ```ignore
//! use toastry::{Catalog, CheckModel, StoreConfig, TransactionService};
//!
//! let config = StoreConfig::in_dir("data");
//! let mut catalog = Catalog::open(&config);
//! let mut checks = CheckModel::new(config.checks_path());
//! catalog.load()?;
//! checks.load_entities()?;
//!
//! TransactionService::new(&mut catalog, &mut checks).process_transaction(&mut check);
//! ```

mod dashboard;
mod end_of_day;
mod transaction;
mod variant;

pub use dashboard::DashboardTotals;
pub use end_of_day::ComputeEndOfDay;
pub use transaction::TransactionService;
pub use variant::VariantService;
