mod catalog;
mod config;
mod entity;
mod error;
pub mod id;
mod lock;
mod logging;
mod model;
pub mod record;
mod service;

pub use catalog::Catalog;
pub use config::{ConfigError, StoreConfig};
pub use entity::{
    Check, CheckLineItem, Entity, ParseEnumError, Product, ProductCategory, ProductVariant,
    ProductVariantOption, ProductVariantSelected, Record, RentPeriod, Restaurant,
    TransactionOutcome,
};
pub use error::ModelError;
pub use lock::{ModelLock, ModelLockGuard};
pub use logging::{LogLevel, LogMessage, Logger};
pub use model::{
    CheckModel, DailyStatsModel, EntityModel, FlatFile, ProductModel, RestaurantModel,
    VariantModel, VariantOptionModel,
};
pub use service::{ComputeEndOfDay, DashboardTotals, TransactionService, VariantService};
