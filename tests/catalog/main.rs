//! Catalog integration tests: products, variants and options stored in flat
//! files and kept consistent with each other.

mod products;
mod support;
mod variants;
