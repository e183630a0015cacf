//! Stored entities and the `Record` contract between them and their models.

mod check;
mod entity;
mod product;
mod restaurant;
mod variant;
mod variant_option;

use std::fmt;

use crate::record::{self, Field, RecordParser};

pub use check::{Check, CheckLineItem, ProductVariantSelected, TransactionOutcome};
pub use entity::Entity;
pub use product::{Product, ProductCategory};
pub use restaurant::{RentPeriod, Restaurant};
pub use variant::ProductVariant;
pub use variant_option::ProductVariantOption;

/// An entity that can be written to and read back from one stored line.
pub trait Record: Clone {
    /// Name used in log messages and errors.
    const KIND: &'static str;
    /// Number of fields in a well-formed line.
    const FIELD_COUNT: usize;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    /// Ordered fields of the stored line; the identifier comes first.
    fn schema(&self) -> Vec<Field>;

    /// Rebuild an entity from a structurally valid line. References to other
    /// entities are kept as raw identifiers for the owning model to resolve.
    fn from_record(parser: &mut RecordParser<'_>) -> Self;

    fn id(&self) -> &str {
        self.entity().id()
    }

    fn has_changed(&self) -> bool {
        self.entity().has_changed()
    }

    fn reset_changed_state(&mut self) {
        self.entity_mut().reset_changed_state();
    }

    fn serialize(&self) -> String {
        record::join(&self.schema())
    }
}

/// Unrecognized name for one of the stored enumerations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
