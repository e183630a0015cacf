use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ParseEnumError, Record};
use crate::record::{round_currency, Field, RecordParser};

const SELECTION_SEPARATOR: char = '/';

/// Where a check is in its processing lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOutcome {
    #[default]
    Created,
    Pending,
    CompletedSuccessfully,
    CompletedWithErrors,
}

impl TransactionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionOutcome::Created => "CREATED",
            TransactionOutcome::Pending => "PENDING",
            TransactionOutcome::CompletedSuccessfully => "COMPLETED_SUCCESSFULLY",
            TransactionOutcome::CompletedWithErrors => "COMPLETED_WITH_ERRORS",
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionOutcome {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CREATED" => Ok(TransactionOutcome::Created),
            "PENDING" => Ok(TransactionOutcome::Pending),
            "COMPLETED_SUCCESSFULLY" => Ok(TransactionOutcome::CompletedSuccessfully),
            "COMPLETED_WITH_ERRORS" => Ok(TransactionOutcome::CompletedWithErrors),
            other => Err(ParseEnumError {
                kind: "transaction outcome",
                value: other.to_string(),
            }),
        }
    }
}

/// What the customer picked: a product, optionally with one variant and
/// one of its options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductVariantSelected {
    product_id: String,
    variant_id: Option<String>,
    option_id: Option<String>,
}

impl ProductVariantSelected {
    pub fn new(product_id: impl Into<String>) -> Self {
        ProductVariantSelected {
            product_id: product_id.into(),
            variant_id: None,
            option_id: None,
        }
    }

    pub fn with_variant(
        product_id: impl Into<String>,
        variant_id: impl Into<String>,
        option_id: Option<String>,
    ) -> Self {
        ProductVariantSelected {
            product_id: product_id.into(),
            variant_id: Some(variant_id.into()),
            option_id,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn variant_id(&self) -> Option<&str> {
        self.variant_id.as_deref()
    }

    pub fn option_id(&self) -> Option<&str> {
        self.option_id.as_deref()
    }

    /// `product[/variant[/option]]`
    fn encode(&self) -> String {
        let mut key = self.product_id.clone();
        if let Some(variant_id) = &self.variant_id {
            key.push(SELECTION_SEPARATOR);
            key.push_str(variant_id);
            if let Some(option_id) = &self.option_id {
                key.push(SELECTION_SEPARATOR);
                key.push_str(option_id);
            }
        }
        key
    }

    fn decode(key: &str) -> Option<Self> {
        let mut parts = key.split(SELECTION_SEPARATOR);
        let product_id = parts.next().filter(|p| !p.is_empty())?;
        let variant_id = parts.next().map(str::to_string);
        let option_id = parts.next().map(str::to_string);
        if parts.next().is_some() {
            return None;
        }
        Some(ProductVariantSelected {
            product_id: product_id.to_string(),
            variant_id,
            option_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLineItem {
    selected: ProductVariantSelected,
    quantity: u32,
}

impl CheckLineItem {
    pub fn new(selected: ProductVariantSelected, quantity: u32) -> Self {
        CheckLineItem { selected, quantity }
    }

    pub fn selected(&self) -> &ProductVariantSelected {
        &self.selected
    }

    pub fn product_id(&self) -> &str {
        self.selected.product_id()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A customer check and its processing outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub entity: Entity,
    line_items: Vec<CheckLineItem>,
    purchased_at: DateTime<Utc>,
    customers_served: u32,
    subtotal: f64,
    total: f64,
    cogs: f64,
    stage: TransactionOutcome,
}

impl Default for Check {
    fn default() -> Self {
        Check::new()
    }
}

impl Check {
    pub fn new() -> Self {
        Check {
            entity: Entity::new(),
            line_items: Vec::new(),
            purchased_at: Utc::now(),
            customers_served: 0,
            subtotal: 0.0,
            total: 0.0,
            cogs: 0.0,
            stage: TransactionOutcome::Created,
        }
    }

    pub fn line_items(&self) -> &[CheckLineItem] {
        &self.line_items
    }

    pub fn purchased_at(&self) -> DateTime<Utc> {
        self.purchased_at
    }

    pub fn customers_served(&self) -> u32 {
        self.customers_served
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Cost of goods sold.
    pub fn cogs(&self) -> f64 {
        self.cogs
    }

    pub fn stage(&self) -> TransactionOutcome {
        self.stage
    }

    pub fn add_line_item(&mut self, item: CheckLineItem) {
        self.line_items.push(item);
        self.entity.mark_changed();
    }

    /// Put `item` back at `index`, returning what was there.
    pub fn replace_line_item(&mut self, index: usize, item: CheckLineItem) -> Option<CheckLineItem> {
        let slot = self.line_items.get_mut(index)?;
        self.entity.mark_changed();
        Some(std::mem::replace(slot, item))
    }

    pub fn set_customers_served(&mut self, customers: u32) {
        self.customers_served = customers;
        self.entity.mark_changed();
    }

    pub fn set_purchased_at(&mut self, purchased_at: DateTime<Utc>) {
        self.purchased_at = purchased_at;
        self.entity.mark_changed();
    }

    pub fn set_stage(&mut self, stage: TransactionOutcome) {
        self.stage = stage;
        self.entity.mark_changed();
    }

    pub fn complete_transaction(&mut self, successful: bool) {
        self.set_stage(if successful {
            TransactionOutcome::CompletedSuccessfully
        } else {
            TransactionOutcome::CompletedWithErrors
        });
    }

    /// Add one processed line to the running totals.
    pub fn add_to_totals(&mut self, revenue: f64, cogs: f64) {
        self.subtotal = round_currency(self.subtotal + revenue);
        self.total = round_currency(self.total + revenue);
        self.cogs = round_currency(self.cogs + cogs);
        self.entity.mark_changed();
    }
}

impl Record for Check {
    const KIND: &'static str = "check";
    const FIELD_COUNT: usize = 8;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn schema(&self) -> Vec<Field> {
        let purchases = self
            .line_items
            .iter()
            .map(|item| (item.selected.encode(), item.quantity.to_string()))
            .collect();

        vec![
            Field::text("id", self.entity.id()),
            Field::timestamp("purchased_at", self.purchased_at),
            Field::int("customers_served", self.customers_served),
            Field::currency("subtotal", self.subtotal),
            Field::currency("total", self.total),
            Field::currency("cogs", self.cogs),
            Field::text("stage", self.stage.as_str()),
            Field::pairs("purchases", purchases),
        ]
    }

    fn from_record(parser: &mut RecordParser<'_>) -> Self {
        let mut line_items = Vec::new();
        for (key, quantity) in parser.pairs(7) {
            let Some(selected) = ProductVariantSelected::decode(&key) else {
                parser.reject(7, &format!("'{}' is not a product selection", key));
                continue;
            };
            match quantity.parse::<u32>() {
                Ok(quantity) => line_items.push(CheckLineItem::new(selected, quantity)),
                Err(err) => parser.reject(7, &format!("quantity '{}': {}", quantity, err)),
            }
        }

        Check {
            entity: Entity::with_id(parser.guid(0)),
            purchased_at: parser.timestamp(1),
            customers_served: parser.unsigned(2),
            subtotal: parser.currency(3),
            total: parser.currency(4),
            cogs: parser.currency(5),
            stage: parser.parse_or(6, TransactionOutcome::Created),
            line_items,
        }
    }
}
