use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Entity, ParseEnumError, Record};
use crate::record::{round_currency, Field, RecordParser};

/// Menu section a product is listed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    MainDish,
    SideDish,
    Beverage,
    Dessert,
    Soup,
    #[default]
    Unassigned,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::MainDish,
        ProductCategory::SideDish,
        ProductCategory::Beverage,
        ProductCategory::Dessert,
        ProductCategory::Soup,
        ProductCategory::Unassigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::MainDish => "MAIN_DISH",
            ProductCategory::SideDish => "SIDE_DISH",
            ProductCategory::Beverage => "BEVERAGE",
            ProductCategory::Dessert => "DESSERT",
            ProductCategory::Soup => "SOUP",
            ProductCategory::Unassigned => "UNASSIGNED",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseEnumError {
                kind: "product category",
                value: s.to_string(),
            })
    }
}

/// A menu item with its lifetime sales counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub entity: Entity,
    name: String,
    price: f64,
    cost: f64,
    category: ProductCategory,
    variant_ids: Vec<String>,
    total_sales: u32,
    total_expenses: f64,
    total_revenue: f64,
    daily_sales: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, cost: f64, category: ProductCategory) -> Self {
        Product {
            entity: Entity::new(),
            name: name.into(),
            price: round_currency(price),
            cost: round_currency(cost),
            category,
            variant_ids: Vec::new(),
            total_sales: 0,
            total_expenses: 0.0,
            total_revenue: 0.0,
            daily_sales: 0,
        }
    }

    fn blank(id: impl Into<String>) -> Self {
        Product {
            entity: Entity::with_id(id),
            name: String::new(),
            price: 0.0,
            cost: 0.0,
            category: ProductCategory::Unassigned,
            variant_ids: Vec::new(),
            total_sales: 0,
            total_expenses: 0.0,
            total_revenue: 0.0,
            daily_sales: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    /// Identifiers of the variants offered with this product, in order.
    pub fn variant_ids(&self) -> &[String] {
        &self.variant_ids
    }

    pub fn has_variant(&self, variant_id: &str) -> bool {
        self.variant_ids.iter().any(|id| id == variant_id)
    }

    pub fn total_sales(&self) -> u32 {
        self.total_sales
    }

    pub fn total_expenses(&self) -> f64 {
        self.total_expenses
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Units sold since the last end of day. Never persisted.
    pub fn daily_sales(&self) -> u32 {
        self.daily_sales
    }

    pub fn total_profit(&self) -> f64 {
        let sales = f64::from(self.total_sales);
        round_currency(self.price * sales - self.cost * sales)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.entity.mark_changed();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = round_currency(price);
        self.entity.mark_changed();
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = round_currency(cost);
        self.entity.mark_changed();
    }

    pub fn set_category(&mut self, category: ProductCategory) {
        self.category = category;
        self.entity.mark_changed();
    }

    pub fn add_variant(&mut self, variant_id: impl Into<String>) {
        let variant_id = variant_id.into();
        if !self.has_variant(&variant_id) {
            self.variant_ids.push(variant_id);
            self.entity.mark_changed();
        }
    }

    /// Returns whether the product referenced the variant.
    pub fn remove_variant(&mut self, variant_id: &str) -> bool {
        let before = self.variant_ids.len();
        self.variant_ids.retain(|id| id != variant_id);
        let removed = self.variant_ids.len() != before;
        if removed {
            self.entity.mark_changed();
        }
        removed
    }

    /// Replace the variant list after it was resolved against the variant
    /// model. Does not mark the product as changed.
    pub(crate) fn set_resolved_variants(&mut self, variant_ids: Vec<String>) {
        self.variant_ids = variant_ids;
    }

    /// Apply `quantity` units sold to the lifetime and daily counters.
    pub fn record_sale(&mut self, quantity: u32) {
        let units = f64::from(quantity);
        self.total_sales = self.total_sales.saturating_add(quantity);
        self.total_expenses = round_currency(self.total_expenses + self.cost * units);
        self.total_revenue = round_currency(self.total_revenue + self.price * units);
        self.daily_sales = self.daily_sales.saturating_add(quantity);
        self.entity.mark_changed();
    }

    pub fn reset_daily_sales(&mut self) {
        self.daily_sales = 0;
    }
}

impl Record for Product {
    const KIND: &'static str = "product";
    const FIELD_COUNT: usize = 9;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn schema(&self) -> Vec<Field> {
        vec![
            Field::text("id", self.entity.id()),
            Field::text("name", self.name.as_str()),
            Field::currency("price", self.price),
            Field::currency("cost", self.cost),
            Field::int("total_sales", self.total_sales),
            Field::currency("total_expenses", self.total_expenses),
            Field::currency("total_revenue", self.total_revenue),
            Field::text("category", self.category.as_str()),
            Field::list("variants", self.variant_ids.clone()),
        ]
    }

    fn from_record(parser: &mut RecordParser<'_>) -> Self {
        let mut product = Product::blank(parser.guid(0));
        product.name = parser.string_or(1, "null");
        product.price = parser.currency(2);
        product.cost = parser.currency(3);
        product.total_sales = parser.unsigned(4);
        product.total_expenses = parser.currency(5);
        product.total_revenue = parser.currency(6);
        product.category = parser.parse_or(7, ProductCategory::Unassigned);
        product.variant_ids = parser.list(8);
        product
    }
}
