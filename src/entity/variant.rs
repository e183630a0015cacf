use super::{Entity, ProductVariantOption, Record};
use crate::record::{Field, RecordParser};

/// A choice group offered with a product, e.g. "Sauce" or "Size".
///
/// Options are stored in their own file and stitched back onto their parent
/// variant when the option model loads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariant {
    pub entity: Entity,
    name: String,
    cost: f64,
    selection_required: bool,
    selection_type: String,
    option_ids: Vec<String>,
}

impl ProductVariant {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        selection_required: bool,
        selection_type: impl Into<String>,
    ) -> Self {
        ProductVariant {
            entity: Entity::new(),
            name: name.into(),
            cost,
            selection_required,
            selection_type: selection_type.into(),
            option_ids: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Additional cost charged when the variant is selected.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn selection_required(&self) -> bool {
        self.selection_required
    }

    pub fn selection_type(&self) -> &str {
        &self.selection_type
    }

    pub fn option_ids(&self) -> &[String] {
        &self.option_ids
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option_ids.iter().any(|id| id == option_id)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.entity.mark_changed();
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
        self.entity.mark_changed();
    }

    pub fn set_selection_required(&mut self, required: bool) {
        self.selection_required = required;
        self.entity.mark_changed();
    }

    pub fn set_selection_type(&mut self, selection_type: impl Into<String>) {
        self.selection_type = selection_type.into();
        self.entity.mark_changed();
    }

    /// Add an option whose parent is this variant. Returns false if the
    /// option belongs to another variant or is already listed.
    pub fn add_option(&mut self, option: &ProductVariantOption) -> bool {
        if option.variant_id() != self.entity.id() || self.has_option(option.id()) {
            return false;
        }
        self.option_ids.push(option.id().to_string());
        self.entity.mark_changed();
        true
    }

    pub fn remove_option(&mut self, option_id: &str) -> bool {
        let before = self.option_ids.len();
        self.option_ids.retain(|id| id != option_id);
        let removed = self.option_ids.len() != before;
        if removed {
            self.entity.mark_changed();
        }
        removed
    }

    pub(crate) fn attach_option_id(&mut self, option_id: &str) {
        if !self.has_option(option_id) {
            self.option_ids.push(option_id.to_string());
        }
    }

    pub(crate) fn clear_option_ids(&mut self) {
        self.option_ids.clear();
    }
}

impl Record for ProductVariant {
    const KIND: &'static str = "variant";
    const FIELD_COUNT: usize = 5;

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
            Field::decimal("cost", self.cost),
            Field::bool("selection_required", self.selection_required),
            Field::text("selection_type", self.selection_type.as_str()),
        ]
    }

    fn from_record(parser: &mut RecordParser<'_>) -> Self {
        ProductVariant {
            entity: Entity::with_id(parser.guid(0)),
            name: parser.string_or(1, "null"),
            cost: parser.double(2),
            selection_required: parser.bool(3),
            selection_type: parser.string(4),
            option_ids: Vec::new(),
        }
    }
}
