use super::{Entity, Record};
use crate::record::{Field, RecordParser};

/// One selectable value of a variant, e.g. "Buffalo" under "Sauce".
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariantOption {
    pub entity: Entity,
    variant_id: String,
    option_name: String,
}

impl ProductVariantOption {
    pub fn new(variant_id: impl Into<String>, option_name: impl Into<String>) -> Self {
        ProductVariantOption {
            entity: Entity::new(),
            variant_id: variant_id.into(),
            option_name: option_name.into(),
        }
    }

    /// Identifier of the parent variant.
    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    pub fn set_parent_variant(&mut self, variant_id: impl Into<String>) {
        self.variant_id = variant_id.into();
        self.entity.mark_changed();
    }

    pub fn set_option_name(&mut self, option_name: impl Into<String>) {
        self.option_name = option_name.into();
        self.entity.mark_changed();
    }
}

impl Record for ProductVariantOption {
    const KIND: &'static str = "variant option";
    const FIELD_COUNT: usize = 3;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn schema(&self) -> Vec<Field> {
        vec![
            Field::text("id", self.entity.id()),
            Field::text("variant_id", self.variant_id.as_str()),
            Field::text("option_name", self.option_name.as_str()),
        ]
    }

    fn from_record(parser: &mut RecordParser<'_>) -> Self {
        ProductVariantOption {
            entity: Entity::with_id(parser.guid(0)),
            variant_id: parser.guid(1),
            option_name: parser.string_or(2, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Logger;

    #[test]
    fn round_trips_through_a_line() {
        let mut option =
            ProductVariantOption::new("abcdefgh-1234-abcd-1234-abcdefgh1234", "Buffalo");
        option.reset_changed_state();
        let line = option.serialize();
        assert!(line.ends_with(",abcdefgh-1234-abcd-1234-abcdefgh1234,Buffalo"));

        let mut parser = RecordParser::new(&line, Logger::new("test"));
        assert_eq!(ProductVariantOption::from_record(&mut parser), option);
    }

    #[test]
    fn reparenting_marks_changed() {
        let mut option = ProductVariantOption::new("v-1", "Mild");
        option.reset_changed_state();
        option.set_parent_variant("v-2");
        assert!(option.has_changed());
        assert_eq!(option.variant_id(), "v-2");
    }
}
