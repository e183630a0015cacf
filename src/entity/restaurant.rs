use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Entity, ParseEnumError, Record};
use crate::record::{round_currency, Field, RecordParser};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentPeriod {
    #[default]
    Monthly,
    Weekly,
    Daily,
    Yearly,
}

impl RentPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentPeriod::Monthly => "MONTHLY",
            RentPeriod::Weekly => "WEEKLY",
            RentPeriod::Daily => "DAILY",
            RentPeriod::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for RentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentPeriod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MONTHLY" => Ok(RentPeriod::Monthly),
            "WEEKLY" => Ok(RentPeriod::Weekly),
            "DAILY" => Ok(RentPeriod::Daily),
            "YEARLY" => Ok(RentPeriod::Yearly),
            _ => Err(ParseEnumError {
                kind: "rent period",
                value: s.to_string(),
            }),
        }
    }
}

/// A restaurant location.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub entity: Entity,
    name: String,
    rent: f64,
    rent_period: RentPeriod,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, rent: f64, rent_period: RentPeriod) -> Self {
        Restaurant {
            entity: Entity::new(),
            name: name.into(),
            rent: round_currency(rent),
            rent_period,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rent(&self) -> f64 {
        self.rent
    }

    pub fn rent_period(&self) -> RentPeriod {
        self.rent_period
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.entity.mark_changed();
    }

    pub fn set_rent(&mut self, rent: f64, rent_period: RentPeriod) {
        self.rent = round_currency(rent);
        self.rent_period = rent_period;
        self.entity.mark_changed();
    }
}

impl Record for Restaurant {
    const KIND: &'static str = "location";
    const FIELD_COUNT: usize = 4;

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
            Field::currency("rent", self.rent),
            Field::text("rent_period", self.rent_period.as_str()),
        ]
    }

    fn from_record(parser: &mut RecordParser<'_>) -> Self {
        Restaurant {
            entity: Entity::with_id(parser.guid(0)),
            name: parser.string_or(1, "null"),
            rent: parser.currency(2),
            rent_period: parser.parse_or(3, RentPeriod::Monthly),
        }
    }
}
