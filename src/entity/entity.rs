use serde::{Deserialize, Serialize};

use crate::id;

/// Identity and change tracking shared by every stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    #[serde(skip, default)]
    has_changed: bool,
}

impl Default for Entity {
    fn default() -> Self {
        Entity::new()
    }
}

impl Entity {
    /// A fresh entity with a generated identifier. It has not been persisted,
    /// so it starts out changed.
    pub fn new() -> Self {
        Entity {
            id: id::generate(),
            has_changed: true,
        }
    }

    /// An entity reloaded from storage under a known identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            has_changed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub fn mark_changed(&mut self) {
        self.has_changed = true;
    }

    /// Clear the change flag. Called by models after a successful write.
    pub fn reset_changed_state(&mut self) {
        self.has_changed = false;
    }
}
