use std::ops::Deref;
use std::path::PathBuf;

use super::EntityModel;
use crate::entity::Check;
use crate::error::ModelError;
use crate::logging::Logger;

/// Processed checks.
#[derive(Debug)]
pub struct CheckModel {
    inner: EntityModel<Check>,
}

impl CheckModel {
    pub const DEFAULT_FILE: &'static str = "Transactions.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        CheckModel {
            inner: EntityModel::new(path, Logger::new("CheckModel")),
        }
    }

    pub fn load_entities(&mut self) -> Result<(), ModelError> {
        self.inner.load_entities()
    }

    pub fn insert(&mut self, check: &mut Check) -> Result<(), ModelError> {
        self.inner.insert(check)
    }

    pub fn upsert(&mut self, check: &mut Check) -> Result<(), ModelError> {
        self.inner.upsert(check)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), ModelError> {
        self.inner.delete(id)
    }
}

impl Deref for CheckModel {
    type Target = EntityModel<Check>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
