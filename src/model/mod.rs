//! Flat-file entity models.
//!
//! An [`EntityModel`] owns the in-memory `id -> entity` map for one entity
//! type and keeps it in step with the file behind it. Every mutation reads
//! the whole file, edits the matching row and rewrites it.
//!
//! ## Example
//!
//! ```ignore
//! use toastry::{EntityModel, Logger, ProductVariant};
//!
//! let mut variants = EntityModel::<ProductVariant>::new("ProductVariants.txt", Logger::new("VariantModel"));
//! variants.load_entities()?;
//! let mut sauce = ProductVariant::new("Sauce", 0.5, true, "single");
//! variants.upsert(&mut sauce)?;
//! ```

mod check;
mod daily_stats;
mod flat_file;
mod product;
mod restaurant;
mod variant;
mod variant_option;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::entity::Record;
use crate::error::ModelError;
use crate::logging::Logger;
use crate::record::{self, RecordParser};

pub use check::CheckModel;
pub use daily_stats::DailyStatsModel;
pub use flat_file::FlatFile;
pub use product::ProductModel;
pub use restaurant::RestaurantModel;
pub use variant::VariantModel;
pub use variant_option::VariantOptionModel;

/// Generic CRUD over one entity type and its backing file.
#[derive(Debug)]
pub struct EntityModel<T> {
    entities: HashMap<String, T>,
    file: FlatFile,
    logger: Logger,
    failed_to_parse: usize,
}

impl<T: Record> EntityModel<T> {
    pub fn new(path: impl Into<PathBuf>, logger: Logger) -> Self {
        EntityModel {
            entities: HashMap::new(),
            file: FlatFile::new(path),
            logger,
            failed_to_parse: 0,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Lines skipped or only partially parsed by the last load.
    pub fn failed_to_parse_count(&self) -> usize {
        self.failed_to_parse
    }

    pub fn load_entities(&mut self) -> Result<(), ModelError> {
        self.load_entities_with(|_| {})
    }

    /// Replace the cached entities with the contents of the file.
    ///
    /// Structurally invalid lines are skipped. `resolve` runs on each
    /// deserialized entity before it is cached, so the concrete model can
    /// settle references to sibling models. A failed read leaves the cache
    /// as it was.
    pub fn load_entities_with<F>(&mut self, resolve: F) -> Result<(), ModelError>
    where
        F: FnMut(&mut T),
    {
        let lines = self.read_all()?;
        self.load_lines_with(&lines, resolve);
        Ok(())
    }

    /// Every line of the backing file. Logs FATAL when the read fails.
    pub(crate) fn read_all(&self) -> Result<Vec<String>, ModelError> {
        self.file.read_lines().map_err(|err| {
            self.logger.fatal(format!(
                "Could not read {} while loading entities: {}",
                self.path().display(),
                err
            ));
            ModelError::io(self.path(), err)
        })
    }

    pub(crate) fn load_lines_with<F>(&mut self, lines: &[String], mut resolve: F)
    where
        F: FnMut(&mut T),
    {
        let mut loaded = HashMap::with_capacity(lines.len());
        let mut failed = 0;

        for line in lines.iter().filter(|line| !line.trim().is_empty()) {
            if let Err(defect) = record::check_line(line, T::FIELD_COUNT) {
                failed += 1;
                self.logger.warning(format!(
                    "Could not parse {} line '{}'; {}.",
                    T::KIND,
                    line,
                    defect
                ));
                continue;
            }

            let mut parser = RecordParser::new(line, self.logger.scoped("RecordParser"));
            let mut entity = T::from_record(&mut parser);
            if parser.failures() > 0 {
                failed += 1;
            }

            resolve(&mut entity);
            entity.reset_changed_state();
            loaded.insert(entity.id().to_string(), entity);
        }

        self.logger.verbose(format!(
            "Finished loading {} entities: {} loaded, {} failed to parse.",
            T::KIND,
            loaded.len(),
            failed
        ));
        self.entities = loaded;
        self.failed_to_parse = failed;
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.entities.get(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entities.get_mut(id)
    }

    pub fn retrieve(&self, id: &str) -> Result<&T, ModelError> {
        self.find(id).ok_or_else(|| ModelError::NotFound {
            model: T::KIND,
            id: id.to_string(),
        })
    }

    /// Entity at `index` in identifier order.
    pub fn retrieve_at(&self, index: usize) -> Option<&T> {
        self.entities().into_iter().nth(index)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Every cached entity, ordered by identifier.
    pub fn entities(&self) -> Vec<&T> {
        let mut entities: Vec<&T> = self.entities.values().collect();
        entities.sort_by(|a, b| a.id().cmp(b.id()));
        entities
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entities.values_mut()
    }

    /// The subset of `ids` held by this model, in their original order.
    pub fn existing_ids(&self, ids: &[String]) -> Vec<String> {
        ids.iter().filter(|id| self.exists(id)).cloned().collect()
    }

    /// The subset of `ids` this model does not hold.
    pub fn missing_ids(&self, ids: &[String]) -> Vec<String> {
        ids.iter().filter(|id| !self.exists(id)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Append a new row. Fails if a row with the same identifier is already
    /// in the file.
    pub fn insert(&mut self, entity: &mut T) -> Result<(), ModelError> {
        let mut lines = self.read_for_write(entity.id())?;
        if FlatFile::position(&lines, entity.id()).is_some() {
            self.logger.warning(format!(
                "Entity {} exists in database and therefore cannot be added.",
                entity.id()
            ));
            return Err(ModelError::Duplicate {
                model: T::KIND,
                id: entity.id().to_string(),
            });
        }

        lines.push(self.build_line(entity)?);
        self.write(&lines, entity.id())?;
        self.cache(entity);
        self.logger
            .success(format!("Successfully added {} into database.", entity.id()));
        Ok(())
    }

    /// Replace the row with the entity's identifier, or append one.
    pub fn upsert(&mut self, entity: &mut T) -> Result<(), ModelError> {
        let mut lines = self.read_for_write(entity.id())?;
        let line = self.build_line(entity)?;

        match FlatFile::position(&lines, entity.id()) {
            Some(index) => {
                self.logger.verbose(format!(
                    "Entity {} exists in database; updating record.",
                    entity.id()
                ));
                lines[index] = line;
            }
            None => {
                self.logger.verbose(format!(
                    "Entity {} does not exist in database; inserting record.",
                    entity.id()
                ));
                lines.push(line);
            }
        }

        self.write(&lines, entity.id())?;
        self.cache(entity);
        self.logger
            .success(format!("Successfully upserted {} into database.", entity.id()));
        Ok(())
    }

    /// Remove the entity from the file and the cache.
    pub fn delete(&mut self, id: &str) -> Result<(), ModelError> {
        if !self.exists(id) {
            self.logger.warning(format!(
                "Entity {} does not exist in model and therefore cannot be deleted.",
                id
            ));
            return Err(ModelError::NotFound {
                model: T::KIND,
                id: id.to_string(),
            });
        }

        let mut lines = self.read_for_write(id)?;
        FlatFile::remove_all(&mut lines, id);
        self.write(&lines, id)?;
        self.entities.remove(id);
        self.logger
            .success(format!("Successfully deleted {} from database.", id));
        Ok(())
    }

    fn build_line(&self, entity: &T) -> Result<String, ModelError> {
        let schema = entity.schema();
        if schema.is_empty() {
            self.logger.warning(format!(
                "Entity {} produced an empty record and was not saved.",
                entity.id()
            ));
            return Err(ModelError::EmptyRecord {
                model: T::KIND,
                id: entity.id().to_string(),
            });
        }

        if let Some(field) = schema.iter().find(|field| !field.value.is_storable()) {
            self.logger.warning(format!(
                "Entity {} was not saved; field '{}' is blank or contains a reserved delimiter.",
                entity.id(),
                field.name
            ));
            return Err(ModelError::InvalidField {
                model: T::KIND,
                id: entity.id().to_string(),
                field: field.name,
            });
        }

        Ok(record::join(&schema))
    }

    fn read_for_write(&self, id: &str) -> Result<Vec<String>, ModelError> {
        self.file.read_lines().map_err(|err| {
            self.logger.warning(format!(
                "Could not read {} before writing {}: {}",
                self.path().display(),
                id,
                err
            ));
            ModelError::io(self.path(), err)
        })
    }

    fn write(&self, lines: &[String], id: &str) -> Result<(), ModelError> {
        self.file.write_lines(lines).map_err(|err| {
            self.logger.warning(format!(
                "Could not write {} while saving {}: {}",
                self.path().display(),
                id,
                err
            ));
            ModelError::io(self.path(), err)
        })
    }

    fn cache(&mut self, entity: &mut T) {
        entity.reset_changed_state();
        self.entities
            .insert(entity.id().to_string(), entity.clone());
    }
}
