use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::FlatFile;
use crate::entity::{Record, Restaurant};
use crate::error::ModelError;
use crate::lock::ModelLock;
use crate::logging::Logger;
use crate::record::{self, RecordParser};

/// Restaurant locations.
///
/// Older than [`EntityModel`](super::EntityModel): mutations report success
/// as a `bool` and log the cause of a failure, and every file write runs
/// under a [`ModelLock`].
#[derive(Debug)]
pub struct RestaurantModel {
    entities: HashMap<String, Restaurant>,
    file: FlatFile,
    lock: ModelLock,
    logger: Logger,
    failed_to_parse: usize,
}

impl RestaurantModel {
    pub const DEFAULT_FILE: &'static str = "LocationList.txt";
    pub const EXPECTED_FIELDS: usize = Restaurant::FIELD_COUNT;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        RestaurantModel {
            entities: HashMap::new(),
            file: FlatFile::new(path),
            lock: ModelLock::new(),
            logger: Logger::new("RestaurantModel"),
            failed_to_parse: 0,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn lock(&self) -> &ModelLock {
        &self.lock
    }

    pub fn failed_to_parse_count(&self) -> usize {
        self.failed_to_parse
    }

    /// Load every location. Returns false if the file could not be read.
    pub fn load_entities(&mut self) -> bool {
        let lines = match self.file.read_lines() {
            Ok(lines) => lines,
            Err(err) => {
                self.logger
                    .fatal(format!("Could not locate file in model: {}", err));
                return false;
            }
        };

        self.entities.clear();
        let mut failed = 0;
        for line in lines.iter().filter(|line| !line.trim().is_empty()) {
            if record::check_line(line, Self::EXPECTED_FIELDS).is_err() {
                self.logger.warning(format!(
                    "Could not parse line '{}' in location model; line was invalid.",
                    line
                ));
                failed += 1;
                continue;
            }

            let mut parser = RecordParser::new(line, self.logger.scoped("RecordParser"));
            let mut location = Restaurant::from_record(&mut parser);
            if parser.failures() > 0 {
                failed += 1;
            }
            location.reset_changed_state();
            self.entities.insert(location.id().to_string(), location);
        }

        self.failed_to_parse = failed;
        self.logger.verbose(format!(
            "Model has finished loading entities: {} parsed, {} failed to parse.",
            self.entities.len(),
            failed
        ));
        true
    }

    pub fn get_location(&self, id: &str) -> Option<&Restaurant> {
        self.entities.get(id)
    }

    pub fn entity_exists(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Restaurant> {
        self.entities.values()
    }

    pub fn add_location(&mut self, location: &mut Restaurant) -> bool {
        if self.entity_exists(location.id()) {
            self.logger.warning(format!(
                "Location ({}) in model already exists.",
                location.id()
            ));
            return false;
        }

        match self.add_entity(location) {
            Ok(()) => {
                self.cache(location);
                true
            }
            Err(err) => {
                self.logger.warning(format!(
                    "An error occurred when persisting location ({}) in model: {}",
                    location.id(),
                    err
                ));
                false
            }
        }
    }

    pub fn edit_location(&mut self, location: &mut Restaurant) -> bool {
        if !self.entity_exists(location.id()) {
            self.logger.warning(format!(
                "Could not find location ({}) in model.",
                location.id()
            ));
            return false;
        }

        match self.edit_entity(location) {
            Ok(()) => {
                self.cache(location);
                true
            }
            Err(err) => {
                self.logger.warning(format!(
                    "An error occurred when editing location ({}) in model: {}",
                    location.id(),
                    err
                ));
                false
            }
        }
    }

    pub fn delete_location(&mut self, id: &str) -> bool {
        if !self.entity_exists(id) {
            self.logger
                .warning(format!("Could not find location ({}) in model.", id));
            return false;
        }

        match self.delete_entity(id) {
            Ok(()) => {
                self.entities.remove(id);
                true
            }
            Err(err) => {
                self.logger.warning(format!(
                    "An error occurred when deleting location ({}) in model: {}",
                    id, err
                ));
                false
            }
        }
    }

    fn add_entity(&self, location: &Restaurant) -> Result<(), ModelError> {
        let _guard = self.lock.try_acquire("add")?;
        let mut lines = self.read()?;
        if FlatFile::position(&lines, location.id()).is_some() {
            return Err(ModelError::Duplicate {
                model: Restaurant::KIND,
                id: location.id().to_string(),
            });
        }
        lines.push(Self::build_line(location)?);
        self.write(&lines)
    }

    fn edit_entity(&self, location: &Restaurant) -> Result<(), ModelError> {
        let _guard = self.lock.try_acquire("edit")?;
        let mut lines = self.read()?;
        let index = FlatFile::position(&lines, location.id()).ok_or_else(|| {
            ModelError::NotFound {
                model: Restaurant::KIND,
                id: location.id().to_string(),
            }
        })?;
        lines[index] = Self::build_line(location)?;
        self.write(&lines)
    }

    fn delete_entity(&self, id: &str) -> Result<(), ModelError> {
        let _guard = self.lock.try_acquire("delete")?;
        let mut lines = self.read()?;
        FlatFile::remove_all(&mut lines, id);
        self.write(&lines)
    }

    fn build_line(location: &Restaurant) -> Result<String, ModelError> {
        let schema = location.schema();
        match schema.iter().find(|field| !field.value.is_storable()) {
            Some(field) => Err(ModelError::InvalidField {
                model: Restaurant::KIND,
                id: location.id().to_string(),
                field: field.name,
            }),
            None => Ok(record::join(&schema)),
        }
    }

    fn read(&self) -> Result<Vec<String>, ModelError> {
        self.file
            .read_lines()
            .map_err(|err| ModelError::io(self.path(), err))
    }

    fn write(&self, lines: &[String]) -> Result<(), ModelError> {
        self.file
            .write_lines(lines)
            .map_err(|err| ModelError::io(self.path(), err))
    }

    fn cache(&mut self, location: &mut Restaurant) {
        location.reset_changed_state();
        self.entities
            .insert(location.id().to_string(), location.clone());
    }
}
