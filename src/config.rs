//! Where each model keeps its file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{CheckModel, ProductModel, RestaurantModel, VariantModel, VariantOptionModel};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "could not read config {}: {}", path, message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Data directory and per-model file names. Missing keys take their
/// defaults when read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub variants_file: String,
    pub options_file: String,
    pub checks_file: String,
    pub locations_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("."),
            products_file: ProductModel::DEFAULT_FILE.to_string(),
            variants_file: VariantModel::DEFAULT_FILE.to_string(),
            options_file: VariantOptionModel::DEFAULT_FILE.to_string(),
            checks_file: CheckModel::DEFAULT_FILE.to_string(),
            locations_file: RestaurantModel::DEFAULT_FILE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Default file names under `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: dir.into(),
            ..StoreConfig::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn variants_path(&self) -> PathBuf {
        self.data_dir.join(&self.variants_file)
    }

    pub fn options_path(&self) -> PathBuf {
        self.data_dir.join(&self.options_file)
    }

    pub fn checks_path(&self) -> PathBuf {
        self.data_dir.join(&self.checks_file)
    }

    pub fn locations_path(&self) -> PathBuf {
        self.data_dir.join(&self.locations_file)
    }
}
