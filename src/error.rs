use std::fmt;

/// Error type for entity model operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No entity with this identifier is held by the model.
    NotFound { model: &'static str, id: String },
    /// A row with this identifier already exists in the backing file.
    Duplicate { model: &'static str, id: String },
    /// The entity references children that no longer exist.
    BrokenReference {
        model: &'static str,
        id: String,
        missing: Vec<String>,
    },
    /// The entity produced an empty record.
    EmptyRecord { model: &'static str, id: String },
    /// A field value is blank or would corrupt the delimited row.
    InvalidField {
        model: &'static str,
        id: String,
        field: &'static str,
    },
    /// The model's lock flag was already set.
    Locked(&'static str),
    /// Reading or writing the backing file failed.
    Io { path: String, message: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound { model, id } => write!(f, "{} not found: {}", model, id),
            ModelError::Duplicate { model, id } => {
                write!(f, "{} {} already exists in the database", model, id)
            }
            ModelError::BrokenReference { model, id, missing } => write!(
                f,
                "{} {} references missing entities: {}",
                model,
                id,
                missing.join(", ")
            ),
            ModelError::EmptyRecord { model, id } => {
                write!(f, "{} {} produced an empty record", model, id)
            }
            ModelError::InvalidField { model, id, field } => write!(
                f,
                "{} {} field '{}' is blank or contains a reserved delimiter",
                model, id, field
            ),
            ModelError::Locked(operation) => write!(f, "model is locked during {}", operation),
            ModelError::Io { path, message } => write!(f, "I/O error on {}: {}", path, message),
        }
    }
}

impl std::error::Error for ModelError {}

impl ModelError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ModelError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
