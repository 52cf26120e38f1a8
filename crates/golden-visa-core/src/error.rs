use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisaCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Incomplete translations for {locale}: missing {missing:?}")]
    IncompleteTranslations { locale: String, missing: Vec<String> },

    #[error("Invalid fee schedule: {field} — {reason}")]
    InvalidSchedule { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for VisaCalcError {
    fn from(e: serde_json::Error) -> Self {
        VisaCalcError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for VisaCalcError {
    fn from(e: serde_yaml::Error) -> Self {
        VisaCalcError::SerializationError(e.to_string())
    }
}
