use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Settings parse error at line {line}: {message}")]
    SettingsParse { line: usize, message: String },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Unknown consumable: {0}")]
    UnknownConsumable(String),

    #[error(
        "Invalid quantity: {0} (must be between 1 and {max})",
        max = crate::config::limits::MAX_QUANTITY
    )]
    InvalidQuantity(i64),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
