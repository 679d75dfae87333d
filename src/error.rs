use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Food catalog is empty")]
    EmptyCatalog,

    #[error("No staple foods in catalog, but a staple is required")]
    NoStapleFoods,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, MealError>;
