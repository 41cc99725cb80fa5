use std::fmt;

#[derive(Debug)]
pub enum RaceError {
    InvalidDistance(f64),
    EmptyField,
    ValidationError(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RaceError::InvalidDistance(distance) => {
                write!(f, "Invalid race distance: {} m (must be > 0)", distance)
            }
            RaceError::EmptyField => {
                write!(f, "Race field is empty: at least one competitor is required")
            }
            RaceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            RaceError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            RaceError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RaceError {}

impl From<serde_json::Error> for RaceError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            RaceError::DeserializationError(err.to_string())
        } else {
            RaceError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, RaceError>;
