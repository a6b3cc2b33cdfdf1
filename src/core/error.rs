//! Error types for the pricing engines

use thiserror::Error;

use super::option::ExerciseStyle;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("{engine} does not support {exercise} exercise")]
    UnsupportedExercise {
        engine: &'static str,
        exercise: ExerciseStyle,
    },

    #[error("Unknown pricing method: {0}")]
    UnknownMethod(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
    pub fn unsupported_exercise(engine: &'static str, exercise: ExerciseStyle) -> Self {
        Self::UnsupportedExercise { engine, exercise }
    }

    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod(name.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::Serialization(e.to_string())
    }
}
