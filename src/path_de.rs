use serde::de::DeserializeOwned;
use thiserror::Error;

/// Deserialization failure with the JSON path it happened at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at JSON path {path} → {message}")]
pub struct PathDeError {
    pub path: String,
    pub message: String,
}

impl PathDeError {
    fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self { path: err.path().to_string(), message: err.into_inner().to_string() }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, PathDeError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(PathDeError::from_path_error)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PathDeError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(PathDeError::from_path_error)
}
