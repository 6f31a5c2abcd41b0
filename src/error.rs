use thiserror::Error;

/// Errors surfaced by state mutations. Commands map these to plain strings
/// at the Tauri boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
