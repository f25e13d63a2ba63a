use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid {field} value: {value}")]
    InvalidNumber { field: &'static str, value: String },
}
