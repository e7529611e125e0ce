use thiserror::Error;

pub mod feedback;
pub mod prediction;
pub mod variant;
pub mod vitals;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown code {code} for {field}")]
    UnknownCode { field: &'static str, code: u8 },

    #[error("{field} = {value} exceeds the maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("unknown form variant '{0}'")]
    UnknownVariant(String),
}
