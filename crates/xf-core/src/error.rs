use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Capacity exceeded: {what} (len={len}, capacity={capacity})")]
    Capacity {
        what: &'static str,
        len: usize,
        capacity: usize,
    },

    #[error("Empty series: {what}")]
    Empty { what: &'static str },
}
