use thiserror::Error;

pub type OhlResult<T> = Result<T, OhlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OhlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{what} out of range: {value} (valid {min} to {max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
