//! Command line interface error

/* crate use */
use thiserror::Error;

/// Enum to manage error polymorphism
#[derive(Debug, Error)]
pub enum Cli {
    /// expression profile isn't flux or constant
    #[error("We aren't able to parse expression profile, value must be 'flux' or 'constant'")]
    CantParseExprProfile,

    /// read length is zero
    #[error("Read length must be upper than 0")]
    ReadLengthMustBeUpperThan0,

    /// error rate outside of [0, 1]
    #[error("Error rate must be between 0 and 1")]
    ErrorRateOutOfRange,
}
