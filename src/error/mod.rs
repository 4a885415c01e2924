//! All stuff relate to error

/* crate use */
use thiserror::Error;

/* module declaration */
pub mod alignment;
pub mod cli;
pub mod input;

/* reexport for easiest use */
pub use alignment::Alignment;
pub use cli::Cli;
pub use input::Input;

/// Enum to manage error polymorphism
#[derive(Debug, Error)]
pub enum Error {
    /// Error related to command line interface
    #[error(transparent)]
    Cli(#[from] Cli),

    /// Error related to genome, annotation or variant input
    #[error(transparent)]
    Input(#[from] Input),

    /// Error related to alignment encoding or verification
    #[error(transparent)]
    Alignment(#[from] Alignment),
}
