//! Manage model

/* module declaration */
pub mod expression;

/* reexport for easiest use */
pub use expression::Expression;
