//! Shared types for divisibility regex synthesis.
//!
//! - [`base`] -- Numeral bases, their digit alphabets and parsing
//! - [`expr`] -- Regex fragment algebra with precedence-aware rendering

pub mod base;
pub mod expr;

pub use base::{Base, UnknownBase};
pub use expr::Expr;
