//! # descfill-core
//!
//! Lookup tables, numeric templates, and the template replacer that turns
//! semi-structured `Key: Value` item descriptions into annotated partial
//! translations. No network I/O lives here.

pub mod config;
pub mod corpus;
pub mod error;
pub mod replacer;
pub mod tables;
pub mod template;

pub use error::FillError;
pub use replacer::Replacer;
