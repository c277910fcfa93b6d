//! # descfill-paratranz
//!
//! Paratranz API client, the description filler driver, and corpus
//! downloads.

pub mod client;
pub mod download;
pub mod filler;

pub use client::{ParatranzClient, TranslationApi};
pub use filler::Filler;
