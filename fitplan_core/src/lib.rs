#![forbid(unsafe_code)]

//! Core domain model and plan selection for the fitplan workout generator.
//!
//! This crate provides:
//! - Domain types (levels, exercises, plans, catalog)
//! - The built-in exercise catalog and external catalog files
//! - Plan sources (static catalog, text-generation model)
//! - The greedy plan selector
//! - Guided-session scripts and timelines

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod source;
pub mod selector;
pub mod script;

// Re-export commonly used types
pub use error::{Error, Result, SelectionError};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog};
pub use config::Config;
pub use source::{GenerativeSource, PlanSource, TextGenerator};
pub use selector::{generate, generate_with_entropy, select, REST_SECONDS};
