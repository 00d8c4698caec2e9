//! # WFA Common Library
//!
//! Shared code for the WFA content platform services including:
//! - Content store document models and rich-text blocks
//! - Named content queries and the query/mutation client
//! - Configuration loading
//! - Error types
//! - Text and date utility functions

pub mod config;
pub mod content;
pub mod error;
pub mod text;
pub mod time;

pub use error::{Error, Result};
