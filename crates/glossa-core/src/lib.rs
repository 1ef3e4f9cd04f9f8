//! # glossa-core
//!
//! Core types, traits, configuration, and error handling for the Glossa
//! translation relay.

pub mod config;
pub mod error;
pub mod language;
pub mod message;
pub mod traits;
