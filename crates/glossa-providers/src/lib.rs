//! # glossa-providers
//!
//! Translation provider implementations for Glossa.

pub mod deepl;
