//! # glossa-channels
//!
//! Messaging platform integrations for Glossa.

pub mod telegram;
pub mod utils;
