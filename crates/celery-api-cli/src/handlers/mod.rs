//! Command handlers.

pub mod config;
pub mod cookbook;
pub mod serve;
