//! Infrastructure: configuration loading and runtime wiring.

pub mod bootstrap;
pub mod config;
