//! Generator configuration.

pub mod settings;
