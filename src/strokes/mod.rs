//! Stroke outlines and the library they are drawn from.

pub mod library;
pub mod path;
