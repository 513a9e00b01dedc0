//! Composite assembly: overlap acceptance, boxy seeding, labels and batch generation.

pub mod acceptance;
pub mod assembler;
pub mod batch;
pub mod boxy;
pub mod label;
