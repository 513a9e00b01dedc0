//! Dataset serialization.

pub mod coco;
