//! Individual value generators for the synthetic record fields.
//!
//! Each generator draws from the RNG it is handed and never keeps state of
//! its own, so the [`crate::GenerationContext`] stays the only owner of
//! randomness and of the generation index.

pub mod choice;
pub mod pattern;
pub mod timestamp;
pub mod uuid;
