//! Common types and utilities for seeding populators.
//!
//! This crate provides the argument types shared by every
//! seed-populate-* crate (MongoDB, JSONL, console), and the glue that turns
//! those arguments into a ready [`seed_generator::GenerationContext`].

pub mod args;

pub use args::CommonSeedArgs;
