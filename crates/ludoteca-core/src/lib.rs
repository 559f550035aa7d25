//! ludoteca-core — Game session engine, scoring, and data model.
//!
//! This crate defines the fundamental data model, the round progression
//! state machine, and the scoring strategies that the rest of the ludoteca
//! system builds on.

pub mod error;
pub mod model;
pub mod parser;
pub mod rounds;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod traits;
