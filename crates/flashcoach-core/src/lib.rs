//! flashcoach-core — Transcript scoring engine and data model.
//!
//! This crate defines the flashcard data model, the text pipeline
//! (normalization, tokenization, stop words), the similarity and
//! coverage metrics, the feedback classifier, and the scoring engine
//! that the rest of flashcoach builds on.

pub mod coverage;
pub mod engine;
pub mod feedback;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod similarity;
pub mod statistics;
pub mod text;
pub mod traits;
