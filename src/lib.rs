//! Tour engagement analysis service.
//!
//! Accepts a 3D tour URL, asks a hosted language model for an engagement
//! write-up, and returns it as a checked [`AnalysisResult`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod routes;

pub use tourlens_common::AnalysisResult;
