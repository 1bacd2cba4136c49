//! Types shared by the tourlens server and its wasm front-end.

pub mod result;
pub mod tour;

pub use result::AnalysisResult;
pub use tour::{validate_tour_url, TourPlatform, TourUrlError};
