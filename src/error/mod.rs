//! Structured error types shared across the crate.

mod app;
mod lastfm;

pub use app::AppError;
pub use lastfm::LastfmError;
