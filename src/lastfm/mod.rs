mod client;
pub mod models;
pub mod util;

pub use client::{LastfmClient, LastfmClientConfig};

/// Last.fm web service root.
pub const API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
