//! Recently played Last.fm tracks, rendered as embeddable HTML.
//!
//! The core is [`lastfm::LastfmClient`]: a settings-driven client for the
//! Last.fm REST API with a TTL cache in front of every call. Around it sit
//! the [`render`] module (records to HTML fragments) and the [`surface`]
//! adapters (block, widget, shortcode) that resolve per-instance display
//! options over the persisted [`settings::Settings`].

pub mod cache;
pub mod cli;
pub mod domain;
pub mod error;
pub mod lastfm;
pub mod lifecycle;
pub mod logging;
pub mod render;
pub mod settings;
pub mod surface;
