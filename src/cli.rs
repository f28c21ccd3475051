use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lastfm-now-playing",
    version,
    about = "Render recently played Last.fm tracks as embeddable HTML"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override the data directory (defaults to the system data_local_dir)
    #[arg(long, env = "LASTFM_NP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the log directory (defaults to `{data_dir}/logs`)
    #[arg(long, env = "LASTFM_NP_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Override the log filter (equivalent to setting RUST_LOG)
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// Override the API base URL (defaults to https://ws.audioscrobbler.com/2.0/)
    #[arg(long, env = "LASTFM_NP_API_BASE")]
    pub api_base: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the HTML fragment (default). Attributes behave exactly like
    /// the shortcode's.
    Render {
        /// Shortcode-style attribute string, e.g. 'count="3" theme="light"'
        #[arg(default_value = "")]
        attrs: String,
    },

    /// Print the configured user's profile as JSON
    UserInfo,

    /// Print recent tracks as JSON
    RecentTracks {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },

    /// Show or change the persisted settings
    Config {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        count: Option<u32>,

        /// light, dark or transparent
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        show_album: Option<bool>,

        #[arg(long)]
        show_duration: Option<bool>,

        /// Cache TTL in seconds (60-3600)
        #[arg(long)]
        cache_duration: Option<u64>,
    },

    /// Seed default settings (no-op when settings already exist)
    Install,

    /// Clear the cache and delete the settings file
    Uninstall,
}
