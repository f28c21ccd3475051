use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;

use lastfm_now_playing::cache::MemoryCache;
use lastfm_now_playing::cli::{Cli, Command};
use lastfm_now_playing::domain::Theme;
use lastfm_now_playing::error::AppError;
use lastfm_now_playing::lastfm::{LastfmClient, LastfmClientConfig};
use lastfm_now_playing::settings::{Settings, load_settings, save_settings};
use lastfm_now_playing::surface::parse_shortcode;
use lastfm_now_playing::{lifecycle, logging, render};

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "lastfm-now-playing", "lastfm-now-playing")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("lastfm-now-playing"))
}

fn make_client(settings: &Settings, api_base: Option<String>) -> Result<LastfmClient, AppError> {
    let mut cfg = LastfmClientConfig::from_settings(settings);
    if let Some(base) = api_base {
        cfg.api_base = base;
    }
    Ok(LastfmClient::new(cfg, Arc::new(MemoryCache::new()))?)
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), "lastfm-now-playing started");

    match cli.command.unwrap_or(Command::Render {
        attrs: String::new(),
    }) {
        Command::Render { attrs } => {
            let settings = load_settings(&data_dir);
            let client = make_client(&settings, cli.api_base)?;
            let opts = parse_shortcode(&attrs, &settings);
            println!("{}", render::render(&client, &opts).await);
            Ok(())
        }
        Command::UserInfo => {
            let settings = load_settings(&data_dir);
            let client = make_client(&settings, cli.api_base)?;
            let user = client.user_info().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        Command::RecentTracks { limit } => {
            let settings = load_settings(&data_dir);
            let client = make_client(&settings, cli.api_base)?;
            let tracks = client.recent_tracks(limit).await?;
            println!("{}", serde_json::to_string_pretty(&tracks)?);
            Ok(())
        }
        Command::Config {
            api_key,
            username,
            count,
            theme,
            show_album,
            show_duration,
            cache_duration,
        } => {
            let mut settings = load_settings(&data_dir);
            if let Some(v) = api_key {
                settings.api_key = v;
            }
            if let Some(v) = username {
                settings.username = v;
            }
            if let Some(v) = count {
                settings.default_count = v;
            }
            if let Some(v) = theme {
                settings.default_theme = Theme::from_str_lossy(&v);
            }
            if let Some(v) = show_album {
                settings.show_album = v;
            }
            if let Some(v) = show_duration {
                settings.show_duration = v;
            }
            if let Some(v) = cache_duration {
                settings.cache_duration = v;
            }
            save_settings(&data_dir, &settings)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&settings.sanitized())?
            );
            Ok(())
        }
        Command::Install => {
            lifecycle::on_install(&data_dir)?;
            Ok(())
        }
        Command::Uninstall => {
            lifecycle::on_uninstall(&data_dir, &MemoryCache::new())?;
            Ok(())
        }
    }
}
