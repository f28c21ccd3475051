//! Host lifecycle hooks.
//!
//! The hosting application calls these explicitly instead of the plugin
//! registering callbacks: install seeds default settings, uninstall removes
//! everything the crate ever persisted.

use std::fs;
use std::path::Path;

use crate::cache::CacheStore;
use crate::settings::{Settings, save_settings, settings_path};

/// Writes default settings unless some are already persisted.
pub fn on_install(data_dir: &Path) -> std::io::Result<()> {
    if settings_path(data_dir).exists() {
        return Ok(());
    }
    tracing::info!(data_dir = %data_dir.display(), "seeding default settings");
    save_settings(data_dir, &Settings::default())
}

/// Drops every cache entry and deletes the settings blob.
pub fn on_uninstall(data_dir: &Path, cache: &dyn CacheStore) -> std::io::Result<()> {
    cache.clear();
    let p = settings_path(data_dir);
    match fs::remove_file(&p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
