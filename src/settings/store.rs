use crate::domain::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const COUNT_MIN: u32 = 1;
pub const COUNT_MAX: u32 = 50;
pub const CACHE_DURATION_MIN: u64 = 60;
pub const CACHE_DURATION_MAX: u64 = 3600;

/// Global plugin configuration, persisted as one JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_count")]
    pub default_count: u32,
    #[serde(default)]
    pub default_theme: Theme,
    #[serde(default = "default_true")]
    pub show_album: bool,
    #[serde(default = "default_true")]
    pub show_duration: bool,
    #[serde(default = "default_cache_duration")]
    pub cache_duration: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            username: String::new(),
            default_count: default_count(),
            default_theme: Theme::Dark,
            show_album: true,
            show_duration: true,
            cache_duration: default_cache_duration(),
        }
    }
}

fn default_count() -> u32 {
    5
}
fn default_true() -> bool {
    true
}
fn default_cache_duration() -> u64 {
    300
}

impl Settings {
    /// Clamps every field into its valid range. Applied on every save so the
    /// persisted blob is always well-formed.
    pub fn sanitized(mut self) -> Self {
        self.api_key = self.api_key.trim().to_owned();
        self.username = self.username.trim().to_owned();
        self.default_count = self.default_count.clamp(COUNT_MIN, COUNT_MAX);
        self.cache_duration = self
            .cache_duration
            .clamp(CACHE_DURATION_MIN, CACHE_DURATION_MAX);
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.username.is_empty()
    }
}

/// Reads settings from `data_dir`, falling back to defaults on a missing or
/// corrupt file. Partial files are filled in field by field via serde
/// defaults.
pub fn load_settings(data_dir: &Path) -> Settings {
    let p = settings_path(data_dir);
    let Ok(bytes) = fs::read(&p) else {
        return Settings::default();
    };
    match serde_json::from_slice::<Settings>(&bytes) {
        Ok(s) => s.sanitized(),
        Err(e) => {
            tracing::warn!(path = %p.display(), err = %e, "settings file unreadable, using defaults");
            Settings::default()
        }
    }
}

/// Sanitizes and persists settings atomically (write to a tmp file, rename
/// over the target).
pub fn save_settings(data_dir: &Path, s: &Settings) -> std::io::Result<()> {
    fs::create_dir_all(data_dir)?;
    let p = settings_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(&s.clone().sanitized()).unwrap_or_else(|_| b"{}".to_vec());
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, &p) {
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| e)?;
    }
    Ok(())
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped_into_range() {
        let high = Settings {
            default_count: 200,
            ..Settings::default()
        };
        assert_eq!(high.sanitized().default_count, 50);

        let low = Settings {
            default_count: 0,
            ..Settings::default()
        };
        assert_eq!(low.sanitized().default_count, 1);
    }

    #[test]
    fn cache_duration_is_clamped_into_range() {
        let high = Settings {
            cache_duration: 999_999,
            ..Settings::default()
        };
        assert_eq!(high.sanitized().cache_duration, 3600);

        let low = Settings {
            cache_duration: 5,
            ..Settings::default()
        };
        assert_eq!(low.sanitized().cache_duration, 60);
    }

    #[test]
    fn unknown_theme_in_file_falls_back_to_dark() {
        let s: Settings =
            serde_json::from_str(r#"{"default_theme":"dark","api_key":"k"}"#).expect("parse");
        assert_eq!(s.default_theme, Theme::Dark);
        // Unknown enum values fail to parse; load_settings covers that with
        // the full-default fallback.
        assert!(serde_json::from_str::<Settings>(r#"{"default_theme":"neon"}"#).is_err());
    }

    #[test]
    fn partial_file_is_fully_defaulted() {
        let s: Settings = serde_json::from_str(r#"{"username":"rj"}"#).expect("parse");
        assert_eq!(s.username, "rj");
        assert_eq!(s.default_count, 5);
        assert_eq!(s.cache_duration, 300);
        assert!(s.show_album);
        assert!(s.show_duration);
    }

    #[test]
    fn is_configured_requires_both_fields() {
        let mut s = Settings::default();
        assert!(!s.is_configured());
        s.api_key = "key".to_owned();
        assert!(!s.is_configured());
        s.username = "rj".to_owned();
        assert!(s.is_configured());
    }
}
