use serde::{Deserialize, Serialize};

/// Visual theme for the rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Transparent,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Transparent => "transparent",
        }
    }

    /// Unknown values fall back to the dark theme, matching the settings
    /// sanitizer.
    pub fn from_str_lossy(s: &str) -> Theme {
        match s {
            "light" => Theme::Light,
            "transparent" => Theme::Transparent,
            _ => Theme::Dark,
        }
    }
}

/// Profile of the Last.fm user whose scrobbles are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub realname: String,
    pub url: String,
    pub image: String,
    pub playcount: u64,
    pub registered: String,
}

impl UserInfo {
    /// Name shown in the header: the real name when the profile has one.
    pub fn display_name(&self) -> &str {
        if self.realname.is_empty() {
            &self.name
        } else {
            &self.realname
        }
    }
}

/// One scrobble (or the currently playing track).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub url: String,
    pub image: String,
    pub image_large: String,
    pub now_playing: bool,
    pub date: String,
    pub timestamp: i64,
}

/// Near-static per-track metadata from `track.getInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDuration {
    pub duration: u64,
    pub listeners: u64,
    pub playcount: u64,
}
