use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::domain::{Track, TrackDuration, UserInfo};
use crate::error::LastfmError;
use crate::settings::Settings;

use super::models::{convert, dto};
use super::util;

/// Track metadata barely moves, so `track.getInfo` results keep for a day.
const TRACK_INFO_TTL: Duration = Duration::from_secs(86_400);

/// Ceiling for the recent-tracks TTL while something is playing; keeps the
/// now-playing row fresh without raising call volume for historical data.
const NOW_PLAYING_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct LastfmClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub username: String,
    pub cache_duration: Duration,
    pub timeout: Duration,
}

impl Default for LastfmClientConfig {
    fn default() -> Self {
        Self {
            api_base: super::API_URL.to_owned(),
            api_key: String::new(),
            username: String::new(),
            cache_duration: Duration::from_secs(300),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LastfmClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            username: settings.username.clone(),
            cache_duration: Duration::from_secs(settings.cache_duration),
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct LastfmClient {
    http: reqwest::Client,
    cfg: LastfmClientConfig,
    cache: Arc<dyn CacheStore>,
}

impl LastfmClient {
    pub fn new(cfg: LastfmClientConfig, cache: Arc<dyn CacheStore>) -> Result<Self, LastfmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lastfm-now-playing/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout)
            .build()?;
        Ok(Self { http, cfg, cache })
    }

    pub fn is_configured(&self) -> bool {
        !self.cfg.api_key.is_empty() && !self.cfg.username.is_empty()
    }

    pub fn username(&self) -> &str {
        &self.cfg.username
    }

    /// Profile of the configured user, cached by username.
    pub async fn user_info(&self) -> Result<UserInfo, LastfmError> {
        let key = util::cache_key("user", &self.cfg.username);
        if let Some(hit) = self.cache_get::<UserInfo>(&key) {
            return Ok(hit);
        }

        let body = self
            .request("user.getinfo", &[("user", self.cfg.username.clone())])
            .await?;
        let resp: dto::UserInfoResp =
            serde_json::from_value(body).map_err(|_| LastfmError::InvalidResponse("user"))?;
        let user = convert::to_user_info(resp)?;

        self.cache_put(&key, &user, self.cfg.cache_duration);
        Ok(user)
    }

    /// The user's latest scrobbles, cached by username+limit. The TTL drops
    /// to [`NOW_PLAYING_TTL`] whenever a returned track is still playing.
    pub async fn recent_tracks(&self, limit: u32) -> Result<Vec<Track>, LastfmError> {
        let limit = limit.clamp(crate::settings::store::COUNT_MIN, crate::settings::store::COUNT_MAX);
        let key = util::cache_key("tracks", &format!("{}_{limit}", self.cfg.username));
        if let Some(hit) = self.cache_get::<Vec<Track>>(&key) {
            return Ok(hit);
        }

        let body = self
            .request(
                "user.getrecenttracks",
                &[
                    ("user", self.cfg.username.clone()),
                    ("limit", limit.to_string()),
                    ("extended", "1".to_owned()),
                ],
            )
            .await?;
        let resp: dto::RecentTracksResp = serde_json::from_value(body)
            .map_err(|_| LastfmError::InvalidResponse("recenttracks"))?;
        let tracks = convert::to_tracks(resp)?;

        let ttl = if tracks.iter().any(|t| t.now_playing) {
            self.cfg.cache_duration.min(NOW_PLAYING_TTL)
        } else {
            self.cfg.cache_duration
        };
        self.cache_put(&key, &tracks, ttl);
        Ok(tracks)
    }

    /// Duration and play counts for one (artist, track) pair.
    pub async fn track_info(
        &self,
        artist: &str,
        track: &str,
    ) -> Result<TrackDuration, LastfmError> {
        let key = util::cache_key("track", &format!("{artist}_{track}"));
        if let Some(hit) = self.cache_get::<TrackDuration>(&key) {
            return Ok(hit);
        }

        let body = self
            .request(
                "track.getInfo",
                &[("artist", artist.to_owned()), ("track", track.to_owned())],
            )
            .await?;
        let resp: dto::TrackInfoResp =
            serde_json::from_value(body).map_err(|_| LastfmError::InvalidResponse("track"))?;
        let info = convert::to_track_duration(resp)?;

        self.cache_put(&key, &info, TRACK_INFO_TTL);
        Ok(info)
    }

    async fn request(
        &self,
        method: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, LastfmError> {
        if !self.is_configured() {
            tracing::debug!(method, "skipping request, client not configured");
            return Err(LastfmError::NotConfigured);
        }

        let mut query: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", &self.cfg.api_key),
            ("format", "json"),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        tracing::debug!(method, "last.fm request");
        let resp = self
            .http
            .get(&self.cfg.api_base)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        if !status.is_success() || body.get("error").is_some() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown API error")
                .to_owned();
            tracing::warn!(method, status = status.as_u16(), message = %message, "last.fm API error");
            return Err(LastfmError::Api { message });
        }

        if body.is_null() {
            return Err(LastfmError::InvalidResponse("body"));
        }
        Ok(body)
    }

    fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache
            .get(key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    fn cache_put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        match serde_json::to_value(value) {
            Ok(v) => self.cache.set(key, v, ttl),
            Err(e) => tracing::warn!(key, err = %e, "failed to serialize cache entry"),
        }
    }
}

impl std::fmt::Debug for LastfmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastfmClient")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
