//! Wire shapes for the three consumed Last.fm methods.
//!
//! The service serializes numbers as strings, collapses one-element track
//! lists into a bare object, and nests display text under `#text`; the
//! lenient deserializers here absorb all of that once so the rest of the
//! crate sees clean types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct UserInfoResp {
    pub user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub name: String,
    #[serde(default)]
    pub realname: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<ImageDto>,
    #[serde(default, deserialize_with = "de_u64_lenient")]
    pub playcount: u64,
    pub registered: Option<RegisteredDto>,
}

#[derive(Debug, Deserialize)]
pub struct RegisteredDto {
    #[serde(rename = "#text", default, deserialize_with = "de_string_lenient")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageDto {
    #[serde(default)]
    pub size: String,
    #[serde(rename = "#text", default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentTracksResp {
    pub recenttracks: Option<RecentTracksDto>,
}

#[derive(Debug, Deserialize)]
pub struct RecentTracksDto {
    pub track: Option<OneOrMany<TrackDto>>,
}

/// A single track comes back as an object instead of a one-element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(Box<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![*t],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackDto {
    pub name: String,
    pub artist: Option<ArtistDto>,
    pub album: Option<TextDto>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Vec<ImageDto>,
    pub date: Option<DateDto>,
    #[serde(rename = "@attr")]
    pub attr: Option<TrackAttrDto>,
}

/// `extended=1` gives `{name}`, the plain form gives `{#text}`.
#[derive(Debug, Deserialize)]
pub struct ArtistDto {
    pub name: Option<String>,
    #[serde(rename = "#text")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextDto {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DateDto {
    #[serde(default, deserialize_with = "de_i64_lenient")]
    pub uts: i64,
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackAttrDto {
    pub nowplaying: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrackInfoResp {
    pub track: Option<TrackInfoDto>,
}

#[derive(Debug, Deserialize)]
pub struct TrackInfoDto {
    #[serde(default, deserialize_with = "de_u64_lenient")]
    pub duration: u64,
    #[serde(default, deserialize_with = "de_u64_lenient")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de_u64_lenient")]
    pub playcount: u64,
}

fn de_u64_lenient<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    })
}

fn de_i64_lenient<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    })
}

fn de_string_lenient<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_list_parses_as_array() {
        let v = json!({
            "recenttracks": {
                "track": [
                    {"name": "A", "url": "https://last.fm/a"},
                    {"name": "B", "url": "https://last.fm/b"}
                ]
            }
        });
        let resp: RecentTracksResp = serde_json::from_value(v).expect("parse");
        let tracks = resp
            .recenttracks
            .and_then(|r| r.track)
            .expect("track")
            .into_vec();
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn single_track_object_normalizes_to_one_element_list() {
        let v = json!({
            "recenttracks": {
                "track": {"name": "Only One", "url": "https://last.fm/x"}
            }
        });
        let resp: RecentTracksResp = serde_json::from_value(v).expect("parse");
        let tracks = resp
            .recenttracks
            .and_then(|r| r.track)
            .expect("track")
            .into_vec();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Only One");
    }

    #[test]
    fn numeric_strings_parse_leniently() {
        let v = json!({"track": {"duration": "185000", "listeners": 42, "playcount": "oops"}});
        let resp: TrackInfoResp = serde_json::from_value(v).expect("parse");
        let t = resp.track.expect("track");
        assert_eq!(t.duration, 185_000);
        assert_eq!(t.listeners, 42);
        assert_eq!(t.playcount, 0);
    }

    #[test]
    fn registered_text_accepts_number() {
        let v = json!({"user": {"name": "rj", "registered": {"#text": 1037793040}}});
        let resp: UserInfoResp = serde_json::from_value(v).expect("parse");
        let user = resp.user.expect("user");
        assert_eq!(user.registered.expect("registered").text, "1037793040");
    }
}
