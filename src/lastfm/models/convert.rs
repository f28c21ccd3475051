//! DTO to domain mapping.

use crate::domain::{Track, TrackDuration, UserInfo};
use crate::error::LastfmError;

use super::dto::{ImageDto, RecentTracksResp, TrackDto, TrackInfoResp, UserInfoResp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ImageSize {
    fn as_str(self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::ExtraLarge => "extralarge",
        }
    }
}

/// Picks the URL for the preferred size, else the first non-empty one.
pub fn image_url(images: &[ImageDto], size: ImageSize) -> String {
    images
        .iter()
        .find(|i| i.size == size.as_str() && !i.url.is_empty())
        .or_else(|| images.iter().find(|i| !i.url.is_empty()))
        .map(|i| i.url.clone())
        .unwrap_or_default()
}

pub fn to_user_info(resp: UserInfoResp) -> Result<UserInfo, LastfmError> {
    let user = resp.user.ok_or(LastfmError::InvalidResponse("user"))?;
    Ok(UserInfo {
        image: image_url(&user.image, ImageSize::Medium),
        name: user.name,
        realname: user.realname,
        url: user.url,
        playcount: user.playcount,
        registered: user.registered.map(|r| r.text).unwrap_or_default(),
    })
}

pub fn to_tracks(resp: RecentTracksResp) -> Result<Vec<Track>, LastfmError> {
    let track = resp
        .recenttracks
        .and_then(|r| r.track)
        .ok_or(LastfmError::InvalidResponse("recenttracks.track"))?;
    Ok(track.into_vec().into_iter().map(to_track).collect())
}

fn to_track(t: TrackDto) -> Track {
    let artist = t
        .artist
        .and_then(|a| a.name.or(a.text))
        .unwrap_or_default();
    let now_playing = t
        .attr
        .as_ref()
        .and_then(|a| a.nowplaying.as_deref())
        .is_some_and(|v| v == "true");
    let (timestamp, date) = t
        .date
        .map(|d| (d.uts, d.text))
        .unwrap_or((0, String::new()));
    Track {
        image: image_url(&t.image, ImageSize::Medium),
        image_large: image_url(&t.image, ImageSize::ExtraLarge),
        name: t.name,
        artist,
        album: t.album.map(|a| a.text).unwrap_or_default(),
        url: t.url,
        now_playing,
        date,
        timestamp,
    }
}

pub fn to_track_duration(resp: TrackInfoResp) -> Result<TrackDuration, LastfmError> {
    let track = resp.track.ok_or(LastfmError::InvalidResponse("track"))?;
    Ok(TrackDuration {
        duration: track.duration,
        listeners: track.listeners,
        playcount: track.playcount,
    })
}
