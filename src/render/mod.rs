//! HTML fragment rendering.
//!
//! Pure functions from records to markup, plus one async entry point that
//! drives the client. Every upstream error is converted to a single error
//! fragment here; nothing escapes this boundary.

use crate::domain::{Theme, Track, UserInfo};
use crate::error::LastfmError;
use crate::lastfm::{LastfmClient, util};
use crate::settings::Settings;

/// Effective display options for one rendered instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub count: u32,
    pub theme: Theme,
    pub show_album: bool,
    pub show_duration: bool,
    pub class: String,
}

impl RenderOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            count: settings.default_count,
            theme: settings.default_theme,
            show_album: settings.show_album,
            show_duration: settings.show_duration,
            class: String::new(),
        }
    }
}

/// Fetches everything and renders the full fragment. Per-track duration
/// lookups are sequential and best-effort; a failed lookup just renders no
/// duration.
pub async fn render(client: &LastfmClient, opts: &RenderOptions) -> String {
    if !client.is_configured() {
        return error_fragment("Please configure your Last.fm API settings.");
    }

    let user = match client.user_info().await {
        Ok(u) => u,
        Err(e) => return error_for(&e),
    };
    let tracks = match client.recent_tracks(opts.count).await {
        Ok(t) => t,
        Err(e) => return error_for(&e),
    };

    let mut durations = Vec::with_capacity(tracks.len());
    for track in &tracks {
        let duration = if opts.show_duration && !track.artist.is_empty() && !track.name.is_empty() {
            match client.track_info(&track.artist, &track.name).await {
                Ok(info) => util::format_duration(info.duration),
                Err(e) => {
                    tracing::debug!(track = %track.name, err = %e, "duration lookup failed");
                    String::new()
                }
            }
        } else {
            String::new()
        };
        durations.push(duration);
    }

    let now = chrono::Utc::now().timestamp();
    document(&user, &tracks, &durations, opts, now)
}

fn error_for(err: &LastfmError) -> String {
    if err.is_fault() {
        tracing::warn!(err = %err, "render failed");
    } else {
        tracing::debug!(err = %err, "render skipped, not configured");
    }
    error_fragment(&err.to_string())
}

/// Container with header, track rows and footer. `durations` is parallel to
/// `tracks` (empty string when none is shown).
pub fn document(
    user: &UserInfo,
    tracks: &[Track],
    durations: &[String],
    opts: &RenderOptions,
    now: i64,
) -> String {
    let mut class = format!("lastfm-np-theme-{}", opts.theme.as_str());
    if !opts.class.is_empty() {
        class.push(' ');
        class.push_str(&opts.class);
    }

    let mut out = String::with_capacity(2048);
    out.push_str(&format!(
        "<div class=\"lastfm-np-container {}\">",
        esc_attr(&class)
    ));
    out.push_str(&header(user));
    out.push_str("<div class=\"lastfm-np-tracks\">");
    if tracks.is_empty() {
        out.push_str(&no_tracks_fragment());
    } else {
        for (i, track) in tracks.iter().enumerate() {
            let duration = durations.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&track_row(track, duration, opts, now));
        }
    }
    out.push_str("</div>");
    out.push_str(&footer(user));
    out.push_str("</div>");
    out
}

fn header(user: &UserInfo) -> String {
    let avatar = if user.image.is_empty() {
        format!(
            "<div class=\"lastfm-np-avatar lastfm-np-avatar-placeholder\">{AVATAR_SVG}</div>"
        )
    } else {
        format!(
            "<img src=\"{}\" alt=\"{}\" class=\"lastfm-np-avatar\" loading=\"lazy\"/>",
            esc_url(&user.image),
            esc_attr(user.display_name())
        )
    };
    format!(
        concat!(
            "<div class=\"lastfm-np-header\">",
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"lastfm-np-user-link\">",
            "{avatar}",
            "<div class=\"lastfm-np-user-info\">",
            "<span class=\"lastfm-np-username\">{name}</span>",
            "<span class=\"lastfm-np-label\">Recent Tracks</span>",
            "</div></a>",
            "<div class=\"lastfm-np-logo\">{logo}</div>",
            "</div>"
        ),
        url = esc_url(&user.url),
        avatar = avatar,
        name = esc_html(user.display_name()),
        logo = LASTFM_SVG,
    )
}

fn track_row(track: &Track, duration: &str, opts: &RenderOptions, now: i64) -> String {
    let row_class = if track.now_playing {
        "lastfm-np-track lastfm-np-now-playing"
    } else {
        "lastfm-np-track"
    };

    let artwork = if track.image.is_empty() {
        format!("<div class=\"lastfm-np-track-image-placeholder\">{NOTE_SVG}</div>")
    } else {
        format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\"/>",
            esc_url(&track.image),
            esc_attr(&track.album)
        )
    };
    let indicator = if track.now_playing {
        "<div class=\"lastfm-np-playing-indicator\"><span></span><span></span><span></span></div>"
    } else {
        ""
    };

    let album = if opts.show_album && !track.album.is_empty() {
        format!(
            "<span class=\"lastfm-np-track-album\">{}</span>",
            esc_html(&track.album)
        )
    } else {
        String::new()
    };

    let mut meta = String::new();
    if track.now_playing {
        meta.push_str("<span class=\"lastfm-np-status\">Now Playing</span>");
    } else if track.timestamp > 0 {
        meta.push_str(&format!(
            "<span class=\"lastfm-np-time\">{}</span>",
            esc_html(&util::format_relative_time(track.timestamp, now))
        ));
    }
    if !duration.is_empty() {
        meta.push_str(&format!(
            "<span class=\"lastfm-np-duration\">{}</span>",
            esc_html(duration)
        ));
    }

    format!(
        concat!(
            "<div class=\"{row_class}\">",
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"lastfm-np-track-link\">",
            "<div class=\"lastfm-np-track-image\">{artwork}{indicator}</div>",
            "<div class=\"lastfm-np-track-info\">",
            "<span class=\"lastfm-np-track-name\">{name}</span>",
            "<span class=\"lastfm-np-track-artist\">{artist}</span>",
            "{album}",
            "</div>",
            "<div class=\"lastfm-np-track-meta\">{meta}</div>",
            "</a></div>"
        ),
        row_class = row_class,
        url = esc_url(&track.url),
        artwork = artwork,
        indicator = indicator,
        name = esc_html(&track.name),
        artist = esc_html(&track.artist),
        album = album,
        meta = meta,
    )
}

fn footer(user: &UserInfo) -> String {
    format!(
        concat!(
            "<div class=\"lastfm-np-footer\">",
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"lastfm-np-view-profile\">",
            "View Profile on Last.fm{icon}",
            "</a></div>"
        ),
        url = esc_url(&user.url),
        icon = EXTERNAL_SVG,
    )
}

pub fn error_fragment(message: &str) -> String {
    format!(
        "<div class=\"lastfm-np-container lastfm-np-error\"><p>{}</p></div>",
        esc_html(message)
    )
}

pub fn no_tracks_fragment() -> String {
    "<p class=\"lastfm-np-no-tracks\">No recent tracks found.</p>".to_owned()
}

pub fn esc_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn esc_attr(s: &str) -> String {
    esc_html(s)
}

/// Attribute-escapes a URL and refuses non-http(s) schemes outright.
pub fn esc_url(s: &str) -> String {
    if s.is_empty() || s.starts_with("http://") || s.starts_with("https://") {
        esc_attr(s)
    } else {
        String::new()
    }
}

const AVATAR_SVG: &str = "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M12 12c2.21 0 4-1.79 4-4s-1.79-4-4-4-4 1.79-4 4 1.79 4 4 4zm0 2c-2.67 0-8 1.34-8 4v2h16v-2c0-2.66-5.33-4-8-4z\"/></svg>";

const NOTE_SVG: &str = "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M12 3v10.55c-.59-.34-1.27-.55-2-.55-2.21 0-4 1.79-4 4s1.79 4 4 4 4-1.79 4-4V7h4V3h-6z\"/></svg>";

const EXTERNAL_SVG: &str = "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\" class=\"lastfm-np-external-icon\"><path d=\"M19 19H5V5h7V3H5c-1.11 0-2 .9-2 2v14c0 1.1.89 2 2 2h14c1.1 0 2-.9 2-2v-7h-2v7zM14 3v2h3.59l-9.83 9.83 1.41 1.41L19 6.41V10h2V3h-7z\"/></svg>";

const LASTFM_SVG: &str = "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\" class=\"lastfm-np-lastfm-icon\"><path d=\"M10.584 17.209l-.88-2.392s-1.43 1.595-3.573 1.595c-1.897 0-3.244-1.649-3.244-4.288 0-3.381 1.704-4.591 3.381-4.591 2.42 0 3.189 1.567 3.849 3.574l.88 2.749c.88 2.666 2.529 4.81 7.285 4.81 3.409 0 5.718-1.044 5.718-3.793 0-2.227-1.265-3.381-3.629-3.932l-1.758-.385c-1.21-.275-1.567-.77-1.567-1.595 0-.934.742-1.484 1.952-1.484 1.32 0 2.034.495 2.144 1.677l2.749-.33c-.22-2.474-1.924-3.491-4.729-3.491-2.474 0-4.893.935-4.893 3.932 0 1.87.907 3.051 3.189 3.602l1.87.44c1.402.33 1.869.907 1.869 1.704 0 1.017-.99 1.43-2.86 1.43-2.776 0-3.932-1.456-4.591-3.464l-.907-2.749c-1.155-3.574-2.997-4.894-6.653-4.894C2.144 5.333 0 7.616 0 12.096c0 4.287 2.144 6.433 6.05 6.433 3.107 0 4.534-1.32 4.534-1.32z\"/></svg>";
