use std::collections::HashMap;

use crate::domain::Theme;
use crate::render::RenderOptions;
use crate::settings::Settings;

pub const SHORTCODE_TAG: &str = "lastfm_now_playing";

/// Resolves options from a shortcode invocation. Accepts the bracketed form
/// `[lastfm_now_playing count="5" theme="dark"]` or a bare attribute string;
/// unknown attributes are ignored, malformed values fall back to the global
/// default.
pub fn parse_shortcode(input: &str, settings: &Settings) -> RenderOptions {
    let attrs = parse_attrs(strip_tag(input));
    let mut opts = RenderOptions::from_settings(settings);

    if let Some(count) = attrs.get("count").and_then(|v| v.parse::<u32>().ok()) {
        opts.count = count.clamp(
            crate::settings::store::COUNT_MIN,
            crate::settings::store::COUNT_MAX,
        );
    }
    if let Some(theme) = attrs.get("theme") {
        opts.theme = Theme::from_str_lossy(theme);
    }
    if let Some(v) = attrs.get("show_album").and_then(|v| parse_bool(v)) {
        opts.show_album = v;
    }
    if let Some(v) = attrs.get("show_duration").and_then(|v| parse_bool(v)) {
        opts.show_duration = v;
    }
    opts
}

/// Truthiness rules for shortcode boolean attributes.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn strip_tag(input: &str) -> &str {
    let s = input.trim();
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    let s = s.trim();
    s.strip_prefix(SHORTCODE_TAG).unwrap_or(s).trim()
}

/// Parses `key="value"`, `key='value'` and bare `key=value` pairs.
fn parse_attrs(input: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        // Key runs until '=' or whitespace.
        let mut key_end = start + c.len_utf8();
        let mut has_value = false;
        for (i, k) in chars.by_ref() {
            if k == '=' {
                key_end = i;
                has_value = true;
                break;
            }
            if k.is_whitespace() {
                key_end = i;
                break;
            }
            key_end = i + k.len_utf8();
        }
        let key = input[start..key_end].to_ascii_lowercase();
        if !has_value {
            continue;
        }

        let value = match chars.peek().map(|&(_, v)| v) {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                let mut val = String::new();
                for (_, v) in chars.by_ref() {
                    if v == quote {
                        break;
                    }
                    val.push(v);
                }
                val
            }
            _ => {
                let mut val = String::new();
                while let Some(&(_, v)) = chars.peek() {
                    if v.is_whitespace() {
                        break;
                    }
                    val.push(v);
                    chars.next();
                }
                val
            }
        };
        attrs.insert(key, value);
    }
    attrs
}
