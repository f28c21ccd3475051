use md5::{Digest, Md5};

/// Deterministic cache key for a call: prefix plus md5 of the parameters.
pub fn cache_key(prefix: &str, input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    format!("lastfm_np_{prefix}_{}", hex::encode(digest))
}

/// Milliseconds to `m:ss`. Zero (the service's "unknown") renders empty.
pub fn format_duration(milliseconds: u64) -> String {
    if milliseconds == 0 {
        return String::new();
    }
    let seconds = milliseconds / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Unix timestamp to a relative bucket against `now` (also unix seconds).
pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    if timestamp <= 0 {
        return String::new();
    }
    let diff = now - timestamp;
    if diff < 60 {
        "Just now".to_owned()
    } else if diff < 3600 {
        plural(diff / 60, "minute")
    } else if diff < 86_400 {
        plural(diff / 3600, "hour")
    } else {
        plural(diff / 86_400, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
