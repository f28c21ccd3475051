use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::Matcher;
use serde_json::{Value, json};

use lastfm_now_playing::cache::{CacheStore, MemoryCache};
use lastfm_now_playing::error::LastfmError;
use lastfm_now_playing::lastfm::{LastfmClient, LastfmClientConfig};

/// Cache wrapper that records the TTL of every write.
#[derive(Default)]
struct RecordingCache {
    inner: MemoryCache,
    ttls: Mutex<Vec<(String, Duration)>>,
}

impl RecordingCache {
    fn recorded_ttl(&self, key_prefix: &str) -> Option<Duration> {
        self.ttls
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k.starts_with(key_prefix))
            .map(|(_, ttl)| *ttl)
    }
}

impl CacheStore for RecordingCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.ttls.lock().unwrap().push((key.to_owned(), ttl));
        self.inner.set(key, value, ttl);
    }

    fn delete(&self, key: &str) {
        self.inner.delete(key);
    }

    fn clear(&self) {
        self.inner.clear();
    }
}

fn test_config(base: String) -> LastfmClientConfig {
    LastfmClientConfig {
        api_base: base,
        api_key: "test-key".to_owned(),
        username: "rj".to_owned(),
        cache_duration: Duration::from_secs(300),
        ..LastfmClientConfig::default()
    }
}

fn client_with(base: String, cache: Arc<dyn CacheStore>) -> LastfmClient {
    LastfmClient::new(test_config(base), cache).expect("client")
}

fn method_matcher(method: &str) -> Matcher {
    Matcher::UrlEncoded("method".into(), method.into())
}

fn user_info_body() -> Value {
    json!({
        "user": {
            "name": "rj",
            "realname": "Richard Jones",
            "url": "https://www.last.fm/user/rj",
            "image": [
                {"size": "small", "#text": "https://img/s.png"},
                {"size": "medium", "#text": "https://img/m.png"}
            ],
            "playcount": "85432",
            "registered": {"unixtime": "1037793040", "#text": 1037793040}
        }
    })
}

fn recent_tracks_body(now_playing: bool) -> Value {
    let mut first = json!({
        "name": "Roygbiv",
        "artist": {"name": "Boards of Canada", "url": "https://www.last.fm/music/boc"},
        "album": {"#text": "Music Has the Right to Children"},
        "url": "https://www.last.fm/music/boc/_/roygbiv",
        "image": [{"size": "medium", "#text": "https://img/cover.png"}]
    });
    if now_playing {
        first["@attr"] = json!({"nowplaying": "true"});
    } else {
        first["date"] = json!({"uts": "1700000000", "#text": "14 Nov 2023, 22:13"});
    }
    json!({"recenttracks": {"track": [first]}})
}

#[tokio::test]
async fn user_info_maps_wire_fields() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/")
        .match_query(method_matcher("user.getinfo"))
        .with_body(user_info_body().to_string())
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let user = client.user_info().await.expect("user_info");

    assert_eq!(user.name, "rj");
    assert_eq!(user.realname, "Richard Jones");
    assert_eq!(user.image, "https://img/m.png");
    assert_eq!(user.playcount, 85_432);
    assert_eq!(user.registered, "1037793040");
    m.assert_async().await;
}

#[tokio::test]
async fn cached_entry_skips_second_http_call() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/")
        .match_query(method_matcher("user.getinfo"))
        .with_body(user_info_body().to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let first = client.user_info().await.expect("first call");
    let second = client.user_info().await.expect("second call");

    assert_eq!(first, second);
    m.assert_async().await;
}

#[tokio::test]
async fn recent_tracks_cache_uses_configured_ttl() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getrecenttracks"))
        .with_body(recent_tracks_body(false).to_string())
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let client = client_with(server.url(), cache.clone());
    let tracks = client.recent_tracks(5).await.expect("tracks");

    assert!(!tracks[0].now_playing);
    assert_eq!(
        cache.recorded_ttl("lastfm_np_tracks_"),
        Some(Duration::from_secs(300))
    );
}

#[tokio::test]
async fn now_playing_caps_cache_ttl_at_sixty_seconds() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getrecenttracks"))
        .with_body(recent_tracks_body(true).to_string())
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let client = client_with(server.url(), cache.clone());
    let tracks = client.recent_tracks(5).await.expect("tracks");

    assert!(tracks[0].now_playing);
    let ttl = cache.recorded_ttl("lastfm_np_tracks_").expect("ttl recorded");
    assert!(ttl <= Duration::from_secs(60), "ttl was {ttl:?}");
}

#[tokio::test]
async fn track_info_caches_for_a_day() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("track.getInfo"))
        .with_body(
            json!({"track": {"duration": "185000", "listeners": "1200", "playcount": "9000"}})
                .to_string(),
        )
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::default());
    let client = client_with(server.url(), cache.clone());
    let info = client
        .track_info("Boards of Canada", "Roygbiv")
        .await
        .expect("track_info");

    assert_eq!(info.duration, 185_000);
    assert_eq!(
        cache.recorded_ttl("lastfm_np_track_"),
        Some(Duration::from_secs(86_400))
    );
}

#[tokio::test]
async fn error_payload_becomes_api_error_with_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getinfo"))
        .with_body(json!({"error": 6, "message": "User not found"}).to_string())
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let err = client.user_info().await.expect_err("should fail");
    match err {
        LastfmError::Api { message } => assert_eq!(message, "User not found"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_200_without_body_message_is_unknown_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getinfo"))
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let err = client.user_info().await.expect_err("should fail");
    match err {
        LastfmError::Api { message } => assert_eq!(message, "Unknown API error"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_shape_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getinfo"))
        .with_body(json!({"something": "else"}).to_string())
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let err = client.user_info().await.expect_err("should fail");
    assert!(matches!(err, LastfmError::InvalidResponse(_)));
}

#[tokio::test]
async fn missing_credentials_never_touch_the_network() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/")
        .expect(0)
        .create_async()
        .await;

    let cfg = LastfmClientConfig {
        api_base: server.url(),
        ..LastfmClientConfig::default()
    };
    let client = LastfmClient::new(cfg, Arc::new(MemoryCache::new())).expect("client");

    assert!(matches!(
        client.user_info().await,
        Err(LastfmError::NotConfigured)
    ));
    assert!(matches!(
        client.recent_tracks(5).await,
        Err(LastfmError::NotConfigured)
    ));
    assert!(matches!(
        client.track_info("a", "b").await,
        Err(LastfmError::NotConfigured)
    ));
    m.assert_async().await;
}

#[tokio::test]
async fn single_track_object_is_normalized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(method_matcher("user.getrecenttracks"))
        .with_body(
            json!({"recenttracks": {"track": {
                "name": "Only One",
                "artist": {"#text": "Plaid"},
                "url": "https://www.last.fm/music/plaid/_/only-one"
            }}})
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_with(server.url(), Arc::new(MemoryCache::new()));
    let tracks = client.recent_tracks(1).await.expect("tracks");
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Only One");
    assert_eq!(tracks[0].artist, "Plaid");
}
