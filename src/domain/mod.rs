mod model;

pub use model::{Theme, Track, TrackDuration, UserInfo};
