use serde::Deserialize;

use crate::domain::Theme;
use crate::render::RenderOptions;
use crate::settings::Settings;

/// Attributes of one editor block instance, as stored in the block's JSON
/// blob. Absent attributes inherit the global defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttrs {
    pub count: Option<u32>,
    pub theme: Option<String>,
    pub show_album: Option<bool>,
    pub show_duration: Option<bool>,
    pub class_name: Option<String>,
}

impl BlockAttrs {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn resolve(&self, settings: &Settings) -> RenderOptions {
        let mut opts = RenderOptions::from_settings(settings);
        if let Some(count) = self.count {
            opts.count = count.clamp(
                crate::settings::store::COUNT_MIN,
                crate::settings::store::COUNT_MAX,
            );
        }
        if let Some(theme) = self.theme.as_deref() {
            opts.theme = Theme::from_str_lossy(theme);
        }
        if let Some(v) = self.show_album {
            opts.show_album = v;
        }
        if let Some(v) = self.show_duration {
            opts.show_duration = v;
        }
        opts.class = self.class_name.clone().unwrap_or_default();
        opts
    }
}
