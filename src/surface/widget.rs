use serde::{Deserialize, Serialize};

use crate::domain::Theme;
use crate::lastfm::LastfmClient;
use crate::render::{self, RenderOptions, esc_html};
use crate::settings::Settings;

/// Saved state of one widget instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetInstance {
    #[serde(default)]
    pub title: String,
    pub count: Option<u32>,
    pub theme: Option<String>,
    pub show_album: Option<bool>,
    pub show_duration: Option<bool>,
}

impl WidgetInstance {
    /// Sanitizes submitted form values before they are persisted: count is
    /// clamped, an unknown theme collapses to its lossy fallback, the title
    /// is trimmed.
    pub fn update(new_instance: WidgetInstance) -> WidgetInstance {
        WidgetInstance {
            title: new_instance.title.trim().to_owned(),
            count: new_instance.count.map(|c| {
                c.clamp(
                    crate::settings::store::COUNT_MIN,
                    crate::settings::store::COUNT_MAX,
                )
            }),
            theme: new_instance
                .theme
                .map(|t| Theme::from_str_lossy(&t).as_str().to_owned()),
            show_album: new_instance.show_album,
            show_duration: new_instance.show_duration,
        }
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
        opts
    }

    /// Renders the widget: optional title heading plus the track fragment.
    /// Upstream failures already come back as an error fragment, so this
    /// never fails.
    pub async fn render(&self, client: &LastfmClient, settings: &Settings) -> String {
        let opts = self.resolve(settings);
        let body = render::render(client, &opts).await;

        let mut out = String::from("<div class=\"widget lastfm-np-widget\">");
        if !self.title.is_empty() {
            out.push_str(&format!(
                "<h2 class=\"widget-title\">{}</h2>",
                esc_html(&self.title)
            ));
        }
        out.push_str(&body);
        out.push_str("</div>");
        out
    }
}
