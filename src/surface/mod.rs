//! Presentation surfaces.
//!
//! Each surface resolves effective display options as: explicit per-instance
//! value, else the global settings default, then delegates to the renderer.

mod block;
mod shortcode;
mod widget;

pub use block::BlockAttrs;
pub use shortcode::{SHORTCODE_TAG, parse_bool, parse_shortcode};
pub use widget::WidgetInstance;
