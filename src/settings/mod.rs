pub mod store;

pub use store::{Settings, load_settings, save_settings, settings_path};
