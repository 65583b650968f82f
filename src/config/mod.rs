pub mod load;
pub mod types;

pub use types::{
    Config, SETTINGS_FILE_NAME, UserSettings, normalize_extension, normalize_extensions,
};
