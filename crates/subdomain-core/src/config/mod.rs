//! Local configuration persistence

mod store;

pub use store::{Config, ConfigStore, CONFIG_FILE_NAME};
