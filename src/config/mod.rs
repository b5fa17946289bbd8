pub mod env;
mod loader;

pub use env::{AppConfig, ClassifierConfig, DirectoryConfig, SessionConfig};
pub use loader::load_config;
