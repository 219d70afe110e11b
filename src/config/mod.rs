pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, FaviconConfig, SignalConfig};
pub use loader::load_config;
