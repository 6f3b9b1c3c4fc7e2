//! Logging setup, project paths and the regex constants loader.

mod loader;
mod logging;
mod paths;

pub use loader::{DataLoader, DataLoaderConfig, RegexConstants};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use paths::{
    ProjectPaths, DATA_DIR_ENV, DATA_LOADER_CONFIG_FILE, LOG_DIR_ENV, OUTPUT_DIR_ENV, ROOT_ENV,
};
