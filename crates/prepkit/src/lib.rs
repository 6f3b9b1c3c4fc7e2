//! prepkit: data preparation utilities for tabular and free-text inputs.
//!
//! prepkit bundles the small pieces every ingestion script ends up writing:
//! checking arguments, cleaning strings, pulling names, phone numbers and
//! emails out of free text, and reading or writing CSV, Excel and JSON.
//!
//! # Modules
//!
//! - [`validation`]: type predicates over `serde_json::Value` and validators
//!   that fail with a formatted [`PrepError::InvalidArgument`]
//! - [`text`]: the [`clean`](text::clean) pipeline and entity extraction
//! - [`io`]: readers with throwing and safe variants, dictionaries, writers
//! - [`config`]: logging setup, project paths and the regex constants loader
//!
//! # Example
//!
//! ```no_run
//! use prepkit::config::{init_logging, DataLoader, LogConfig, ProjectPaths};
//! use prepkit::io::{read_rows, ReadOptions};
//!
//! init_logging(&LogConfig::default()).unwrap();
//!
//! let paths = ProjectPaths::from_env();
//! let loader = DataLoader::from_paths(&paths);
//! loader.initialize_or_exit();
//! let extractor = loader.extractor().unwrap();
//!
//! for row in read_rows(paths.data_dir.join("contacts.csv"), &ReadOptions::default()) {
//!     if let Some(name) = row.get("name").and_then(|n| extractor.extract_name(n)) {
//!         println!("{}", name.full_name());
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod text;
pub mod validation;

pub use error::{PrepError, Result};
pub use text::{clean, CleanOptions, EntityExtractor, PersonName, PhoneNumber};
