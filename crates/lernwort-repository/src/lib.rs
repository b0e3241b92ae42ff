//! lernwort-repository — word repository implementations.
//!
//! Implements the `WordRepository` trait from `lernwort-core` over the
//! vocgui-style REST API, local TOML training set files, and an in-memory
//! mock for tests.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_repository, load_config, load_config_from, LernwortConfig, SourceConfig};
pub use file::FileRepository;
pub use http::HttpRepository;
pub use mock::MockRepository;
