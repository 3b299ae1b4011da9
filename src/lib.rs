//! Go test discovery and runner.
//!
//! Parses `_test.go` files with tree-sitter, finds top-level tests and
//! benchmarks, and statically resolves the names of `t.Run` subtests,
//! including those driven by table literals, so any of them can be run by
//! its fully qualified name.
pub mod benchmarks;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod history;
pub mod logging;
pub mod output;
pub mod parser;
pub mod runner;
pub mod select;
pub mod utils;

pub use discovery::{discover_dir, discover_file, Discoverer};
pub use engine::{DiscoveryConfig, DiscoveryMode, Engine, FileDiscovery, Resolver, TestCase};
pub use error::{Error, Result};
