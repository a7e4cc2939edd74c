//! Configuration module for WAIO Insight
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use waio_insight::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("insight.toml")).unwrap();
//! println!("Comparing {} and {}", config.comparison.group_a, config.comparison.group_b);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ComparisonConfig, Config, InputConfig, OutputConfig, ReportConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
