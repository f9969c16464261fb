//! `readgen_core` is the engine behind [readgen](https://docs.rs/readgen_cli). It builds a project README from three sources: content blocks written in `readgen.toml`, metadata from the project manifest, and the project's directory tree annotated with module doc strings.
//!
//! ## Processing Pipeline
//!
//! ```text
//! readgen.toml + pyproject.toml
//!   → ConfigResolver (settings, content blocks with ${...} substituted)
//!   → DirectoryScanner (visible directories + package doc strings)
//!   → TreeRenderer (box-drawing tree lines)
//!   → ReadmeGenerator (blocks, env table, tree, footer)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Loading `readgen.toml` and the project manifest, reserved `[directory]` and `[env]` sections, depth limits.
//! - [`resolver`] - `${project.authors[0].name}` style references against manifest metadata.
//! - [`scanner`] - Exclusion- and depth-aware walk producing [`DirectoryEntry`] values.
//! - [`tree`] - Deterministic tree rendering with `├── ` / `└── ` connectors.
//! - [`env_file`] - Reading `KEY=value # description` example environment files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use readgen_core::ReadmeGenerator;
//!
//! let generator = ReadmeGenerator::new(".");
//! let readme = generator.generate();
//! std::fs::write("README.md", readme).unwrap();
//! ```

pub use config::*;
pub use docstring::*;
pub use env_file::*;
pub use error::*;
pub use generator::*;
pub use resolver::*;
pub use scanner::*;
pub use tree::*;

pub mod config;
mod docstring;
pub mod env_file;
#[allow(unused_assignments)]
mod error;
mod generator;
pub mod resolver;
pub mod scanner;
pub mod tree;

#[cfg(test)]
mod __fixtures;
