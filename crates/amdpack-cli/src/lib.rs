//! amdpack CLI - auto-bundling for AMD (RequireJS) projects.
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `build` and `check` implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages and summaries
//!
//! # Example
//!
//! ```rust
//! use amdpack_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
