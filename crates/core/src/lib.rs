//! Core utilities for the Mallorca guide
//!
//! This crate provides shared functionality used by the catalog and the CLI:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults
//! - **Validation**: fluent validation of catalog drafts and user input
//!
//! # Example
//!
//! ```rust
//! use mallorca_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Cala Varques")
//!     .min_length("name", "Cala Varques", 3)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
