//! Common crate
//!
//! Shared settings, logging and error handling for Floe.
//!
//! # Example
//! ```rust
//! use floe_common::Error;
//! let err = Error::TableNotFound("/warehouse/orders".to_string());
//! assert!(!err.is_skippable());
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::Settings;
pub use error::{Error, Result};
