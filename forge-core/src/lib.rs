//! Core utilities and types for jforge.
//!
//! This crate provides the error taxonomy, the API version discriminator and
//! the qualified-name helpers shared by every other jforge crate.

mod error;
mod names;
mod version;

pub use error::{Error, Result};
pub use names::{
    capitalize, escape_java_char, escape_java_string, is_qualified, package_name, simple_name,
};
pub use version::ApiVersion;
