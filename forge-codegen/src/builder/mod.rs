//! Code generation building blocks.
//!
//! This module provides the core primitives for generating code:
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Generator`] - Trait for nodes that emit Java source through a context
//! - [`Indent`], [`LineDelimiter`] - Formatting configuration

mod code_builder;
mod generator;
mod indent;

pub use code_builder::CodeBuilder;
pub use generator::{CodeFragment, Generator};
pub use indent::{Indent, LineDelimiter};
