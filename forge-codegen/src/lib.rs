//! Generator composition framework for jforge.
//!
//! This crate provides the language-level plumbing that concrete Java
//! generators (`jforge-codegen-java`) are built on.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, Generator)
//! - [`api`] - Version-aware capability resolution (ApiFunction, ApiRegistry)
//! - [`BuilderContext`] - Per-pass context threaded through every generator
//! - [`ImportValidator`] - Short-name versus qualified-name decisions
//! - [`Diagnostic`] - Non-fatal findings collected during a pass
//! - [`NamingConvention`] - Java identifier rules

pub mod api;
pub mod builder;
mod context;
mod diagnostic;
mod imports;
mod naming;

pub use api::{ApiEnvironment, ApiFunction, ApiRegistry};
pub use builder::{CodeBuilder, CodeFragment, Generator, Indent, LineDelimiter};
pub use context::BuilderContext;
pub use diagnostic::{Diagnostic, Severity};
pub use imports::ImportValidator;
pub use naming::NamingConvention;
