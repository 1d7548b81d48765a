//! Lazy type hierarchy navigation for jforge.
//!
//! # Module Organization
//!
//! - [`SuperTypes`] - breadth-first walk over superclasses and superinterfaces
//! - [`InnerTypes`] - walk over member types, optionally recursive
//! - [`query`] - fluent queries built on the two walks
//!
//! All walks borrow a [`TypeModel`](jforge_model::TypeModel) and are
//! single-use iterators: nothing is computed until the first pull, and a
//! consumed walk cannot be restarted.

mod inner;
pub mod query;
mod traversal;

pub use inner::InnerTypes;
pub use query::Query;
pub use traversal::{Characteristics, SuperTypes, TraversalOptions};
