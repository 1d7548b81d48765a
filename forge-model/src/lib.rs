//! Java type model for jforge.
//!
//! The [`TypeModel`] trait is the read-only view every query and generator
//! works against. [`TypeIndex`] is an in-memory implementation that can be
//! built programmatically or loaded from a TOML description.

mod data_type;
mod element;
mod error;
mod index;
mod model;
mod modifiers;
mod parse;

pub use data_type::{BaseType, DataType, Primitive, WildcardBound};
pub use element::{
    AnnotationElement, Element, ElementId, ElementKind, FieldElement, MethodElement,
    ParameterElement, TypeElement, TypeKind, TypeParameterElement,
};
pub use error::{Error, Result};
pub use index::{FieldDecl, MethodDecl, TypeDecl, TypeIndex};
pub use model::TypeModel;
pub use modifiers::Modifiers;
pub use parse::parse_index;
