//! Java source generators for jforge.
//!
//! Every generator is a plain value built with consuming `with_*` / `as_*`
//! mutators and emitted through [`Generator::emit`](jforge_codegen::Generator)
//! against a [`BuilderContext`](jforge_codegen::BuilderContext).
//!
//! # Module Organization
//!
//! - [`ast`] - type references, annotations, expressions, statements and
//!   declaration generators
//! - [`overrides`] - override skeletons driven by hierarchy queries

pub mod ast;
pub mod overrides;

pub use ast::{
    Annotation, AnnotationValue, CompilationUnitGenerator, EnumConstant, Expr, FieldGenerator,
    JavaType, Member, MethodGenerator, ParameterGenerator, Statement, TypeGenerator,
    TypeParameterGenerator,
};
pub use overrides::{implement_abstract_methods, super_methods};
