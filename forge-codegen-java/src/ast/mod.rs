//! Java syntax generators.

pub(crate) mod annotation;
mod expr;
mod field;
mod method;
pub(crate) mod params;
pub(crate) mod statement;
mod type_decl;
mod types;
mod unit;

pub use annotation::{Annotation, AnnotationValue};
pub use expr::Expr;
pub use field::FieldGenerator;
pub use method::MethodGenerator;
pub use params::{ParameterGenerator, TypeParameterGenerator};
pub use statement::Statement;
pub use type_decl::{EnumConstant, Member, TypeGenerator};
pub use types::JavaType;
pub use unit::CompilationUnitGenerator;
