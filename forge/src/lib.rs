//! Fluent Java source synthesis and lazy type hierarchy navigation.
//!
//! `jforge` bundles the workspace crates behind one dependency:
//!
//! - [`model`] - the type model consumed by queries and override helpers,
//!   with an in-memory [`TypeIndex`](model::TypeIndex) that loads from TOML
//! - [`hierarchy`] - supertype and inner type walks, structural queries
//! - [`codegen`] - generator framework: [`BuilderContext`], imports, API
//!   resolution
//! - [`java`] - concrete Java generators
//!
//! ```
//! use jforge::prelude::*;
//!
//! let env = ApiEnvironment::new(ApiVersion::new(17, 0, 0), ApiRegistry::new());
//! let mut ctx = BuilderContext::new(&env);
//! let unit = CompilationUnitGenerator::new("com.acme").with_type(
//!     TypeGenerator::class("Greeter").with_method(
//!         MethodGenerator::new("greet")
//!             .with_return_type(JavaType::string())
//!             .with_statement(Statement::return_(Expr::string("hi"))),
//!     ),
//! );
//! let code = unit.emit(&mut ctx).unwrap();
//! assert!(code.starts_with("package com.acme;\n"));
//! ```

pub use jforge_codegen as codegen;
pub use jforge_codegen::{ApiEnvironment, ApiFunction, ApiRegistry, BuilderContext, Generator};
pub use jforge_codegen_java as java;
pub use jforge_core::{ApiVersion, Error, Result};
pub use jforge_hierarchy as hierarchy;
pub use jforge_model as model;

/// The types most generation code needs.
pub mod prelude {
    pub use jforge_codegen::{
        ApiEnvironment, ApiFunction, ApiRegistry, BuilderContext, Generator, Indent,
        LineDelimiter,
    };
    pub use jforge_codegen_java::{
        Annotation, CompilationUnitGenerator, EnumConstant, Expr, FieldGenerator, JavaType,
        MethodGenerator, ParameterGenerator, Statement, TypeGenerator, TypeParameterGenerator,
    };
    pub use jforge_core::{ApiVersion, Error, Result};
    pub use jforge_hierarchy::{
        InnerTypes, SuperTypes, TraversalOptions,
        query::{
            DependencyQuery, ExportedSymbolQuery, FieldQuery, InnerTypeQuery, MethodQuery, Query,
            SubTypeQuery, SuperTypeQuery,
        },
    };
    pub use jforge_model::{ElementId, TypeIndex, TypeModel};
}
