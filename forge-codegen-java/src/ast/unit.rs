//! Compilation units: package, imports and top-level types.

use std::collections::BTreeSet;

use jforge_codegen::{BuilderContext, CodeFragment, Diagnostic, Generator};
use jforge_core::{Error, Result, package_name};

use super::TypeGenerator;

/// One `.java` file.
///
/// Types are emitted first so that every reference they make is known to
/// the context's import validator; the package declaration and import list
/// are prepended afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnitGenerator {
    package: Option<String>,
    imports: BTreeSet<String>,
    types: Vec<TypeGenerator>,
}

impl CompilationUnitGenerator {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Default package.
    pub fn without_package(mut self) -> Self {
        self.package = None;
        self
    }

    /// Import `qualified` whether or not the types refer to it.
    pub fn with_import(mut self, qualified: impl Into<String>) -> Self {
        self.imports.insert(qualified.into());
        self
    }

    pub fn without_import(mut self, qualified: &str) -> Self {
        self.imports.remove(qualified);
        self
    }

    pub fn with_type(mut self, ty: TypeGenerator) -> Self {
        self.types.push(ty);
        self
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn types(&self) -> &[TypeGenerator] {
        &self.types
    }

    /// Qualified names of every type declared in this unit, nested ones
    /// included.
    pub fn declared_types(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for ty in &self.types {
            let name = ty
                .name()
                .ok_or_else(|| Error::generation("name", ty.describe()))?;
            let qualified = match &self.package {
                Some(package) => format!("{}.{}", package, name),
                None => name.to_string(),
            };
            collect_nested(ty, qualified, &mut names);
        }
        Ok(names)
    }

    fn is_implicitly_visible(&self, qualified: &str) -> bool {
        let package = package_name(qualified);
        package == "java.lang" || Some(package) == self.package.as_deref() || package.is_empty()
    }
}

fn collect_nested(ty: &TypeGenerator, qualified: String, out: &mut Vec<String>) {
    for inner in ty.inner_types() {
        if let Some(name) = inner.name() {
            collect_nested(inner, format!("{}.{}", qualified, name), out);
        }
    }
    out.push(qualified);
}

impl Generator for CompilationUnitGenerator {
    fn describe(&self) -> String {
        match &self.package {
            Some(package) => format!("compilation unit {}", package),
            None => "compilation unit <default package>".to_string(),
        }
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        // Own types and explicit imports bind their simple names before any
        // reference is resolved.
        let declared = self.declared_types()?;
        for qualified in &declared {
            ctx.reserve(qualified);
        }
        let mut accepted = Vec::new();
        for qualified in &self.imports {
            if !ctx.reserve(qualified) {
                ctx.report(
                    Diagnostic::warning(
                        self.describe(),
                        "explicit import clashes with another binding and is not printed",
                    )
                    .at(qualified),
                );
            } else if self.is_implicitly_visible(qualified) {
                ctx.report(
                    Diagnostic::info(self.describe(), "explicit import is implicitly visible")
                        .at(qualified),
                );
            } else {
                accepted.push(qualified);
            }
        }

        let mut body = Vec::new();
        for ty in &self.types {
            if !body.is_empty() {
                body.push(CodeFragment::blank());
            }
            body.extend(ty.to_fragments(ctx)?);
        }

        let imports: BTreeSet<&String> = accepted
            .into_iter()
            .chain(ctx.claimed_imports())
            .filter(|q| !self.is_implicitly_visible(q))
            .filter(|q| !declared.contains(*q))
            .collect();

        let mut fragments = Vec::new();
        if let Some(package) = &self.package {
            fragments.push(CodeFragment::line(format!("package {};", package)));
            fragments.push(CodeFragment::blank());
        }
        if !imports.is_empty() {
            for qualified in imports {
                fragments.push(CodeFragment::line(format!("import {};", qualified)));
            }
            fragments.push(CodeFragment::blank());
        }
        fragments.extend(body);
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry};
    use jforge_core::ApiVersion;

    use super::*;
    use crate::{FieldGenerator, JavaType};

    fn env() -> ApiEnvironment {
        ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new())
    }

    #[test]
    fn test_imports_are_sorted_and_filtered() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::new("com.acme")
            .with_import("java.util.concurrent.atomic.AtomicLong")
            .with_type(
                TypeGenerator::class("Registry")
                    .with_field(FieldGenerator::new(
                        JavaType::declared("java.util.Map")
                            .with_argument(JavaType::string())
                            .with_argument(JavaType::declared("com.acme.Entry")),
                        "entries",
                    ))
                    .with_field(FieldGenerator::new(JavaType::declared("java.awt.List"), "a"))
                    .with_field(FieldGenerator::new(JavaType::declared("java.util.List"), "b")),
            );
        assert_eq!(
            unit.emit(&mut ctx).unwrap(),
            "package com.acme;\n\
             \n\
             import java.awt.List;\n\
             import java.util.Map;\n\
             import java.util.concurrent.atomic.AtomicLong;\n\
             \n\
             public class Registry {\n    \
             private Map<String, Entry> entries;\n\n    \
             private List a;\n\n    \
             private java.util.List b;\n\
             }\n"
        );
    }

    #[test]
    fn test_own_type_names_are_reserved() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::new("com.acme").with_type(
            TypeGenerator::class("List")
                .with_field(FieldGenerator::new(JavaType::declared("java.util.List"), "delegate")),
        );
        let code = unit.emit(&mut ctx).unwrap();
        assert!(code.contains("private java.util.List delegate;"));
        assert!(!code.contains("import"));
    }

    #[test]
    fn test_clashing_explicit_import_is_dropped() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::new("com.acme")
            .with_import("java.util.List")
            .with_import("java.awt.List")
            .with_type(
                TypeGenerator::class("Holder")
                    .with_field(FieldGenerator::new(JavaType::declared("java.awt.List"), "a"))
                    .with_field(FieldGenerator::new(JavaType::declared("java.util.List"), "b")),
            );
        assert_eq!(
            unit.emit(&mut ctx).unwrap(),
            "package com.acme;\n\
             \n\
             import java.awt.List;\n\
             \n\
             public class Holder {\n    \
             private List a;\n\n    \
             private java.util.List b;\n\
             }\n"
        );
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].location.as_deref(), Some("java.util.List"));
    }

    #[test]
    fn test_explicit_import_clashing_with_own_type_is_dropped() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::new("com.acme")
            .with_import("java.util.List")
            .with_type(TypeGenerator::class("List"));
        assert_eq!(
            unit.emit(&mut ctx).unwrap(),
            "package com.acme;\n\npublic class List {\n}\n"
        );
        assert!(ctx.has_warnings());
    }

    #[test]
    fn test_implicit_explicit_import_is_reported() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::new("com.acme")
            .with_import("java.lang.StringBuilder")
            .with_import("com.acme.Sibling")
            .with_type(TypeGenerator::class("Main"));
        assert_eq!(
            unit.emit(&mut ctx).unwrap(),
            "package com.acme;\n\npublic class Main {\n}\n"
        );
        let locations: Vec<_> = ctx
            .diagnostics()
            .iter()
            .filter_map(|d| d.location.as_deref())
            .collect();
        assert_eq!(locations, vec!["com.acme.Sibling", "java.lang.StringBuilder"]);
        assert!(!ctx.has_warnings());
    }

    #[test]
    fn test_nested_declared_types() {
        let unit = CompilationUnitGenerator::new("com.acme").with_type(
            TypeGenerator::class("Outer").with_inner_type(TypeGenerator::class("Inner")),
        );
        assert_eq!(
            unit.declared_types().unwrap(),
            vec!["com.acme.Outer.Inner", "com.acme.Outer"]
        );
    }

    #[test]
    fn test_default_package() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let unit = CompilationUnitGenerator::default().with_type(TypeGenerator::class("Main"));
        assert_eq!(unit.emit(&mut ctx).unwrap(), "public class Main {\n}\n");
    }
}
