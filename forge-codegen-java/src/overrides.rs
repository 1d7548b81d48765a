//! Overriding methods found in a type model.
//!
//! Signatures are compared the way the compiler does for overriding: same
//! name, same parameter types after erasure.

use std::collections::HashSet;

use jforge_core::{Error, Result};
use jforge_hierarchy::{
    SuperTypes,
    query::{MethodQuery, Query},
};
use jforge_model::{Element, ElementId, MethodElement, Modifiers, Primitive, TypeModel};

use crate::{
    Annotation, Expr, JavaType, MethodGenerator, ParameterGenerator, Statement,
    TypeParameterGenerator, ast::annotation::OVERRIDE,
};

/// Methods of every supertype of `ty`, nearest supertype first. These are
/// the candidates a method declared in `ty` may override.
pub fn super_methods(model: &dyn TypeModel, ty: ElementId) -> Result<Vec<ElementId>> {
    Ok(MethodQuery::new(model, ty)?
        .with_recursive(true)
        .with_self(false)
        .to_vec())
}

fn erased_signature(model: &dyn TypeModel, method: &MethodElement) -> Vec<JavaType> {
    method
        .parameters
        .iter()
        .filter_map(|&p| model.parameter(p))
        .map(|p| JavaType::from(p.data_type.erasure()))
        .collect()
}

fn is_abstract(model: &dyn TypeModel, method: &MethodElement) -> bool {
    if model.is_interface(method.declaring_type) {
        !method.modifiers.intersects(Modifiers::DEFAULT | Modifiers::STATIC)
    } else {
        method.modifiers.contains(Modifiers::ABSTRACT)
    }
}

/// Placeholder body for a generated override.
fn default_body(return_type: &JavaType) -> Vec<Statement> {
    let value = match return_type.as_primitive() {
        Some(Primitive::Void) => return Vec::new(),
        Some(Primitive::Boolean) => Expr::bool(false),
        Some(_) => Expr::int(0),
        None => Expr::null(),
    };
    vec![Statement::return_(value)]
}

impl MethodGenerator {
    /// Add `@Override` if one of `candidates` is a method this one
    /// overrides. Constructors, static and private methods, and methods
    /// already annotated are returned unchanged.
    pub fn with_override_if_necessary(
        self,
        model: &dyn TypeModel,
        candidates: &[ElementId],
    ) -> Self {
        if self.is_constructor()
            || self.has_annotation(OVERRIDE)
            || self
                .modifiers()
                .intersects(Modifiers::STATIC | Modifiers::PRIVATE)
        {
            return self;
        }
        let Some(name) = self.name() else {
            return self;
        };
        let Ok(signature) = self.erased_parameter_types() else {
            return self;
        };
        let overrides = candidates
            .iter()
            .filter_map(|&id| model.method(id))
            .any(|m| {
                !m.is_constructor()
                    && m.name == name
                    && m.modifiers.is_overridable()
                    && erased_signature(model, m) == signature
            });
        if overrides {
            self.with_annotation(Annotation::override_())
        } else {
            self
        }
    }

    /// Skeleton override of a model method: same signature, `@Override`,
    /// and a body returning a default value.
    pub fn overriding(model: &dyn TypeModel, method: ElementId) -> Result<Self> {
        let m = model.method(method).ok_or_else(|| {
            Error::invalid_argument(format!("element {} is not a method", method))
        })?;
        let return_type = m.return_type.as_ref().ok_or_else(|| {
            Error::invalid_argument(format!("constructor '{}' cannot be overridden", m.name))
        })?;
        if !m.modifiers.is_overridable() {
            return Err(Error::invalid_argument(format!(
                "method '{}' is final, static or private",
                m.name
            )));
        }

        let visibility = if model.is_interface(m.declaring_type) {
            Modifiers::PUBLIC
        } else {
            m.modifiers & Modifiers::VISIBILITY
        };
        let return_type = JavaType::from(return_type);
        let mut generator = MethodGenerator::new(m.name.as_str())
            .with_modifiers(visibility)
            .with_annotation(Annotation::override_())
            .with_body(default_body(&return_type))
            .with_return_type(return_type);

        for &id in &m.type_parameters {
            if let Some(Element::TypeParameter(tp)) = model.element(id) {
                let param = tp
                    .bounds
                    .iter()
                    .fold(TypeParameterGenerator::new(tp.name.as_str()), |param, bound| {
                        param.with_bound(bound.into())
                    });
                generator = generator.with_type_parameter(param);
            }
        }
        for &id in &m.parameters {
            let p = model.parameter(id).ok_or_else(|| {
                Error::invalid_argument(format!("element {} is not a parameter", id))
            })?;
            let ty = JavaType::from(&p.data_type);
            let param = if p.varargs {
                ParameterGenerator::new(ty.component_type(), p.name.as_str()).as_varargs()
            } else {
                ParameterGenerator::new(ty, p.name.as_str())
            };
            generator = generator.with_parameter(param);
        }
        for exception in &m.exceptions {
            generator = generator.with_throws(exception.into());
        }
        Ok(generator)
    }
}

/// One skeleton override for every abstract method a concrete subclass of
/// `ty` would have to implement.
///
/// Supertypes are visited nearest first and the first declaration of a
/// signature decides: a concrete declaration shadows abstract ones further
/// up, and an abstract redeclaration hides an inherited implementation.
pub fn implement_abstract_methods(
    model: &dyn TypeModel,
    ty: ElementId,
) -> Result<Vec<MethodGenerator>> {
    if model.type_element(ty).is_none() {
        return Err(Error::invalid_argument(format!(
            "element {} is not a type in the model",
            ty
        )));
    }

    let mut seen: HashSet<(String, Vec<JavaType>)> = HashSet::new();
    let mut skeletons = Vec::new();
    for declaring in SuperTypes::new(model, ty, true, true, true) {
        for &id in model.methods(declaring) {
            let Some(method) = model.method(id) else {
                continue;
            };
            if method.is_constructor()
                || method
                    .modifiers
                    .intersects(Modifiers::STATIC | Modifiers::PRIVATE)
            {
                continue;
            }
            let key = (method.name.clone(), erased_signature(model, method));
            if seen.insert(key) && is_abstract(model, method) {
                skeletons.push(MethodGenerator::overriding(model, id)?);
            }
        }
    }
    tracing::debug!(
        "{} abstract methods to implement for {}",
        skeletons.len(),
        model.qualified_name(ty).unwrap_or("?")
    );
    Ok(skeletons)
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry, BuilderContext, Generator};
    use jforge_core::ApiVersion;
    use jforge_model::{DataType, MethodDecl, TypeDecl, TypeIndex};

    use super::*;

    fn emit(method: &MethodGenerator) -> String {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        method.emit(&mut ctx).unwrap()
    }

    /// `Shape { abstract double area(); String name() {..} final void f() }`
    /// and `Named { String name(); int rank(); default int weight() }`.
    fn model() -> (TypeIndex, ElementId, ElementId) {
        let mut index = TypeIndex::new();
        let named = index.add_type(TypeDecl::interface("geo.Named"));
        index.add_method(
            named,
            MethodDecl::new("name").returns(DataType::declared("java.lang.String")),
        );
        index.add_method(named, MethodDecl::new("rank").returns("int".parse().unwrap()));
        index.add_method(
            named,
            MethodDecl::new("weight")
                .modifiers(Modifiers::PUBLIC | Modifiers::DEFAULT)
                .returns("int".parse().unwrap()),
        );
        let shape = index.add_type(
            TypeDecl::class("geo.Shape")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .implements([named]),
        );
        index.add_method(
            shape,
            MethodDecl::new("area")
                .modifiers(Modifiers::PROTECTED | Modifiers::ABSTRACT)
                .returns("double".parse().unwrap()),
        );
        index.add_method(
            shape,
            MethodDecl::new("name").returns(DataType::declared("java.lang.String")),
        );
        index.add_method(
            shape,
            MethodDecl::new("f").modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        );
        let circle = index.add_type(TypeDecl::class("geo.Circle").extends(shape));
        (index, shape, circle)
    }

    #[test]
    fn test_implement_abstract_methods() {
        let (index, _, circle) = model();
        let skeletons = implement_abstract_methods(&index, circle).unwrap();
        let names: Vec<_> = skeletons.iter().filter_map(|m| m.name()).collect();
        assert_eq!(names, vec!["area", "rank"]);
        assert_eq!(
            emit(&skeletons[0]),
            "@Override\nprotected double area() {\n    return 0;\n}\n"
        );
        assert_eq!(
            emit(&skeletons[1]),
            "@Override\npublic int rank() {\n    return 0;\n}\n"
        );
    }

    #[test]
    fn test_override_if_necessary() {
        let (index, _, circle) = model();
        let candidates = super_methods(&index, circle).unwrap();

        let name = MethodGenerator::new("name")
            .with_return_type(JavaType::string())
            .with_override_if_necessary(&index, &candidates);
        assert!(name.has_annotation(OVERRIDE));

        let again = name.clone().with_override_if_necessary(&index, &candidates);
        assert_eq!(again.annotations().len(), 1);

        let overload = MethodGenerator::new("name")
            .with_return_type(JavaType::string())
            .with_parameter(ParameterGenerator::new(JavaType::int(), "n"))
            .with_override_if_necessary(&index, &candidates);
        assert!(!overload.has_annotation(OVERRIDE));

        let final_method = MethodGenerator::new("f")
            .with_return_type(JavaType::void())
            .with_override_if_necessary(&index, &candidates);
        assert!(!final_method.has_annotation(OVERRIDE));
    }

    #[test]
    fn test_overriding_varargs_and_generics() {
        let mut index = TypeIndex::new();
        let log = index.add_type(TypeDecl::interface("io.Log"));
        let method = index.add_method(
            log,
            MethodDecl::new("write")
                .type_parameter("T", vec![DataType::declared("java.lang.CharSequence")])
                .returns(DataType::variable("T"))
                .param("format", DataType::variable("T"))
                .varargs_param("args", DataType::declared("java.lang.Object").array(1))
                .throws(DataType::declared("java.io.IOException")),
        );
        let skeleton = MethodGenerator::overriding(&index, method).unwrap();
        assert!(skeleton.parameters()[1].is_varargs());
        assert_eq!(
            skeleton.parameters()[1].reference(false).unwrap(),
            JavaType::object().array(1)
        );
        assert_eq!(
            emit(&skeleton),
            "@Override\n\
             public <T extends CharSequence> T write(T format, Object... args) throws IOException {\n    \
             return null;\n\
             }\n"
        );
    }

    #[test]
    fn test_overriding_rejects_non_methods() {
        let (index, shape, _) = model();
        assert!(MethodGenerator::overriding(&index, shape).is_err());
        assert!(implement_abstract_methods(&index, ElementId::new(999)).is_err());
    }
}
