//! Java field builder and bean accessors.

use jforge_codegen::{BuilderContext, CodeFragment, Generator, NamingConvention};
use jforge_core::{Error, Result, capitalize};
use jforge_model::{Modifiers, Primitive};

use super::{
    Annotation, Expr, JavaType, MethodGenerator, ParameterGenerator, Statement,
    annotation::{annotation_lines, put_annotation},
};

/// Builder for Java fields. New fields are `private`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldGenerator {
    javadoc: Option<String>,
    annotations: Vec<Annotation>,
    modifiers: Modifiers,
    data_type: Option<JavaType>,
    name: Option<String>,
    initializer: Option<Expr>,
}

impl FieldGenerator {
    pub fn new(data_type: JavaType, name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::PRIVATE,
            data_type: Some(data_type),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn without_javadoc(mut self) -> Self {
        self.javadoc = None;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        put_annotation(&mut self.annotations, annotation);
        self
    }

    pub fn without_annotations(mut self) -> Self {
        self.annotations.clear();
        self
    }

    pub fn as_public(mut self) -> Self {
        self.modifiers = self.modifiers.with_visibility(Modifiers::PUBLIC);
        self
    }

    pub fn as_protected(mut self) -> Self {
        self.modifiers = self.modifiers.with_visibility(Modifiers::PROTECTED);
        self
    }

    pub fn as_private(mut self) -> Self {
        self.modifiers = self.modifiers.with_visibility(Modifiers::PRIVATE);
        self
    }

    pub fn as_package_private(mut self) -> Self {
        self.modifiers = self.modifiers.with_visibility(Modifiers::empty());
        self
    }

    pub fn as_final(mut self) -> Self {
        self.modifiers |= Modifiers::FINAL;
        self
    }

    pub fn not_final(mut self) -> Self {
        self.modifiers -= Modifiers::FINAL;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.modifiers |= Modifiers::STATIC;
        self
    }

    pub fn not_static(mut self) -> Self {
        self.modifiers -= Modifiers::STATIC;
        self
    }

    pub fn as_transient(mut self) -> Self {
        self.modifiers |= Modifiers::TRANSIENT;
        self
    }

    pub fn as_volatile(mut self) -> Self {
        self.modifiers |= Modifiers::VOLATILE;
        self
    }

    pub fn with_data_type(mut self, data_type: JavaType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn without_data_type(mut self) -> Self {
        self.data_type = None;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn without_initializer(mut self) -> Self {
        self.initializer = None;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> Option<&JavaType> {
        self.data_type.as_ref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn required(&self) -> Result<(&str, &JavaType)> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| Error::generation("name", self.describe()))?;
        let data_type = self
            .data_type
            .as_ref()
            .ok_or_else(|| Error::generation("data type", self.describe()))?;
        Ok((name, data_type))
    }

    /// Bean getter: `isX` for `boolean` fields, `getX` otherwise.
    pub fn getter(&self) -> Result<MethodGenerator> {
        let (name, data_type) = self.required()?;
        let prefix = match data_type.as_primitive() {
            Some(Primitive::Boolean) => "is",
            _ => "get",
        };
        let method = MethodGenerator::new(format!("{}{}", prefix, capitalize(name)))
            .with_return_type(data_type.clone())
            .with_statement(Statement::return_(self.access()));
        Ok(if self.modifiers.contains(Modifiers::STATIC) {
            method.as_static()
        } else {
            method
        })
    }

    /// Bean setter `setX(x)`. Final fields have no setter.
    pub fn setter(&self) -> Result<MethodGenerator> {
        let (name, data_type) = self.required()?;
        if self.modifiers.contains(Modifiers::FINAL) {
            return Err(Error::invalid_generator(
                self.describe(),
                "a final field has no setter",
            ));
        }
        let is_static = self.modifiers.contains(Modifiers::STATIC);
        // A static field is not reachable through `this`; keep the
        // parameter from shadowing it.
        let param = if is_static {
            format!("new{}", capitalize(name))
        } else {
            NamingConvention::JAVA.safe_name(name)
        };
        let assignment = Expr::binary(self.access(), "=", Expr::name(param.as_str()));
        let method = MethodGenerator::new(format!("set{}", capitalize(name)))
            .with_return_type(JavaType::void())
            .with_parameter(ParameterGenerator::new(data_type.clone(), param))
            .with_statement(Statement::expr(assignment));
        Ok(if is_static {
            method.as_static()
        } else {
            method
        })
    }

    /// `this.name`, or the bare name for static fields.
    fn access(&self) -> Expr {
        let name = self.name.clone().unwrap_or_default();
        if self.modifiers.contains(Modifiers::STATIC) {
            Expr::name(name)
        } else {
            Expr::this().field(name)
        }
    }
}

impl Generator for FieldGenerator {
    fn describe(&self) -> String {
        format!("field {}", self.name.as_deref().unwrap_or("<unnamed>"))
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        let (name, data_type) = self.required()?;
        let mut fragments = Vec::new();
        if let Some(doc) = &self.javadoc {
            fragments.push(CodeFragment::javadoc(doc));
        }
        fragments.extend(annotation_lines(&self.annotations, ctx)?);

        let mut line = self.modifiers.to_string();
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("{} {}", data_type.render(ctx)?, name));
        if let Some(init) = &self.initializer {
            line.push_str(&format!(" = {}", init.render(ctx)?));
        }
        line.push(';');
        fragments.push(CodeFragment::line(line));
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry};
    use jforge_core::ApiVersion;

    use super::*;

    fn emit(node: &impl Generator) -> String {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        node.emit(&mut ctx).unwrap()
    }

    #[test]
    fn test_field_emission() {
        let field = FieldGenerator::new(
            JavaType::declared("java.util.List").with_argument(JavaType::string()),
            "names",
        )
        .as_final()
        .with_initializer(Expr::new_instance(
            JavaType::declared("java.util.ArrayList"),
            vec![],
        ));
        assert_eq!(
            emit(&field),
            "private final List<String> names = new ArrayList();\n"
        );
    }

    #[test]
    fn test_constant() {
        let field = FieldGenerator::new(JavaType::long(), "serialVersionUID")
            .as_static()
            .as_final()
            .with_annotation(Annotation::of("java.io.Serial"))
            .with_initializer(Expr::long(1));
        assert_eq!(
            emit(&field),
            "@Serial\nprivate static final long serialVersionUID = 1L;\n"
        );
    }

    #[test]
    fn test_getter() {
        let getter = FieldGenerator::new(JavaType::string(), "name").getter().unwrap();
        assert_eq!(
            emit(&getter),
            "public String getName() {\n    return this.name;\n}\n"
        );
        let getter = FieldGenerator::new(JavaType::boolean(), "active")
            .getter()
            .unwrap();
        assert_eq!(getter.name(), Some("isActive"));
    }

    #[test]
    fn test_setter() {
        let setter = FieldGenerator::new(JavaType::int(), "count").setter().unwrap();
        assert_eq!(
            emit(&setter),
            "public void setCount(int count) {\n    this.count = count;\n}\n"
        );
        let setter = FieldGenerator::new(JavaType::int(), "total")
            .as_static()
            .setter()
            .unwrap();
        assert_eq!(
            emit(&setter),
            "public static void setTotal(int newTotal) {\n    total = newTotal;\n}\n"
        );
    }

    #[test]
    fn test_final_field_has_no_setter() {
        let err = FieldGenerator::new(JavaType::int(), "id")
            .as_final()
            .setter()
            .unwrap_err();
        assert!(matches!(*err, Error::Generation { .. }));
    }

    #[test]
    fn test_missing_data_type() {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        let err = FieldGenerator::default()
            .with_name("id")
            .emit(&mut ctx)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot emit field id: required slot 'data type' is not set"
        );
    }
}
