//! Java method and constructor builder.

use indexmap::IndexSet;
use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::{Error, Result};
use jforge_model::Modifiers;

use super::{
    Annotation, JavaType, ParameterGenerator, Statement, TypeParameterGenerator,
    annotation::{annotation_lines, put_annotation},
    params::render_type_parameters,
    statement::statement_fragments,
};

/// Builder for Java methods and constructors.
///
/// Every slot has a `with_x` / `without_x` pair. Emission order is fixed:
/// Javadoc, annotations, modifiers, type parameters, return type, name,
/// parameter list, throws clause, body. A method without a body ends in `;`.
///
/// ```
/// use jforge_codegen::{ApiEnvironment, ApiRegistry, BuilderContext, Generator};
/// use jforge_codegen_java::{Expr, JavaType, MethodGenerator, ParameterGenerator, Statement};
/// use jforge_core::ApiVersion;
///
/// let env = ApiEnvironment::new(ApiVersion::new(17, 0, 0), ApiRegistry::new());
/// let mut ctx = BuilderContext::new(&env);
/// let method = MethodGenerator::new("greet")
///     .with_return_type(JavaType::string())
///     .with_parameter(ParameterGenerator::new(JavaType::string(), "name"))
///     .with_statement(Statement::return_(Expr::binary(
///         Expr::string("Hello, "),
///         "+",
///         Expr::name("name"),
///     )));
/// assert_eq!(
///     method.emit(&mut ctx).unwrap(),
///     "public String greet(String name) {\n    return \"Hello, \" + name;\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodGenerator {
    javadoc: Option<String>,
    annotations: Vec<Annotation>,
    modifiers: Modifiers,
    type_parameters: Vec<TypeParameterGenerator>,
    return_type: Option<JavaType>,
    constructor: bool,
    name: Option<String>,
    parameters: Vec<ParameterGenerator>,
    throws: IndexSet<JavaType>,
    body: Option<Vec<Statement>>,
}

impl MethodGenerator {
    /// A public method with an empty body and no return type set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::PUBLIC,
            name: Some(name.into()),
            body: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// A public constructor; `type_name` is the simple name of the class.
    pub fn constructor(type_name: impl Into<String>) -> Self {
        Self {
            constructor: true,
            ..Self::new(type_name)
        }
    }

    // =========================================================================
    // Documentation and annotations
    // =========================================================================

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn without_javadoc(mut self) -> Self {
        self.javadoc = None;
        self
    }

    /// Add an annotation, replacing an existing one of the same type.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        put_annotation(&mut self.annotations, annotation);
        self
    }

    pub fn without_annotation(mut self, ty: &JavaType) -> Self {
        self.annotations.retain(|a| a.ty() != ty);
        self
    }

    pub fn without_annotations(mut self) -> Self {
        self.annotations.clear();
        self
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    pub fn as_public(self) -> Self {
        self.with_visibility(Modifiers::PUBLIC)
    }

    pub fn as_protected(self) -> Self {
        self.with_visibility(Modifiers::PROTECTED)
    }

    pub fn as_private(self) -> Self {
        self.with_visibility(Modifiers::PRIVATE)
    }

    pub fn as_package_private(self) -> Self {
        self.with_visibility(Modifiers::empty())
    }

    fn with_visibility(mut self, visibility: Modifiers) -> Self {
        self.modifiers = self.modifiers.with_visibility(visibility);
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

    /// Mark abstract and drop the body.
    pub fn as_abstract(mut self) -> Self {
        self.modifiers |= Modifiers::ABSTRACT;
        self.body = None;
        self
    }

    pub fn not_abstract(mut self) -> Self {
        self.modifiers -= Modifiers::ABSTRACT;
        self
    }

    /// Interface default method.
    pub fn as_default(mut self) -> Self {
        self.modifiers |= Modifiers::DEFAULT;
        self
    }

    pub fn not_default(mut self) -> Self {
        self.modifiers -= Modifiers::DEFAULT;
        self
    }

    pub fn as_synchronized(mut self) -> Self {
        self.modifiers |= Modifiers::SYNCHRONIZED;
        self
    }

    pub fn not_synchronized(mut self) -> Self {
        self.modifiers -= Modifiers::SYNCHRONIZED;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    // =========================================================================
    // Signature
    // =========================================================================

    pub fn with_type_parameter(mut self, type_parameter: TypeParameterGenerator) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn without_type_parameters(mut self) -> Self {
        self.type_parameters.clear();
        self
    }

    pub fn with_return_type(mut self, return_type: JavaType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn without_return_type(mut self) -> Self {
        self.return_type = None;
        self
    }

    pub fn as_constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    pub fn not_constructor(mut self) -> Self {
        self.constructor = false;
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

    /// Add a parameter; one with the same name is replaced in place.
    pub fn with_parameter(mut self, parameter: ParameterGenerator) -> Self {
        let existing = parameter
            .name()
            .and_then(|name| self.parameters.iter().position(|p| p.name() == Some(name)));
        match existing {
            Some(index) => self.parameters[index] = parameter,
            None => self.parameters.push(parameter),
        }
        self
    }

    pub fn without_parameter(mut self, name: &str) -> Self {
        self.parameters.retain(|p| p.name() != Some(name));
        self
    }

    pub fn without_parameters(mut self) -> Self {
        self.parameters.clear();
        self
    }

    /// Add a thrown type; duplicates are ignored.
    pub fn with_throws(mut self, ty: JavaType) -> Self {
        self.throws.insert(ty);
        self
    }

    pub fn without_throws(mut self, ty: &JavaType) -> Self {
        self.throws.shift_remove(ty);
        self
    }

    // =========================================================================
    // Body
    // =========================================================================

    pub fn with_body(mut self, statements: Vec<Statement>) -> Self {
        self.body = Some(statements);
        self
    }

    /// Append a statement, creating the body if absent.
    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.body.get_or_insert_with(Vec::new).push(statement);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations.iter().any(|a| a.is(qualified_name))
    }

    pub fn return_type(&self) -> Option<&JavaType> {
        self.return_type.as_ref()
    }

    pub fn is_constructor(&self) -> bool {
        self.constructor
    }

    pub fn parameters(&self) -> &[ParameterGenerator] {
        &self.parameters
    }

    pub fn throws(&self) -> impl Iterator<Item = &JavaType> {
        self.throws.iter()
    }

    pub fn body(&self) -> Option<&[Statement]> {
        self.body.as_deref()
    }

    /// Erased parameter types, used to match signatures.
    pub fn erased_parameter_types(&self) -> Result<Vec<JavaType>> {
        self.parameters.iter().map(|p| p.reference(true)).collect()
    }

    fn signature(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| Error::generation("name", self.describe()))?;
        if let Some(position) = self.parameters.iter().position(|p| p.is_varargs())
            && position + 1 != self.parameters.len()
        {
            let param = self.parameters[position].name().unwrap_or("<unnamed>");
            return Err(Error::invalid_generator(
                self.describe(),
                format!("varargs parameter '{}' is not the last parameter", param),
            ));
        }
        if self.modifiers.contains(Modifiers::ABSTRACT) && self.body.is_some() {
            return Err(Error::invalid_generator(
                self.describe(),
                "an abstract method cannot declare a body",
            ));
        }

        let mut out = self.modifiers.to_string();
        if !out.is_empty() {
            out.push(' ');
        }
        let type_parameters = render_type_parameters(&self.type_parameters, ctx)?;
        if !type_parameters.is_empty() {
            out.push_str(&type_parameters);
            out.push(' ');
        }
        if !self.constructor {
            let return_type = self
                .return_type
                .as_ref()
                .ok_or_else(|| Error::generation("return type", self.describe()))?;
            out.push_str(&return_type.render(ctx)?);
            out.push(' ');
        }
        let params = self
            .parameters
            .iter()
            .map(|p| p.render(ctx))
            .collect::<Result<Vec<_>>>()?;
        out.push_str(&format!("{}({})", name, params.join(", ")));
        if !self.throws.is_empty() {
            let throws = self
                .throws
                .iter()
                .map(|t| t.render(ctx))
                .collect::<Result<Vec<_>>>()?;
            out.push_str(" throws ");
            out.push_str(&throws.join(", "));
        }
        Ok(out)
    }
}

impl Generator for MethodGenerator {
    fn describe(&self) -> String {
        let kind = if self.constructor { "constructor" } else { "method" };
        format!("{} {}", kind, self.name.as_deref().unwrap_or("<unnamed>"))
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.javadoc {
            fragments.push(CodeFragment::javadoc(doc));
        }
        fragments.extend(annotation_lines(&self.annotations, ctx)?);
        let type_variables = self.type_parameters.iter().map(|p| p.name().to_string());
        let declaration = ctx.with_type_variables(type_variables, |ctx| -> Result<_> {
            let signature = self.signature(ctx)?;
            Ok(match &self.body {
                None => CodeFragment::line(format!("{};", signature)),
                Some(body) => CodeFragment::braced(signature, statement_fragments(body, ctx)?),
            })
        })?;
        fragments.push(declaration);
        Ok(fragments)
    }
}
