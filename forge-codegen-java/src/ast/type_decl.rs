//! Class, interface and enum declarations.

use indexmap::IndexSet;
use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::{Error, Result};
use jforge_model::{Modifiers, TypeKind};

use super::{
    Annotation, Expr, FieldGenerator, JavaType, MethodGenerator, TypeParameterGenerator,
    annotation::{annotation_lines, put_annotation},
    params::render_type_parameters,
};

/// An enum constant with optional constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    name: String,
    args: Vec<Expr>,
}

impl EnumConstant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: Expr) -> Self {
        self.args.push(arg);
        self
    }

    fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        if self.args.is_empty() {
            return Ok(self.name.clone());
        }
        let args = self
            .args
            .iter()
            .map(|a| a.render(ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{}({})", self.name, args.join(", ")))
    }
}

/// A member of a type body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldGenerator),
    Method(MethodGenerator),
    Type(Box<TypeGenerator>),
}

impl Member {
    fn as_generator(&self) -> &dyn Generator {
        match self {
            Self::Field(field) => field,
            Self::Method(method) => method,
            Self::Type(ty) => ty.as_ref(),
        }
    }
}

/// Builder for class, interface and enum declarations.
///
/// Members are emitted in insertion order, separated by blank lines. For
/// enums the constants come first.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGenerator {
    kind: TypeKind,
    javadoc: Option<String>,
    annotations: Vec<Annotation>,
    modifiers: Modifiers,
    name: Option<String>,
    type_parameters: Vec<TypeParameterGenerator>,
    superclass: Option<JavaType>,
    interfaces: IndexSet<JavaType>,
    enum_constants: Vec<EnumConstant>,
    members: Vec<Member>,
}

impl TypeGenerator {
    /// A public declaration of the given kind.
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty(kind)
        }
    }

    /// A public declaration with no name set.
    pub fn empty(kind: TypeKind) -> Self {
        Self {
            kind,
            javadoc: None,
            annotations: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            name: None,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: IndexSet::new(),
            enum_constants: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
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

    pub fn as_abstract(mut self) -> Self {
        self.modifiers |= Modifiers::ABSTRACT;
        self
    }

    pub fn not_abstract(mut self) -> Self {
        self.modifiers -= Modifiers::ABSTRACT;
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

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn with_type_parameter(mut self, type_parameter: TypeParameterGenerator) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn without_type_parameters(mut self) -> Self {
        self.type_parameters.clear();
        self
    }

    pub fn with_superclass(mut self, superclass: JavaType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn without_superclass(mut self) -> Self {
        self.superclass = None;
        self
    }

    /// Add an implemented (for interfaces: extended) interface; duplicates
    /// are ignored.
    pub fn with_interface(mut self, interface: JavaType) -> Self {
        self.interfaces.insert(interface);
        self
    }

    pub fn without_interface(mut self, interface: &JavaType) -> Self {
        self.interfaces.shift_remove(interface);
        self
    }

    pub fn with_enum_constant(mut self, constant: EnumConstant) -> Self {
        self.enum_constants.push(constant);
        self
    }

    pub fn with_field(mut self, field: FieldGenerator) -> Self {
        self.members.push(Member::Field(field));
        self
    }

    pub fn with_method(mut self, method: MethodGenerator) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    pub fn with_methods(self, methods: impl IntoIterator<Item = MethodGenerator>) -> Self {
        methods.into_iter().fold(self, Self::with_method)
    }

    pub fn with_inner_type(mut self, inner: TypeGenerator) -> Self {
        self.members.push(Member::Type(Box::new(inner)));
        self
    }

    pub fn without_members(mut self) -> Self {
        self.members.clear();
        self
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Directly nested type declarations.
    pub fn inner_types(&self) -> impl Iterator<Item = &TypeGenerator> {
        self.members.iter().filter_map(|m| match m {
            Member::Type(ty) => Some(ty.as_ref()),
            _ => None,
        })
    }

    fn header(&self, name: &str, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let mut out = self.modifiers.to_string();
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(self.kind.keyword());
        out.push(' ');
        out.push_str(name);
        out.push_str(&render_type_parameters(&self.type_parameters, ctx)?);

        if let Some(superclass) = &self.superclass {
            if self.kind != TypeKind::Class {
                return Err(Error::invalid_generator(
                    self.describe(),
                    format!("only classes declare a superclass, not a {}", self.kind.keyword()),
                ));
            }
            out.push_str(" extends ");
            out.push_str(&superclass.render(ctx)?);
        }
        if !self.interfaces.is_empty() {
            let interfaces = self
                .interfaces
                .iter()
                .map(|i| i.render(ctx))
                .collect::<Result<Vec<_>>>()?;
            let keyword = if self.kind.is_interface() {
                "extends"
            } else {
                "implements"
            };
            out.push_str(&format!(" {} {}", keyword, interfaces.join(", ")));
        }
        Ok(out)
    }

    fn declaration(&self, name: &str, ctx: &mut BuilderContext<'_>) -> Result<CodeFragment> {
        let header = self.header(name, ctx)?;

        let mut body = Vec::new();
        if let Some((last, rest)) = self.enum_constants.split_last() {
            for constant in rest {
                body.push(CodeFragment::line(format!("{},", constant.render(ctx)?)));
            }
            let terminator = if self.members.is_empty() { "" } else { ";" };
            body.push(CodeFragment::line(format!(
                "{}{}",
                last.render(ctx)?,
                terminator
            )));
        }
        for member in &self.members {
            if !body.is_empty() {
                body.push(CodeFragment::blank());
            }
            body.extend(member.as_generator().to_fragments(ctx)?);
        }
        Ok(CodeFragment::braced(header, body))
    }
}

impl Generator for TypeGenerator {
    fn describe(&self) -> String {
        format!(
            "{} {}",
            self.kind.keyword(),
            self.name.as_deref().unwrap_or("<unnamed>")
        )
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| Error::generation("name", self.describe()))?;
        if !self.enum_constants.is_empty() && self.kind != TypeKind::Enum {
            return Err(Error::invalid_generator(
                self.describe(),
                "only enums declare enum constants",
            ));
        }

        let mut fragments = Vec::new();
        if let Some(doc) = &self.javadoc {
            fragments.push(CodeFragment::javadoc(doc));
        }
        fragments.extend(annotation_lines(&self.annotations, ctx)?);
        let type_variables = self.type_parameters.iter().map(|p| p.name().to_string());
        let declaration =
            ctx.with_type_variables(type_variables, |ctx| self.declaration(name, ctx))?;
        fragments.push(declaration);
        Ok(fragments)
    }
}
