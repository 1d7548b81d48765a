//! Java type references.

use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::Result;
use jforge_model::{BaseType, DataType, Primitive, WildcardBound};

/// Non-array part of a [`JavaType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Base {
    Primitive(Primitive),
    Declared {
        name: String,
        arguments: Vec<JavaType>,
    },
    /// Declared type whose qualified name is resolved through the API
    /// registry at emission time.
    Api {
        capability: String,
        arguments: Vec<JavaType>,
    },
    Variable(String),
    Wildcard(Option<Bound>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Bound {
    Extends(Box<JavaType>),
    Super(Box<JavaType>),
}

/// A type reference in generated code.
///
/// Declared names are kept qualified; the short or qualified form is decided
/// by the [`BuilderContext`] when the reference is rendered.
///
/// ```
/// use jforge_codegen::{ApiEnvironment, ApiRegistry, BuilderContext};
/// use jforge_codegen_java::JavaType;
/// use jforge_core::ApiVersion;
///
/// let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
/// let mut ctx = BuilderContext::new(&env);
/// let ty = JavaType::declared("java.util.Map")
///     .with_argument(JavaType::string())
///     .with_argument(JavaType::variable("V"))
///     .with_added_dimension();
/// assert_eq!(ty.render(&mut ctx).unwrap(), "Map<String, V>[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaType {
    base: Base,
    dimensions: u8,
}

impl JavaType {
    fn of(base: Base) -> Self {
        Self {
            base,
            dimensions: 0,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::of(Base::Primitive(primitive))
    }

    pub fn void() -> Self {
        Self::primitive(Primitive::Void)
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn int() -> Self {
        Self::primitive(Primitive::Int)
    }

    pub fn long() -> Self {
        Self::primitive(Primitive::Long)
    }

    /// A class or interface by qualified name.
    pub fn declared(name: impl Into<String>) -> Self {
        Self::of(Base::Declared {
            name: name.into(),
            arguments: Vec::new(),
        })
    }

    pub fn object() -> Self {
        Self::declared("java.lang.Object")
    }

    pub fn string() -> Self {
        Self::declared("java.lang.String")
    }

    /// A declared type whose name is looked up by capability in the
    /// context's [`ApiEnvironment`](jforge_codegen::ApiEnvironment).
    pub fn api(capability: impl Into<String>) -> Self {
        Self::of(Base::Api {
            capability: capability.into(),
            arguments: Vec::new(),
        })
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::of(Base::Variable(name.into()))
    }

    /// Unbounded wildcard `?`.
    pub fn wildcard() -> Self {
        Self::of(Base::Wildcard(None))
    }

    /// `? extends bound`.
    pub fn extends_wildcard(bound: JavaType) -> Self {
        Self::of(Base::Wildcard(Some(Bound::Extends(Box::new(bound)))))
    }

    /// `? super bound`.
    pub fn super_wildcard(bound: JavaType) -> Self {
        Self::of(Base::Wildcard(Some(Bound::Super(Box::new(bound)))))
    }

    /// Append a type argument. Ignored for types that cannot take arguments.
    pub fn with_argument(mut self, argument: JavaType) -> Self {
        match &mut self.base {
            Base::Declared { arguments, .. } | Base::Api { arguments, .. } => {
                arguments.push(argument)
            }
            _ => tracing::debug!("ignoring type argument {:?} on a non-generic type", argument),
        }
        self
    }

    pub fn with_arguments(self, arguments: impl IntoIterator<Item = JavaType>) -> Self {
        arguments.into_iter().fold(self, Self::with_argument)
    }

    /// Same type with `dimensions` more array dimensions.
    pub fn array(mut self, dimensions: u8) -> Self {
        self.dimensions = self.dimensions.saturating_add(dimensions);
        self
    }

    /// Same type with exactly one more array dimension.
    pub fn with_added_dimension(self) -> Self {
        self.array(1)
    }

    /// Same type with one array dimension less; no-op on non-arrays.
    pub fn component_type(mut self) -> Self {
        self.dimensions = self.dimensions.saturating_sub(1);
        self
    }

    pub fn dimensions(&self) -> u8 {
        self.dimensions
    }

    pub fn is_void(&self) -> bool {
        self.dimensions == 0 && matches!(self.base, Base::Primitive(Primitive::Void))
    }

    pub fn is_primitive(&self) -> bool {
        self.dimensions == 0 && matches!(self.base, Base::Primitive(_))
    }

    /// The primitive kind, if this is a non-array primitive.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.base {
            Base::Primitive(p) if self.dimensions == 0 => Some(p),
            _ => None,
        }
    }

    /// Qualified name of a declared type (`None` for API-resolved types).
    pub fn declared_name(&self) -> Option<&str> {
        match &self.base {
            Base::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The type without type arguments; type variables and wildcards erase
    /// to `java.lang.Object`.
    pub fn erasure(&self) -> JavaType {
        let base = match &self.base {
            Base::Declared { name, .. } => Base::Declared {
                name: name.clone(),
                arguments: Vec::new(),
            },
            Base::Api { capability, .. } => Base::Api {
                capability: capability.clone(),
                arguments: Vec::new(),
            },
            Base::Variable(_) | Base::Wildcard(_) => Base::Declared {
                name: "java.lang.Object".to_string(),
                arguments: Vec::new(),
            },
            Base::Primitive(p) => Base::Primitive(*p),
        };
        JavaType {
            base,
            dimensions: self.dimensions,
        }
    }

    /// Render the reference, resolving declared names through `ctx`.
    pub fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let mut out = match &self.base {
            Base::Primitive(p) => p.as_str().to_string(),
            Base::Declared { name, arguments } => {
                let name = ctx.resolve_reference(name);
                name + &render_arguments(arguments, ctx)?
            }
            Base::Api {
                capability,
                arguments,
            } => {
                let qualified = ctx.resolve_api(capability)?;
                let name = ctx.resolve_reference(&qualified);
                name + &render_arguments(arguments, ctx)?
            }
            Base::Variable(name) => name.clone(),
            Base::Wildcard(None) => "?".to_string(),
            Base::Wildcard(Some(Bound::Extends(bound))) => {
                format!("? extends {}", bound.render(ctx)?)
            }
            Base::Wildcard(Some(Bound::Super(bound))) => {
                format!("? super {}", bound.render(ctx)?)
            }
        };
        for _ in 0..self.dimensions {
            out.push_str("[]");
        }
        Ok(out)
    }
}

fn render_arguments(arguments: &[JavaType], ctx: &mut BuilderContext<'_>) -> Result<String> {
    if arguments.is_empty() {
        return Ok(String::new());
    }
    let rendered = arguments
        .iter()
        .map(|arg| arg.render(ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("<{}>", rendered.join(", ")))
}

impl From<&DataType> for JavaType {
    fn from(data_type: &DataType) -> Self {
        let base = match &data_type.base {
            BaseType::Primitive(p) => Base::Primitive(*p),
            BaseType::Declared { name, arguments } => Base::Declared {
                name: name.clone(),
                arguments: arguments.iter().map(JavaType::from).collect(),
            },
            BaseType::Variable(name) => Base::Variable(name.clone()),
            BaseType::Wildcard(None) => Base::Wildcard(None),
            BaseType::Wildcard(Some(WildcardBound::Extends(bound))) => {
                Base::Wildcard(Some(Bound::Extends(Box::new(bound.as_ref().into()))))
            }
            BaseType::Wildcard(Some(WildcardBound::Super(bound))) => {
                Base::Wildcard(Some(Bound::Super(Box::new(bound.as_ref().into()))))
            }
        };
        JavaType {
            base,
            dimensions: data_type.dimensions,
        }
    }
}

impl From<DataType> for JavaType {
    fn from(data_type: DataType) -> Self {
        JavaType::from(&data_type)
    }
}

impl From<Primitive> for JavaType {
    fn from(primitive: Primitive) -> Self {
        JavaType::primitive(primitive)
    }
}

impl Generator for JavaType {
    fn describe(&self) -> String {
        match &self.base {
            Base::Primitive(p) => format!("type {}", p.as_str()),
            Base::Declared { name, .. } => format!("type {}", name),
            Base::Api { capability, .. } => format!("type api:{}", capability),
            Base::Variable(name) => format!("type variable {}", name),
            Base::Wildcard(_) => "wildcard".to_string(),
        }
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(vec![CodeFragment::raw(self.render(ctx)?)])
    }
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiFunction, ApiRegistry};
    use jforge_core::{ApiVersion, Error};

    use super::*;

    fn env() -> ApiEnvironment {
        let registry = ApiRegistry::new().with(
            ApiFunction::new("nullable")
                .with_default_value("javax.annotation.Nullable".to_string())
                .since_value(
                    ApiVersion::new(2, 0, 0),
                    "org.jspecify.annotations.Nullable".to_string(),
                ),
        );
        ApiEnvironment::new(ApiVersion::new(2, 1, 0), registry)
    }

    #[test]
    fn test_render_primitives_and_arrays() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        assert_eq!(JavaType::int().render(&mut ctx).unwrap(), "int");
        assert_eq!(JavaType::void().render(&mut ctx).unwrap(), "void");
        assert_eq!(
            JavaType::long().array(2).render(&mut ctx).unwrap(),
            "long[][]"
        );
        assert!(ctx.claimed_imports().is_empty());
    }

    #[test]
    fn test_render_conflicting_simple_names() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let ty = JavaType::declared("java.util.Map")
            .with_argument(JavaType::declared("java.util.List").with_argument(JavaType::string()))
            .with_argument(JavaType::declared("java.awt.List"));
        assert_eq!(
            ty.render(&mut ctx).unwrap(),
            "Map<List<String>, java.awt.List>"
        );
        let claimed: Vec<_> = ctx.claimed_imports().iter().cloned().collect();
        assert_eq!(
            claimed,
            vec!["java.lang.String", "java.util.List", "java.util.Map"]
        );
    }

    #[test]
    fn test_render_wildcards() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let ty = JavaType::declared("java.util.Comparator")
            .with_argument(JavaType::super_wildcard(JavaType::variable("T")));
        assert_eq!(ty.render(&mut ctx).unwrap(), "Comparator<? super T>");
        let ty = JavaType::declared("java.util.List")
            .with_argument(JavaType::extends_wildcard(JavaType::declared(
                "java.lang.Number",
            )))
            .with_argument(JavaType::wildcard());
        assert_eq!(ty.render(&mut ctx).unwrap(), "List<? extends Number, ?>");
    }

    #[test]
    fn test_render_api_type() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        assert_eq!(
            JavaType::api("nullable").render(&mut ctx).unwrap(),
            "Nullable"
        );
        assert!(
            ctx.claimed_imports()
                .contains("org.jspecify.annotations.Nullable")
        );

        let err = JavaType::api("missing").render(&mut ctx).unwrap_err();
        assert!(matches!(*err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_erasure() {
        let ty = JavaType::declared("java.util.List")
            .with_argument(JavaType::variable("T"))
            .array(1);
        assert_eq!(ty.erasure(), JavaType::declared("java.util.List").array(1));
        assert_eq!(JavaType::variable("T").erasure(), JavaType::object());
        assert_eq!(JavaType::int().erasure(), JavaType::int());
    }

    #[test]
    fn test_from_data_type() {
        let data_type: DataType = "java.util.Map<java.lang.String, ? extends T>[]"
            .parse()
            .unwrap();
        let expected = JavaType::declared("java.util.Map")
            .with_argument(JavaType::string())
            .with_argument(JavaType::extends_wildcard(JavaType::variable("T")))
            .with_added_dimension();
        assert_eq!(JavaType::from(&data_type), expected);
    }

    #[test]
    fn test_added_dimension() {
        let ty = JavaType::string().array(2).with_added_dimension();
        assert_eq!(ty.dimensions(), 3);
        assert_eq!(ty.component_type().dimensions(), 2);
    }

    #[test]
    fn test_argument_on_primitive_is_ignored() {
        assert_eq!(
            JavaType::int().with_argument(JavaType::string()),
            JavaType::int()
        );
    }
}
