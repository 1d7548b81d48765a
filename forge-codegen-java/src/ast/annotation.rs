//! Java annotation builder.

use indexmap::IndexMap;
use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::Result;

use super::{Expr, JavaType};

pub(crate) const OVERRIDE: &str = "java.lang.Override";

/// The value of an annotation member.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Expr(Expr),
    Annotation(Annotation),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        match self {
            Self::Expr(expr) => expr.render(ctx),
            Self::Annotation(annotation) => annotation.render(ctx),
            Self::Array(values) => {
                let rendered = values
                    .iter()
                    .map(|v| v.render(ctx))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{{{}}}", rendered.join(", ")))
            }
        }
    }
}

impl From<Expr> for AnnotationValue {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<Annotation> for AnnotationValue {
    fn from(annotation: Annotation) -> Self {
        Self::Annotation(annotation)
    }
}

impl From<Vec<AnnotationValue>> for AnnotationValue {
    fn from(values: Vec<AnnotationValue>) -> Self {
        Self::Array(values)
    }
}

/// An annotation usage such as `@SuppressWarnings("unchecked")`.
///
/// Members keep insertion order; setting a member twice replaces its value
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    ty: JavaType,
    members: IndexMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(ty: JavaType) -> Self {
        Self {
            ty,
            members: IndexMap::new(),
        }
    }

    /// Annotation of a declared type by qualified name.
    pub fn of(qualified_name: impl Into<String>) -> Self {
        Self::new(JavaType::declared(qualified_name))
    }

    /// `@java.lang.Override`.
    pub fn override_() -> Self {
        Self::of(OVERRIDE)
    }

    pub fn with_value(self, value: impl Into<AnnotationValue>) -> Self {
        self.with_member("value", value)
    }

    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    pub fn without_member(mut self, name: &str) -> Self {
        self.members.shift_remove(name);
        self
    }

    pub fn ty(&self) -> &JavaType {
        &self.ty
    }

    pub fn member(&self, name: &str) -> Option<&AnnotationValue> {
        self.members.get(name)
    }

    /// Whether this annotation is of the declared type `qualified_name`.
    pub fn is(&self, qualified_name: &str) -> bool {
        self.ty.declared_name() == Some(qualified_name)
    }

    pub fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let name = self.ty.render(ctx)?;
        if self.members.is_empty() {
            return Ok(format!("@{}", name));
        }
        if let (1, Some(value)) = (self.members.len(), self.members.get("value")) {
            return Ok(format!("@{}({})", name, value.render(ctx)?));
        }
        let members = self
            .members
            .iter()
            .map(|(member, value)| Ok(format!("{} = {}", member, value.render(ctx)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("@{}({})", name, members.join(", ")))
    }
}

impl Generator for Annotation {
    fn describe(&self) -> String {
        format!("annotation {}", self.ty.describe().trim_start_matches("type "))
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(vec![CodeFragment::line(self.render(ctx)?)])
    }
}

/// Add `annotation` to `annotations`, replacing one of the same type.
pub(crate) fn put_annotation(annotations: &mut Vec<Annotation>, annotation: Annotation) {
    match annotations.iter_mut().find(|a| a.ty == annotation.ty) {
        Some(existing) => *existing = annotation,
        None => annotations.push(annotation),
    }
}

/// Render annotations for a declaration, one per line.
pub(crate) fn annotation_lines(
    annotations: &[Annotation],
    ctx: &mut BuilderContext<'_>,
) -> Result<Vec<CodeFragment>> {
    annotations
        .iter()
        .map(|a| Ok(CodeFragment::line(a.render(ctx)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry};
    use jforge_core::ApiVersion;

    use super::*;

    fn render(annotation: &Annotation) -> String {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        annotation.render(&mut ctx).unwrap()
    }

    #[test]
    fn test_marker() {
        assert_eq!(render(&Annotation::override_()), "@Override");
    }

    #[test]
    fn test_single_value_short_form() {
        let a = Annotation::of("java.lang.SuppressWarnings").with_value(Expr::string("unchecked"));
        assert_eq!(render(&a), "@SuppressWarnings(\"unchecked\")");
    }

    #[test]
    fn test_named_members_and_arrays() {
        let a = Annotation::of("javax.persistence.Table")
            .with_member("name", Expr::string("users"))
            .with_member(
                "indexes",
                vec![
                    Annotation::of("javax.persistence.Index")
                        .with_member("columnList", Expr::string("email"))
                        .into(),
                ],
            );
        assert_eq!(
            render(&a),
            "@Table(name = \"users\", indexes = {@Index(columnList = \"email\")})"
        );
    }

    #[test]
    fn test_value_with_other_members_uses_long_form() {
        let a = Annotation::of("com.acme.Retry")
            .with_value(Expr::int(3))
            .with_member("backoff", Expr::long(100));
        assert_eq!(render(&a), "@Retry(value = 3, backoff = 100L)");
    }

    #[test]
    fn test_member_replaced_in_place() {
        let a = Annotation::of("com.acme.Tag")
            .with_member("a", Expr::int(1))
            .with_member("b", Expr::int(2))
            .with_member("a", Expr::int(3));
        assert_eq!(render(&a), "@Tag(a = 3, b = 2)");
        assert_eq!(render(&a.without_member("a")), "@Tag(b = 2)");
    }

    #[test]
    fn test_put_annotation_replaces_same_type() {
        let mut annotations = vec![Annotation::of("com.acme.Tag").with_value(Expr::int(1))];
        put_annotation(&mut annotations, Annotation::override_());
        put_annotation(
            &mut annotations,
            Annotation::of("com.acme.Tag").with_value(Expr::int(2)),
        );
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].member("value"), Some(&Expr::int(2).into()));
    }
}
