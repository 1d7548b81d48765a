//! Method parameters and type parameters.

use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::{Error, Result};

use super::{Annotation, JavaType, annotation::put_annotation};

/// A method or constructor parameter.
///
/// For a varargs parameter the data type is the element type as written
/// before `...`; [`reference`](Self::reference) gives the actual parameter
/// type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterGenerator {
    annotations: Vec<Annotation>,
    is_final: bool,
    varargs: bool,
    data_type: Option<JavaType>,
    name: Option<String>,
}

impl ParameterGenerator {
    pub fn new(data_type: JavaType, name: impl Into<String>) -> Self {
        Self {
            data_type: Some(data_type),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        put_annotation(&mut self.annotations, annotation);
        self
    }

    pub fn without_annotations(mut self) -> Self {
        self.annotations.clear();
        self
    }

    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn not_final(mut self) -> Self {
        self.is_final = false;
        self
    }

    pub fn as_varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn not_varargs(mut self) -> Self {
        self.varargs = false;
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

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> Option<&JavaType> {
        self.data_type.as_ref()
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    /// The type of the parameter as seen by the method body; varargs add
    /// exactly one array dimension.
    pub fn reference(&self, erasure: bool) -> Result<JavaType> {
        let data_type = self
            .data_type
            .as_ref()
            .ok_or_else(|| Error::generation("data type", self.describe()))?;
        let ty = if erasure {
            data_type.erasure()
        } else {
            data_type.clone()
        };
        Ok(if self.varargs {
            ty.with_added_dimension()
        } else {
            ty
        })
    }

    pub fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| Error::generation("name", self.describe()))?;
        let data_type = self
            .data_type
            .as_ref()
            .ok_or_else(|| Error::generation("data type", self.describe()))?;

        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(&annotation.render(ctx)?);
            out.push(' ');
        }
        if self.is_final {
            out.push_str("final ");
        }
        out.push_str(&data_type.render(ctx)?);
        if self.varargs {
            out.push_str("...");
        }
        out.push(' ');
        out.push_str(name);
        Ok(out)
    }
}

impl Generator for ParameterGenerator {
    fn describe(&self) -> String {
        format!("parameter {}", self.name.as_deref().unwrap_or("<unnamed>"))
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(vec![CodeFragment::raw(self.render(ctx)?)])
    }
}

/// A type parameter declaration such as `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterGenerator {
    name: String,
    bounds: Vec<JavaType>,
}

impl TypeParameterGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: JavaType) -> Self {
        self.bounds.push(bound);
        self
    }

    pub fn without_bounds(mut self) -> Self {
        self.bounds.clear();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        if self.bounds.is_empty() {
            return Ok(self.name.clone());
        }
        let bounds = self
            .bounds
            .iter()
            .map(|b| b.render(ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{} extends {}", self.name, bounds.join(" & ")))
    }
}

impl Generator for TypeParameterGenerator {
    fn describe(&self) -> String {
        format!("type parameter {}", self.name)
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(vec![CodeFragment::raw(self.render(ctx)?)])
    }
}

/// `<A, B extends X>`, or nothing when there are no type parameters.
pub(crate) fn render_type_parameters(
    params: &[TypeParameterGenerator],
    ctx: &mut BuilderContext<'_>,
) -> Result<String> {
    if params.is_empty() {
        return Ok(String::new());
    }
    let rendered = params
        .iter()
        .map(|p| p.render(ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("<{}>", rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry};
    use jforge_core::ApiVersion;

    use super::*;

    fn env() -> ApiEnvironment {
        ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new())
    }

    #[test]
    fn test_render_parameter() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let param = ParameterGenerator::new(JavaType::string(), "args")
            .as_final()
            .as_varargs()
            .with_annotation(Annotation::of("javax.annotation.Nonnull"));
        assert_eq!(
            param.render(&mut ctx).unwrap(),
            "@Nonnull final String... args"
        );
        assert_eq!(
            param.not_final().not_varargs().render(&mut ctx).unwrap(),
            "@Nonnull String args"
        );
    }

    #[test]
    fn test_varargs_reference_adds_one_dimension() {
        let param = ParameterGenerator::new(JavaType::string().array(2), "rows").as_varargs();
        assert_eq!(param.reference(false).unwrap().dimensions(), 3);
        assert_eq!(param.not_varargs().reference(false).unwrap().dimensions(), 2);
    }

    #[test]
    fn test_reference_erasure() {
        let param = ParameterGenerator::new(
            JavaType::declared("java.util.List").with_argument(JavaType::variable("T")),
            "items",
        );
        assert_eq!(
            param.reference(true).unwrap(),
            JavaType::declared("java.util.List")
        );
    }

    #[test]
    fn test_missing_slots() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let err = ParameterGenerator::default()
            .with_data_type(JavaType::int())
            .render(&mut ctx)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot emit parameter <unnamed>: required slot 'name' is not set"
        );
        let err = ParameterGenerator::default()
            .with_name("count")
            .reference(false)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot emit parameter count: required slot 'data type' is not set"
        );
    }

    #[test]
    fn test_type_parameter_bounds() {
        let env = env();
        let mut ctx = BuilderContext::new(&env);
        let tp = TypeParameterGenerator::new("T")
            .with_bound(JavaType::declared("java.lang.Number"))
            .with_bound(
                JavaType::declared("java.lang.Comparable").with_argument(JavaType::variable("T")),
            );
        assert_eq!(
            tp.render(&mut ctx).unwrap(),
            "T extends Number & Comparable<T>"
        );
        assert_eq!(
            render_type_parameters(&[TypeParameterGenerator::new("K"), tp], &mut ctx).unwrap(),
            "<K, T extends Number & Comparable<T>>"
        );
    }
}
