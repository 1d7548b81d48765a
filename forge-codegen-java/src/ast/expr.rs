//! Java expressions.

use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::{Result, escape_java_char, escape_java_string};

use super::JavaType;

/// A Java expression.
///
/// Type references inside expressions (static access, class literals,
/// instance creation, casts) go through the context like any other type
/// reference, so they contribute to the claimed imports.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Char(char),
    Str(String),
    /// A local variable, parameter or unqualified field.
    Name(String),
    This,
    /// A type used as the target of a static member access.
    Type(JavaType),
    ClassLiteral(JavaType),
    Field {
        target: Box<Expr>,
        name: String,
    },
    Call {
        target: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    New {
        ty: JavaType,
        args: Vec<Expr>,
    },
    Cast {
        ty: JavaType,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Raw(String),
}

impl Expr {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    pub fn int(value: i32) -> Self {
        Self::Int(value)
    }

    pub fn long(value: i64) -> Self {
        Self::Long(value)
    }

    pub fn char(value: char) -> Self {
        Self::Char(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn this() -> Self {
        Self::This
    }

    pub fn type_ref(ty: JavaType) -> Self {
        Self::Type(ty)
    }

    pub fn class_literal(ty: JavaType) -> Self {
        Self::ClassLiteral(ty)
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Unqualified method call `name(args)`.
    pub fn invoke(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: None,
            name: name.into(),
            args,
        }
    }

    pub fn new_instance(ty: JavaType, args: Vec<Expr>) -> Self {
        Self::New { ty, args }
    }

    pub fn cast(ty: JavaType, expr: Expr) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn binary(left: Expr, op: impl Into<String>, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    /// `self.name`
    pub fn field(self, name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// `self.name(args)`
    pub fn call(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: Some(Box::new(self)),
            name: name.into(),
            args,
        }
    }

    pub fn render(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        Ok(match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Long(l) => format!("{}L", l),
            Self::Char(c) => format!("'{}'", escape_java_char(*c)),
            Self::Str(s) => format!("\"{}\"", escape_java_string(s)),
            Self::Name(name) => name.clone(),
            Self::This => "this".to_string(),
            Self::Type(ty) => ty.render(ctx)?,
            Self::ClassLiteral(ty) => format!("{}.class", ty.render(ctx)?),
            Self::Field { target, name } => format!("{}.{}", target.render(ctx)?, name),
            Self::Call { target, name, args } => match target {
                Some(target) => {
                    let target = target.render(ctx)?;
                    format!("{}.{}({})", target, name, render_args(args, ctx)?)
                }
                None => format!("{}({})", name, render_args(args, ctx)?),
            },
            Self::New { ty, args } => {
                format!("new {}({})", ty.render(ctx)?, render_args(args, ctx)?)
            }
            Self::Cast { ty, expr } => format!("({}) {}", ty.render(ctx)?, expr.render(ctx)?),
            Self::Binary { left, op, right } => {
                format!("{} {} {}", left.render(ctx)?, op, right.render(ctx)?)
            }
            Self::Raw(text) => text.clone(),
        })
    }
}

fn render_args(args: &[Expr], ctx: &mut BuilderContext<'_>) -> Result<String> {
    let rendered = args
        .iter()
        .map(|a| a.render(ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

impl Generator for Expr {
    fn describe(&self) -> String {
        "expression".to_string()
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(vec![CodeFragment::raw(self.render(ctx)?)])
    }
}

#[cfg(test)]
mod tests {
    use jforge_codegen::{ApiEnvironment, ApiRegistry};
    use jforge_core::ApiVersion;

    use super::*;

    fn render(expr: &Expr) -> String {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        expr.render(&mut ctx).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(render(&Expr::null()), "null");
        assert_eq!(render(&Expr::bool(true)), "true");
        assert_eq!(render(&Expr::int(-4)), "-4");
        assert_eq!(render(&Expr::long(9)), "9L");
        assert_eq!(render(&Expr::char('\'')), "'\\''");
        assert_eq!(
            render(&Expr::string("say \"hi\"\n")),
            "\"say \\\"hi\\\"\\n\""
        );
    }

    #[test]
    fn test_calls_and_fields() {
        let expr = Expr::this().field("items").call("add", vec![Expr::name("item")]);
        assert_eq!(render(&expr), "this.items.add(item)");
        let expr = Expr::type_ref(JavaType::declared("java.util.Objects"))
            .call("requireNonNull", vec![Expr::name("a"), Expr::string("a")]);
        assert_eq!(render(&expr), "Objects.requireNonNull(a, \"a\")");
        assert_eq!(render(&Expr::invoke("init", vec![])), "init()");
    }

    #[test]
    fn test_new_cast_binary() {
        let expr = Expr::new_instance(
            JavaType::declared("java.util.ArrayList").with_argument(JavaType::string()),
            vec![],
        );
        assert_eq!(render(&expr), "new ArrayList<String>()");
        let expr = Expr::cast(JavaType::long(), Expr::name("count"));
        assert_eq!(render(&expr), "(long) count");
        let expr = Expr::binary(Expr::name("a"), "!=", Expr::null());
        assert_eq!(render(&expr), "a != null");
        let expr = Expr::class_literal(JavaType::string());
        assert_eq!(render(&expr), "String.class");
    }
}
