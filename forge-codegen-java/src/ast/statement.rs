//! Java statements.

use jforge_codegen::{BuilderContext, CodeFragment, Generator};
use jforge_core::Result;

use super::{Expr, JavaType};

/// A statement inside a method, constructor or initializer body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expr),
    Return(Option<Expr>),
    Local {
        ty: JavaType,
        name: String,
        init: Option<Expr>,
        is_final: bool,
    },
    If {
        condition: Expr,
        then: Vec<Statement>,
        otherwise: Option<Vec<Statement>>,
    },
    Throw(Expr),
    Block(Vec<Statement>),
    /// One or more lines emitted verbatim at the current indentation.
    Raw(String),
}

impl Statement {
    pub fn expr(expr: Expr) -> Self {
        Self::Expr(expr)
    }

    pub fn return_(expr: Expr) -> Self {
        Self::Return(Some(expr))
    }

    pub fn return_void() -> Self {
        Self::Return(None)
    }

    pub fn local(ty: JavaType, name: impl Into<String>, init: Expr) -> Self {
        Self::Local {
            ty,
            name: name.into(),
            init: Some(init),
            is_final: false,
        }
    }

    /// `final` local variable.
    pub fn constant(ty: JavaType, name: impl Into<String>, init: Expr) -> Self {
        Self::Local {
            ty,
            name: name.into(),
            init: Some(init),
            is_final: true,
        }
    }

    pub fn if_(condition: Expr, then: Vec<Statement>) -> Self {
        Self::If {
            condition,
            then,
            otherwise: None,
        }
    }

    pub fn if_else(condition: Expr, then: Vec<Statement>, otherwise: Vec<Statement>) -> Self {
        Self::If {
            condition,
            then,
            otherwise: Some(otherwise),
        }
    }

    pub fn throw(expr: Expr) -> Self {
        Self::Throw(expr)
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }
}

/// Fragments for a statement list.
pub(crate) fn statement_fragments(
    statements: &[Statement],
    ctx: &mut BuilderContext<'_>,
) -> Result<Vec<CodeFragment>> {
    let mut fragments = Vec::new();
    for statement in statements {
        fragments.extend(statement.to_fragments(ctx)?);
    }
    Ok(fragments)
}

impl Generator for Statement {
    fn describe(&self) -> String {
        match self {
            Self::Expr(_) => "expression statement",
            Self::Return(_) => "return statement",
            Self::Local { .. } => "local variable",
            Self::If { .. } => "if statement",
            Self::Throw(_) => "throw statement",
            Self::Block(_) => "block",
            Self::Raw(_) => "raw statement",
        }
        .to_string()
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        Ok(match self {
            Self::Expr(expr) => vec![CodeFragment::line(format!("{};", expr.render(ctx)?))],
            Self::Return(None) => vec![CodeFragment::line("return;")],
            Self::Return(Some(expr)) => {
                vec![CodeFragment::line(format!("return {};", expr.render(ctx)?))]
            }
            Self::Local {
                ty,
                name,
                init,
                is_final,
            } => {
                let prefix = if *is_final { "final " } else { "" };
                let ty = ty.render(ctx)?;
                let line = match init {
                    Some(init) => format!("{}{} {} = {};", prefix, ty, name, init.render(ctx)?),
                    None => format!("{}{} {};", prefix, ty, name),
                };
                vec![CodeFragment::line(line)]
            }
            Self::If {
                condition,
                then,
                otherwise,
            } => {
                let header = format!("if ({})", condition.render(ctx)?);
                let then = statement_fragments(then, ctx)?;
                match otherwise {
                    None => vec![CodeFragment::braced(header, then)],
                    Some(otherwise) => vec![
                        CodeFragment::block(
                            format!("{} {{", header),
                            then,
                            Some("} else {".to_string()),
                        ),
                        CodeFragment::indent(statement_fragments(otherwise, ctx)?),
                        CodeFragment::line("}"),
                    ],
                }
            }
            Self::Throw(expr) => vec![CodeFragment::line(format!("throw {};", expr.render(ctx)?))],
            Self::Block(statements) => {
                vec![CodeFragment::block(
                    "{",
                    statement_fragments(statements, ctx)?,
                    Some("}".to_string()),
                )]
            }
            Self::Raw(text) => text.lines().map(CodeFragment::line).collect(),
        })
    }
}
