//! Generator trait and CodeFragment for decoupled code generation.
//!
//! Generators describe a piece of Java source as fragments; the
//! [`CodeBuilder`](super::CodeBuilder) turns fragments into text with the
//! indentation and line delimiter of the current [`BuilderContext`].

use jforge_core::Result;

use crate::BuilderContext;

/// Represents a fragment of generated code.
///
/// CodeFragments form an intermediate representation between generators
/// and the final string output, enabling composition and transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have a line delimiter appended).
    Line(String),
    /// A blank line.
    Blank,
    /// Raw text without line delimiter.
    Raw(String),
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments.
    Indent(Vec<CodeFragment>),
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A Javadoc comment; each line of the text becomes one comment line.
    Javadoc(String),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a blank line fragment.
    pub fn blank() -> Self {
        Self::Blank
    }

    /// Create a raw text fragment.
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a `{ ... }` block closed by `}`.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::block(format!("{} {{", header.into()), body, Some("}".to_string()))
    }

    /// Create an indented fragment sequence.
    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    /// Create a sequence of fragments.
    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }

    /// Create a Javadoc comment fragment.
    pub fn javadoc(s: impl Into<String>) -> Self {
        Self::Javadoc(s.into())
    }
}

/// A composable unit that emits a fragment of Java source.
///
/// Generators hold their slots as plain data and are never mutated by
/// emission, so the same tree can be emitted any number of times. Every
/// symbolic reference goes through the context passed in, which makes the
/// output of one pass depend only on the tree and the context.
pub trait Generator {
    /// Best-effort identity used in error messages (e.g. `method greet`).
    fn describe(&self) -> String;

    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>>;

    /// Render this node to text using the context's formatting settings.
    fn emit(&self, ctx: &mut BuilderContext<'_>) -> Result<String> {
        let mut builder = ctx.code_builder();
        builder.emit(self, ctx)?;
        Ok(builder.build())
    }
}

/// Blanket implementation for references.
impl<T: Generator + ?Sized> Generator for &T {
    fn describe(&self) -> String {
        (*self).describe()
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        (*self).to_fragments(ctx)
    }
}

/// Blanket implementation for Box.
impl<T: Generator + ?Sized> Generator for Box<T> {
    fn describe(&self) -> String {
        self.as_ref().describe()
    }

    fn to_fragments(&self, ctx: &mut BuilderContext<'_>) -> Result<Vec<CodeFragment>> {
        self.as_ref().to_fragments(ctx)
    }
}
