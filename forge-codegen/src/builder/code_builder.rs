//! Code builder utility for generating properly indented code.

use jforge_core::Result;

use super::{CodeFragment, Generator, Indent, LineDelimiter};
use crate::BuilderContext;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for fragment application.
///
/// # Example (Consuming API)
///
/// ```
/// use jforge_codegen::CodeBuilder;
///
/// let code = CodeBuilder::java()
///     .line("class Main {")
///     .indent()
///     .line("int x;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "class Main {\n    int x;\n}\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use jforge_codegen::{CodeBuilder, Indent, LineDelimiter};
///
/// let mut builder = CodeBuilder::new(Indent::Tab, LineDelimiter::CrLf);
/// builder
///     .push_line("void run() {")
///     .push_indent()
///     .push_line("work();")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "void run() {\r\n\twork();\r\n}\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    delimiter: LineDelimiter,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation and line
    /// delimiter.
    pub fn new(indent: Indent, delimiter: LineDelimiter) -> Self {
        Self {
            indent_level: 0,
            indent,
            delimiter,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation and `\n` lines.
    pub fn java() -> Self {
        Self::new(Indent::JAVA, LineDelimiter::Lf)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push_str(self.delimiter.as_str());
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push_str(self.delimiter.as_str());
        self
    }

    /// Add raw text without indentation or line delimiter (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a Javadoc comment (mutable).
    ///
    /// Single-line text renders as `/** text */`; multi-line text renders
    /// one ` * ` line per input line.
    pub fn push_javadoc(&mut self, text: &str) -> &mut Self {
        let lines: Vec<&str> = text.lines().collect();
        if let [single] = lines.as_slice() {
            return self.push_line(&format!("/** {} */", single));
        }
        self.push_line("/**");
        for line in lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    /// Emit a generator (mutable).
    pub fn emit(
        &mut self,
        node: &(impl Generator + ?Sized),
        ctx: &mut BuilderContext<'_>,
    ) -> Result<&mut Self> {
        for fragment in node.to_fragments(ctx)? {
            self.apply_fragment(fragment);
        }
        Ok(self)
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Raw(s) => {
                self.push_raw(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Javadoc(text) => {
                self.push_javadoc(&text);
            }
        }
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Add raw text without indentation or line delimiter.
    pub fn raw(mut self, s: &str) -> Self {
        self.push_raw(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a Javadoc comment.
    pub fn javadoc(mut self, text: &str) -> Self {
        self.push_javadoc(text);
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}
