//! Per-pass emission context.

use std::collections::{BTreeSet, HashMap};

use jforge_core::{ApiVersion, Result};
use jforge_model::TypeModel;

use crate::{
    ApiEnvironment, CodeBuilder, Diagnostic, ImportValidator, Indent, LineDelimiter, Severity,
};

/// Context threaded through every generator of one emission pass.
///
/// Owns the pass's [`ImportValidator`], borrows the [`ApiEnvironment`] and
/// optionally the [`TypeModel`] the generated code refers to, and collects
/// non-fatal diagnostics. A context is single-owner; independent passes use
/// independent contexts and can run in parallel.
///
/// ```
/// use jforge_codegen::{ApiEnvironment, ApiRegistry, BuilderContext, Indent};
/// use jforge_core::ApiVersion;
///
/// let env = ApiEnvironment::new(ApiVersion::new(17, 0, 0), ApiRegistry::new());
/// let mut ctx = BuilderContext::new(&env).with_indent(Indent::GOOGLE);
/// assert_eq!(ctx.resolve_reference("java.util.List"), "List");
/// assert!(ctx.claimed_imports().contains("java.util.List"));
/// ```
pub struct BuilderContext<'a> {
    environment: &'a ApiEnvironment,
    model: Option<&'a dyn TypeModel>,
    imports: ImportValidator,
    indent: Indent,
    line_delimiter: LineDelimiter,
    /// Capability -> resolved value, filled on first use
    api_cache: HashMap<String, String>,
    /// Diagnostics collected during the pass.
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BuilderContext<'a> {
    /// Create a new context for one pass against `environment`.
    pub fn new(environment: &'a ApiEnvironment) -> Self {
        Self {
            environment,
            model: None,
            imports: ImportValidator::new(),
            indent: Indent::default(),
            line_delimiter: LineDelimiter::default(),
            api_cache: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: &'a dyn TypeModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_line_delimiter(mut self, line_delimiter: LineDelimiter) -> Self {
        self.line_delimiter = line_delimiter;
        self
    }

    pub fn environment(&self) -> &'a ApiEnvironment {
        self.environment
    }

    pub fn version(&self) -> &'a ApiVersion {
        self.environment.version()
    }

    pub fn model(&self) -> Option<&'a dyn TypeModel> {
        self.model
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    pub fn line_delimiter(&self) -> LineDelimiter {
        self.line_delimiter
    }

    /// A fresh builder with this context's formatting settings.
    pub fn code_builder(&self) -> CodeBuilder {
        CodeBuilder::new(self.indent, self.line_delimiter)
    }

    // =========================================================================
    // Imports
    // =========================================================================

    pub fn imports(&self) -> &ImportValidator {
        &self.imports
    }

    /// Short or qualified form of `qualified` for this pass.
    pub fn resolve_reference(&mut self, qualified: &str) -> String {
        self.imports.resolve_reference(qualified)
    }

    /// Bind a simple name without claiming an import.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.imports.reserve(name)
    }

    pub fn claimed_imports(&self) -> &BTreeSet<String> {
        self.imports.claimed_imports()
    }

    /// Run `f` with the given type variables in scope.
    pub fn with_type_variables<I, S, R>(
        &mut self,
        names: I,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mark = self.imports.push_type_variables(names);
        let out = f(self);
        self.imports.pop_type_variables(mark);
        out
    }

    // =========================================================================
    // API resolution
    // =========================================================================

    /// Resolve a capability against the environment.
    ///
    /// The first resolution of a capability is cached for the rest of the
    /// pass. An unknown capability is an invalid argument.
    pub fn resolve_api(&mut self, capability: &str) -> Result<String> {
        if let Some(value) = self.api_cache.get(capability) {
            return Ok(value.clone());
        }
        let value = self.environment.resolve(capability)?;
        tracing::debug!(
            "resolved '{}' to '{}' for API version {}",
            capability,
            value,
            self.environment.version()
        );
        self.api_cache
            .insert(capability.to_string(), value.clone());
        Ok(value)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Add a diagnostic and log it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Info => tracing::debug!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning diagnostic.
    pub fn warn(&mut self, generator: &str, message: impl Into<String>) {
        self.report(Diagnostic::warning(generator, message));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// End the pass, returning the claimed imports and the diagnostics.
    pub fn finish(self) -> (BTreeSet<String>, Vec<Diagnostic>) {
        let claimed = self.imports.claimed_imports().clone();
        (claimed, self.diagnostics)
    }
}

impl std::fmt::Debug for BuilderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderContext")
            .field("version", self.environment.version())
            .field("has_model", &self.model.is_some())
            .field("imports", &self.imports)
            .field("indent", &self.indent)
            .field("line_delimiter", &self.line_delimiter)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use jforge_core::Error;

    use super::*;
    use crate::{ApiFunction, ApiRegistry};

    #[test]
    fn test_resolve_api_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = ApiRegistry::new().with(ApiFunction::new("nullable").with_default(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                "javax.annotation.Nullable".to_string()
            },
        ));
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), registry);
        let mut ctx = BuilderContext::new(&env);

        for _ in 0..3 {
            assert_eq!(
                ctx.resolve_api("nullable").unwrap(),
                "javax.annotation.Nullable"
            );
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut other = BuilderContext::new(&env);
        other.resolve_api("nullable").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_unknown_api() {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        let err = ctx.resolve_api("missing").unwrap_err();
        assert!(matches!(*err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_diagnostics() {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        ctx.report(Diagnostic::info("unit", "started"));
        assert!(!ctx.has_warnings());
        ctx.warn("method close", "ambiguous super method");
        assert!(ctx.has_warnings());
        assert_eq!(ctx.warnings().count(), 1);
        assert_eq!(ctx.diagnostics().len(), 2);
    }

    #[test]
    fn test_formatting_settings() {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let ctx = BuilderContext::new(&env)
            .with_indent(Indent::Tab)
            .with_line_delimiter(LineDelimiter::CrLf);
        let code = ctx.code_builder().line("{").indent().line("x;").build();
        assert_eq!(code, "{\r\n\tx;\r\n");
    }

    #[test]
    fn test_finish_returns_claimed_imports() {
        let env = ApiEnvironment::new(ApiVersion::new(1, 0, 0), ApiRegistry::new());
        let mut ctx = BuilderContext::new(&env);
        ctx.resolve_reference("java.util.List");
        ctx.resolve_reference("java.awt.List");
        let (claimed, diagnostics) = ctx.finish();
        assert_eq!(claimed.into_iter().collect::<Vec<_>>(), vec!["java.util.List"]);
        assert!(diagnostics.is_empty());
    }
}
