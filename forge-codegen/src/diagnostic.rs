//! Diagnostic types for generation passes.
//!
//! Recoverable conditions found while emitting (an ambiguous lookup, a
//! name that had to be written qualified) are collected on the
//! [`BuilderContext`](crate::BuilderContext) instead of failing the pass.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Output was produced, but a choice was made on the caller's behalf.
    Warning,
    /// Informational message about the pass.
    Info,
}

impl Severity {
    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The generator that produced this diagnostic (its `describe()`).
    pub generator: String,
    /// The diagnostic message.
    pub message: String,
    /// Optional element the diagnostic is about (e.g. `com.acme.Base.close`).
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(generator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, generator, message)
    }

    /// Create a new info diagnostic.
    pub fn info(generator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, generator, message)
    }

    fn new(severity: Severity, generator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            generator: generator.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.generator, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
