//! Short-name versus qualified-name decisions for one emission pass.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use jforge_core::{is_qualified, simple_name};

/// Decides, per reference, whether a type can be written by its simple name.
///
/// The first qualified name seen for a simple name binds it; that type is
/// then written short and recorded as a claimed import. Any other type with
/// the same simple name is always written fully qualified. Bindings are never
/// removed or replaced, so a new validator is needed for a new pass.
///
/// # Example
///
/// ```
/// use jforge_codegen::ImportValidator;
///
/// let mut imports = ImportValidator::new();
/// assert_eq!(imports.resolve_reference("java.util.List"), "List");
/// assert_eq!(imports.resolve_reference("java.awt.List"), "java.awt.List");
/// assert_eq!(imports.resolve_reference("java.util.List"), "List");
///
/// let claimed: Vec<_> = imports.claimed_imports().iter().collect();
/// assert_eq!(claimed, ["java.util.List"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportValidator {
    /// Simple name -> qualified name, in binding order
    bindings: IndexMap<String, String>,
    /// Qualified names written in short form (sorted for deterministic output)
    claimed: BTreeSet<String>,
    /// Type variables in scope, innermost last
    type_variables: Vec<String>,
}

impl ImportValidator {
    /// Create a new empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the form in which `qualified` must be written.
    ///
    /// A name without a qualifier (a type variable, a primitive, a type of
    /// the default package) is returned unchanged and never bound.
    pub fn resolve_reference(&mut self, qualified: &str) -> String {
        if !is_qualified(qualified) {
            return qualified.to_string();
        }
        let simple = simple_name(qualified);
        if self.type_variables.iter().any(|v| v == simple) {
            tracing::debug!(
                "'{}' is a type variable here, writing {} qualified",
                simple,
                qualified
            );
            return qualified.to_string();
        }
        match self.bindings.get(simple) {
            None => {
                self.bindings
                    .insert(simple.to_string(), qualified.to_string());
                self.claimed.insert(qualified.to_string());
                simple.to_string()
            }
            Some(bound) if bound == qualified => simple.to_string(),
            Some(bound) => {
                tracing::debug!(
                    "'{}' is bound to {}, writing {} qualified",
                    simple,
                    bound,
                    qualified
                );
                qualified.to_string()
            }
        }
    }

    /// Bind the simple name of `name` without claiming an import.
    ///
    /// Used for the types declared by the unit being generated, which are
    /// in scope without an import. Returns `false` when the simple name is
    /// already bound to another type.
    pub fn reserve(&mut self, name: &str) -> bool {
        let simple = simple_name(name);
        match self.bindings.get(simple) {
            Some(bound) => bound == name,
            None => {
                self.bindings.insert(simple.to_string(), name.to_string());
                true
            }
        }
    }

    /// Bring type variable names into scope; a type whose simple name is
    /// one of them is written qualified until the scope is left.
    ///
    /// Returns the mark to hand back to [`Self::pop_type_variables`].
    pub fn push_type_variables<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mark = self.type_variables.len();
        self.type_variables.extend(names.into_iter().map(Into::into));
        mark
    }

    /// Leave the type variable scope opened at `mark`.
    pub fn pop_type_variables(&mut self, mark: usize) {
        self.type_variables.truncate(mark);
    }

    /// Qualified names that were written in short form and need an import.
    pub fn claimed_imports(&self) -> &BTreeSet<String> {
        &self.claimed
    }

    /// Check if a simple name is bound.
    pub fn is_bound(&self, simple: &str) -> bool {
        self.bindings.contains_key(simple)
    }

    /// The qualified name a simple name is bound to.
    pub fn binding(&self, simple: &str) -> Option<&str> {
        self.bindings.get(simple).map(String::as_str)
    }

    /// Iterate over bindings in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check if no name is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get the number of bound simple names.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}
