//! Version-aware resolution of symbolic capabilities.
//!
//! Generated code often has to name an API whose shape depends on the
//! version of the environment it targets (an annotation that moved package,
//! a factory method that was renamed). An [`ApiFunction`] maps such a
//! capability to a value for a given [`ApiVersion`]:
//!
//! ```
//! use jforge_codegen::ApiFunction;
//! use jforge_core::ApiVersion;
//!
//! let inject = ApiFunction::new("inject")
//!     .with_default_value("javax.inject.Inject".to_string())
//!     .since_value(ApiVersion::new(2, 0, 0), "jakarta.inject.Inject".to_string());
//!
//! assert_eq!(inject.resolve(&ApiVersion::new(1, 4, 0)).unwrap(), "javax.inject.Inject");
//! assert_eq!(inject.resolve(&ApiVersion::new(2, 1, 0)).unwrap(), "jakarta.inject.Inject");
//! ```

use std::{collections::BTreeMap, fmt, sync::Arc};

use indexmap::IndexMap;
use jforge_core::{ApiVersion, Error, Result};

type Resolver<T> = Arc<dyn Fn(&ApiVersion) -> T + Send + Sync>;

/// A capability with implementations tagged by the minimum version at which
/// each applies.
pub struct ApiFunction<T> {
    capability: String,
    default: Option<Resolver<T>>,
    implementations: BTreeMap<ApiVersion, Resolver<T>>,
}

impl<T> ApiFunction<T> {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            default: None,
            implementations: BTreeMap::new(),
        }
    }

    /// Register an implementation valid from `version` onwards. A later
    /// registration for the same version replaces the earlier one.
    pub fn since<F>(mut self, version: ApiVersion, f: F) -> Self
    where
        F: Fn(&ApiVersion) -> T + Send + Sync + 'static,
    {
        self.implementations.insert(version, Arc::new(f));
        self
    }

    /// Fallback used when no tagged implementation applies.
    pub fn with_default<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiVersion) -> T + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(f));
        self
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Tagged versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = &ApiVersion> {
        self.implementations.keys()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Pick the implementation with the highest tag not exceeding `version`,
    /// falling back to the default.
    pub fn resolve(&self, version: &ApiVersion) -> Result<T> {
        let resolver = self
            .implementations
            .range(..=version)
            .next_back()
            .map(|(_, f)| f)
            .or(self.default.as_ref())
            .ok_or_else(|| Error::unsupported_version(&self.capability, version))?;
        Ok(resolver(version))
    }
}

impl<T: Clone + Send + Sync + 'static> ApiFunction<T> {
    /// Register a constant valid from `version` onwards.
    pub fn since_value(self, version: ApiVersion, value: T) -> Self {
        self.since(version, move |_| value.clone())
    }

    /// Constant fallback used when no tagged implementation applies.
    pub fn with_default_value(self, value: T) -> Self {
        self.with_default(move |_| value.clone())
    }
}

impl<T> Clone for ApiFunction<T> {
    fn clone(&self) -> Self {
        Self {
            capability: self.capability.clone(),
            default: self.default.clone(),
            implementations: self.implementations.clone(),
        }
    }
}

impl<T> fmt::Debug for ApiFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFunction")
            .field("capability", &self.capability)
            .field("versions", &self.implementations.keys().collect::<Vec<_>>())
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// Capability name -> string-valued function.
///
/// Values are usually qualified type names or member names that generators
/// splice into the output.
#[derive(Debug, Clone, Default)]
pub struct ApiRegistry {
    functions: IndexMap<String, ApiFunction<String>>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its capability name, replacing any previous
    /// registration.
    pub fn register(&mut self, function: ApiFunction<String>) -> &mut Self {
        self.functions
            .insert(function.capability().to_string(), function);
        self
    }

    /// Consuming variant of [`register`](Self::register).
    pub fn with(mut self, function: ApiFunction<String>) -> Self {
        self.register(function);
        self
    }

    pub fn get(&self, capability: &str) -> Option<&ApiFunction<String>> {
        self.functions.get(capability)
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.functions.contains_key(capability)
    }

    /// Resolve a capability for `version`.
    pub fn resolve(&self, capability: &str, version: &ApiVersion) -> Result<String> {
        self.get(capability)
            .ok_or_else(|| {
                Error::invalid_argument(format!("unknown API capability '{}'", capability))
            })?
            .resolve(version)
    }

    /// Registered capability names in registration order.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }
}

/// The target environment of a generation pass: its version and the
/// capabilities it knows about.
#[derive(Debug, Clone)]
pub struct ApiEnvironment {
    version: ApiVersion,
    registry: ApiRegistry,
}

impl ApiEnvironment {
    pub fn new(version: ApiVersion, registry: ApiRegistry) -> Self {
        Self { version, registry }
    }

    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    pub fn registry(&self) -> &ApiRegistry {
        &self.registry
    }

    /// Resolve a capability for this environment's version.
    pub fn resolve(&self, capability: &str) -> Result<String> {
        self.registry.resolve(capability, &self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ApiVersion {
        s.parse().unwrap()
    }

    fn factory() -> ApiFunction<String> {
        ApiFunction::new("list-factory")
            .since_value(v("1.0"), "Arrays.asList".to_string())
            .since_value(v("2.0"), "List.of".to_string())
            .since(v("3.1"), |version| format!("Lists.v{}", version.major()))
    }

    #[test]
    fn test_highest_applicable_version() {
        let f = factory();
        assert_eq!(f.resolve(&v("1.5")).unwrap(), "Arrays.asList");
        assert_eq!(f.resolve(&v("2.0")).unwrap(), "List.of");
        assert_eq!(f.resolve(&v("3.0.9")).unwrap(), "List.of");
        assert_eq!(f.resolve(&v("4")).unwrap(), "Lists.v4");
    }

    #[test]
    fn test_falls_back_to_default() {
        let f = factory().with_default_value("legacy".to_string());
        assert_eq!(f.resolve(&v("0.9")).unwrap(), "legacy");
        assert_eq!(f.resolve(&v("2.0")).unwrap(), "List.of");
    }

    #[test]
    fn test_unsupported_version() {
        let err = factory().resolve(&v("0.9")).unwrap_err();
        assert_eq!(
            *err,
            Error::UnsupportedVersion {
                capability: "list-factory".to_string(),
                version: v("0.9"),
            }
        );
    }

    #[test]
    fn test_registry_unknown_capability() {
        let registry = ApiRegistry::new().with(factory());
        assert!(registry.contains("list-factory"));
        let err = registry.resolve("missing", &v("1.0")).unwrap_err();
        assert!(matches!(*err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_environment_resolve() {
        let env = ApiEnvironment::new(v("2.3"), ApiRegistry::new().with(factory()));
        assert_eq!(env.resolve("list-factory").unwrap(), "List.of");
        assert_eq!(env.version(), &v("2.3"));
    }

    #[test]
    fn test_environment_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiEnvironment>();
        assert_send_sync::<ApiFunction<String>>();
    }
}
