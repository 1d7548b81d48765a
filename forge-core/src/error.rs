use miette::Diagnostic;
use thiserror::Error;

use crate::ApiVersion;

/// Result type for jforge operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Errors raised by queries, generators and API resolution.
///
/// All variants propagate to the immediate caller. Recoverable ambiguities are
/// not errors; they are reported as diagnostics instead.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {message}")]
    #[diagnostic(code(jforge::invalid_argument))]
    InvalidArgument { message: String },

    #[error("cannot emit {generator}: {reason}")]
    #[diagnostic(code(jforge::generation))]
    Generation { generator: String, reason: String },

    #[error("no implementation of '{capability}' applies to API version {version}")]
    #[diagnostic(
        code(jforge::unsupported_version),
        help("register a default implementation or one tagged with a lower version")
    )]
    UnsupportedVersion {
        capability: String,
        version: ApiVersion,
    },
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Box<Self> {
        Box::new(Self::InvalidArgument {
            message: message.into(),
        })
    }

    /// Create a generation error for a required slot that is not set.
    pub fn generation(slot: &str, generator: impl Into<String>) -> Box<Self> {
        Self::invalid_generator(generator, format!("required slot '{}' is not set", slot))
    }

    /// Create a generation error for a generator whose slots are set but
    /// cannot be emitted together.
    pub fn invalid_generator(generator: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Self::Generation {
            generator: generator.into(),
            reason: reason.into(),
        })
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(capability: impl Into<String>, version: &ApiVersion) -> Box<Self> {
        Box::new(Self::UnsupportedVersion {
            capability: capability.into(),
            version: version.clone(),
        })
    }
}
