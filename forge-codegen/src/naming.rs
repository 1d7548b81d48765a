//! Java identifier rules.

/// Naming rules for generated identifiers.
///
/// Defines the reserved words and how a clashing identifier is escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Keywords and literals that cannot be used as identifiers
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "class_")
    pub escape_reserved: fn(&str) -> String,
}

/// Java keywords, reserved literals and `_`.
const JAVA_RESERVED: &[&str] = &[
    "_",
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

impl NamingConvention {
    pub const JAVA: Self = Self {
        reserved_words: JAVA_RESERVED,
        escape_reserved: |name| format!("{}_", name),
    };

    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Whether `name` is a syntactically valid, non-reserved identifier.
    pub fn is_valid_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
        starts_ok
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            && !self.is_reserved(name)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::JAVA
    }
}
