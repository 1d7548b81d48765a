//! Java modifier flag set.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Modifiers declared on a type, member or parameter.
    ///
    /// Rendering always follows the canonical Java order regardless of the
    /// order in which flags were set.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const TRANSIENT = 1 << 6;
        const VOLATILE = 1 << 7;
        const SYNCHRONIZED = 1 << 8;
        const NATIVE = 1 << 9;
        const STRICTFP = 1 << 10;
        const DEFAULT = 1 << 11;
    }
}

/// Canonical declaration order, paired with the keyword.
const ORDER: [(Modifiers, &str); 12] = [
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::STATIC, "static"),
    (Modifiers::FINAL, "final"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::STRICTFP, "strictfp"),
];

impl Modifiers {
    /// All visibility flags.
    pub const VISIBILITY: Self = Self::PUBLIC.union(Self::PROTECTED).union(Self::PRIVATE);

    /// Look up a single modifier by its Java keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        ORDER
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(flag, _)| *flag)
    }

    /// Keywords of the set flags in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        ORDER
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, kw)| kw)
    }

    /// Replace the visibility flags with `visibility` (which may be empty for
    /// package-private).
    pub fn with_visibility(self, visibility: Modifiers) -> Self {
        (self - Self::VISIBILITY) | (visibility & Self::VISIBILITY)
    }

    /// Whether members with these modifiers can be overridden.
    pub fn is_overridable(self) -> bool {
        !self.intersects(Self::FINAL | Self::STATIC | Self::PRIVATE)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords: Vec<_> = self.keywords().collect();
        write!(f, "{}", keywords.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let mods = Modifiers::FINAL | Modifiers::STATIC | Modifiers::PUBLIC;
        assert_eq!(mods.to_string(), "public static final");
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(Modifiers::from_keyword("abstract"), Some(Modifiers::ABSTRACT));
        assert_eq!(Modifiers::from_keyword("default"), Some(Modifiers::DEFAULT));
        assert_eq!(Modifiers::from_keyword("sealed"), None);
    }

    #[test]
    fn test_with_visibility_replaces() {
        let mods = (Modifiers::PUBLIC | Modifiers::FINAL).with_visibility(Modifiers::PRIVATE);
        assert_eq!(mods, Modifiers::PRIVATE | Modifiers::FINAL);
        let package_private = mods.with_visibility(Modifiers::empty());
        assert_eq!(package_private, Modifiers::FINAL);
    }

    #[test]
    fn test_is_overridable() {
        assert!(Modifiers::PUBLIC.is_overridable());
        assert!(!(Modifiers::PUBLIC | Modifiers::FINAL).is_overridable());
        assert!(!Modifiers::PRIVATE.is_overridable());
        assert!(!Modifiers::STATIC.is_overridable());
    }
}
