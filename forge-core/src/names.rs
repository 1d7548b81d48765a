//! Qualified-name, casing and escaping helpers for Java source.

/// Last dot-separated segment of a qualified name (`java.util.List` -> `List`).
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last dot, or `""` for an unqualified name.
pub fn package_name(qualified: &str) -> &str {
    qualified.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

/// Whether the name contains a package (or enclosing type) qualifier.
pub fn is_qualified(name: &str) -> bool {
    name.contains('.')
}

/// Uppercase the first character (`name` -> `Name`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Escape a string for use inside a Java string literal (without the quotes).
pub fn escape_java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

/// Escape a single character for use inside a Java char literal.
pub fn escape_java_char(c: char) -> String {
    let mut out = String::new();
    match c {
        '\'' => out.push_str("\\'"),
        _ => push_escaped(&mut out, c),
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0008}' => out.push_str("\\b"),
        '\u{000C}' => out.push_str("\\f"),
        c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}
