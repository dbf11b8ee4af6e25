//! Binary-name helpers.
//!
//! A binary name uses `.` between package segments and `$` between a class and
//! its nested classes (`java.util.Map$Entry`). Array names are accepted in
//! both the source form (`int[][]`) and the JVM descriptor form (`[[I`,
//! `[Ljava.lang.String;`).

use crate::Primitive;

const KEYWORDS: &[&str] = &[
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
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

/// Simple name: the last `.` or `$` segment.
pub fn simple_name(binary_name: &str) -> &str {
    match binary_name.rfind(['.', '$']) {
        Some(idx) => &binary_name[idx + 1..],
        None => binary_name,
    }
}

/// Fully-qualified source name: nested classes joined with `.`.
pub fn qualified_name(binary_name: &str) -> String {
    binary_name.replace('$', ".")
}

/// Package of a binary name; the empty string is the root package.
///
/// Array names always live in the root package.
pub fn package_name(binary_name: &str) -> &str {
    if binary_name.contains('[') {
        return "";
    }
    match binary_name.rfind('.') {
        Some(idx) => &binary_name[..idx],
        None => "",
    }
}

/// Binary name of the enclosing class, for nested names such as `a.B$C`.
pub fn enclosing_name(binary_name: &str) -> Option<&str> {
    let idx = binary_name.rfind('$')?;
    let outer = &binary_name[..idx];
    (!outer.is_empty() && !outer.ends_with('.')).then_some(outer)
}

/// Component name of an array name, or `None` if `name` is not an array.
///
/// Primitive components are reported by keyword.
pub fn array_component(name: &str) -> Option<&str> {
    if let Some(component) = name.strip_suffix("[]") {
        return Some(component);
    }
    let rest = name.strip_prefix('[')?;
    if rest.starts_with('[') {
        return Some(rest);
    }
    if let Some(class) = rest.strip_prefix('L').and_then(|r| r.strip_suffix(';')) {
        return Some(class);
    }
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Primitive::from_descriptor(c).map(|p| p.keyword()),
        _ => None,
    }
}

/// Whether `s` is a legal identifier that is not a reserved word.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_identifier_start(first) || !chars.all(is_identifier_part) {
        return false;
    }
    !KEYWORDS.contains(&s)
}

/// Whether every `.`/`$` separated segment of `name` is an identifier.
pub fn is_binary_name(name: &str) -> bool {
    !name.is_empty() && name.split(['.', '$']).all(is_identifier)
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
