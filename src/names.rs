//! Name utilities
//!
//! Splitting of prefixed XML names and conversion of schema names into
//! identifiers usable by generated code.

use once_cell::sync::Lazy;
use regex::Regex;

// Boundaries between words: separators, or a lower/digit followed by an upper
static WORD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])|([A-Z]+)([A-Z][a-z])").unwrap());

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// Local part of a possibly prefixed name
pub fn local_part(qname: &str) -> &str {
    split_qname(qname).1
}

fn words(name: &str) -> Vec<String> {
    let spaced = CAMEL_BOUNDARY.replace_all(name, "${1}${3} ${2}${4}");
    WORD_SEPARATOR
        .split(&spaced)
        .flat_map(|part| part.split(' '))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// Convert a schema name into a PascalCase class name
pub fn to_pascal_case(name: &str) -> String {
    let mut out: String = words(name)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Convert a schema name into a snake_case field name
pub fn to_snake_case(name: &str) -> String {
    let mut out = words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
