//! Identifier validation and host-facing name derivation

/// Check that `name` is a well-formed fully-qualified class name.
///
/// Class names are dotted paths. Every segment must start with an
/// ASCII letter and continue with ASCII alphanumerics or underscores.
pub fn is_valid_class_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_valid_segment)
}

/// Check that `name` is a well-formed member (field or method) name.
///
/// Member names are single segments; a leading underscore is allowed.
pub fn is_valid_member_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Derive the host-facing snake_case spelling of a declared name.
///
/// `getName` becomes `get_name` and `HTTPServer` becomes
/// `http_server`. Existing underscores are preserved and never
/// doubled, so already-snake_case names pass through unchanged.
pub fn host_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }

        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();

        // Break before an uppercase run boundary: after a lowercase or
        // digit, or where an acronym run ends (`HTTPServer` at the S)
        let after_lower = matches!(prev, Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit());
        let acronym_end = matches!(prev, Some(p) if p.is_ascii_uppercase())
            && matches!(next, Some(n) if n.is_ascii_lowercase());

        if (after_lower || acronym_end) && !out.ends_with('_') {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}
