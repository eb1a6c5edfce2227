//! URL slug derivation and collision disambiguation.

/// Derive a URL slug from a store name: lowercase ASCII alphanumerics,
/// hyphen-separated, no leading or trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Disambiguate `base` against slugs already taken.
///
/// Counts existing slugs of the form `base` or `base-N` and, on collision,
/// appends `-{count + 1}` — so the second "coffee-bar" becomes
/// "coffee-bar-2", the third "coffee-bar-3", and so on.
pub fn disambiguate_slug(base: &str, taken: &[String]) -> String {
    let conflicts = taken
        .iter()
        .filter(|slug| {
            slug.as_str() == base
                || slug
                    .strip_prefix(base)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        })
        .count();

    if conflicts == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, conflicts + 1)
    }
}
