//! URL slug derivation from titles

/// Derive a URL-safe slug from a title.
///
/// Lower-cases the input, collapses every run of characters outside
/// `a-z0-9` into a single hyphen, and trims leading/trailing hyphens.
/// Applying it to its own output is a no-op.
///
/// # Example
///
/// ```rust
/// use plinth_document::derive_slug;
///
/// assert_eq!(derive_slug("Atomic Habits & Me!"), "atomic-habits-me");
/// ```
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_derivation() {
        assert_eq!(derive_slug("Hello World"), "hello-world");
        assert_eq!(derive_slug("Atomic Habits & Me!"), "atomic-habits-me");
    }

    #[test]
    fn test_trims_leading_and_trailing_separators() {
        assert_eq!(derive_slug("  --Hello--  "), "hello");
        assert_eq!(derive_slug("!!!"), "");
    }

    #[test]
    fn test_collapses_runs() {
        assert_eq!(derive_slug("a   b...c"), "a-b-c");
    }

    #[test]
    fn test_keeps_digits() {
        assert_eq!(derive_slug("Top 10 Posts of 2025"), "top-10-posts-of-2025");
    }

    #[test]
    fn test_idempotent() {
        for title in ["Hello World", "Atomic Habits & Me!", "a   b...c", ""] {
            let once = derive_slug(title);
            assert_eq!(derive_slug(&once), once);
        }
    }

    #[test]
    fn test_non_ascii_becomes_separator() {
        assert_eq!(derive_slug("café crème"), "caf-cr-me");
    }
}
