//! URL slug derivation for group names

/// Derive a URL slug from a display name.
///
/// Lowercases ASCII, collapses every run of non-alphanumeric characters to
/// a single `-`, and trims leading/trailing dashes. Two names that differ
/// only in punctuation or case produce the same slug, which is why slug
/// uniqueness is checked when groups are created or renamed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Rocket Fans"), "rocket-fans");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("Rocket  Fans!"), "rocket-fans");
        assert_eq!(slugify("a -- b"), "a-b");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(slugify("  Rust!  "), "rust");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_case_insensitive_collision() {
        assert_eq!(slugify("My Group"), slugify("my group"));
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("café corner"), "caf-corner");
    }
}
