/// Derives a URL slug from a title: lowercase, alphanumeric runs joined by
/// single hyphens. Uniqueness is enforced against storage at creation.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Nutrition in the First Trimester"), "nutrition-in-the-first-trimester");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(slugify("Sleep, Rest & Recovery!"), "sleep-rest-recovery");
    }

    #[test]
    fn test_leading_and_trailing_separators_trimmed() {
        assert_eq!(slugify("  What to pack?  "), "what-to-pack");
    }

    #[test]
    fn test_numbers_kept() {
        assert_eq!(slugify("Week 20 Scan"), "week-20-scan");
    }

    #[test]
    fn test_empty_title_gives_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }
}
