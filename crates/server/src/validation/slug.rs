/// Derive a URL-safe slug from a display name.
///
/// Non-ASCII letters are transliterated to ASCII first ("Gruyère" becomes
/// "gruyere"). Letters are lowercased, characters other than letters,
/// digits, whitespace, `-` and `_` are dropped, runs of whitespace and
/// hyphens collapse into a single `-`, and leading/trailing `-`/`_` are
/// trimmed.
pub fn slugify(name: &str) -> String {
    let mut builder = SlugBuilder::with_capacity(name.len());
    let mut buf = [0u8; 4];

    for ch in name.chars() {
        if ch.is_ascii() || ch.is_whitespace() {
            builder.push(ch);
        } else {
            // Yields lowercase ASCII alphanumerics joined by `-`.
            for folded in slug::slugify(ch.encode_utf8(&mut buf)).chars() {
                builder.push(folded);
            }
        }
    }

    builder.finish()
}

struct SlugBuilder {
    slug: String,
    pending_dash: bool,
}

impl SlugBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slug: String::with_capacity(capacity),
            pending_dash: false,
        }
    }

    fn push(&mut self, ch: char) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if self.pending_dash && !self.slug.is_empty() {
                self.slug.push('-');
            }
            self.pending_dash = false;
            self.slug.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch.is_whitespace() {
            self.pending_dash = true;
        }
    }

    fn finish(self) -> String {
        self.slug.trim_matches(|c| c == '-' || c == '_').to_string()
    }
}

/// Path slugs accept ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    let is_valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if is_valid {
        Ok(())
    } else {
        Err(format!("'{slug}' is not a valid slug"))
    }
}
