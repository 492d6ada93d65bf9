//! Title slugification for note filenames.

use deunicode::deunicode;

/// Convert a note title to a filename-safe slug.
///
/// Transliterates to ASCII, lowercases, folds every run of non-alphanumeric
/// characters into a single `-`, and trims separators from both ends.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}
