//! Linux-safe filename sanitization.

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

fn is_unsafe(c: char) -> bool {
    matches!(c, '\0' | '/' | '\\' | ' ' | '\t') || c.is_control()
}

/// Makes a URL path segment safe to use as a local filename.
///
/// Path separators, NUL, whitespace and control characters become `_` (runs
/// collapse to one), leading/trailing dots and underscores are dropped, and
/// the result is cut to 255 bytes on a char boundary. May return an empty
/// string; callers pick a fallback.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().map(|c| if is_unsafe(c) { '_' } else { c }) {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators() {
        assert_eq!(sanitize_filename_for_linux("a/b\\c.txt"), "a_b_c.txt");
    }

    #[test]
    fn trims_dots_and_spaces() {
        assert_eq!(sanitize_filename_for_linux("  ..  file.txt  ..  "), "file.txt");
        assert_eq!(sanitize_filename_for_linux("..."), "");
    }

    #[test]
    fn collapses_runs() {
        assert_eq!(sanitize_filename_for_linux("file \t\x01name.txt"), "file_name.txt");
    }

    #[test]
    fn keeps_percent_escapes_and_unicode() {
        assert_eq!(sanitize_filename_for_linux("r%C3%A9sum%C3%A9.pdf"), "r%C3%A9sum%C3%A9.pdf");
        assert_eq!(sanitize_filename_for_linux("résumé.pdf"), "résumé.pdf");
    }

    #[test]
    fn caps_length_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_filename_for_linux(&long);
        assert!(out.len() <= NAME_MAX);
        assert_eq!(out.len(), 254);
    }
}
