//! Filename extraction from URL path.

/// The final segment of the URL path, as in `https://host/a/b/file.iso` → `file.iso`.
///
/// Returns `None` if the URL cannot be parsed or the final segment is empty
/// (root path, trailing slash).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
