//! URL helpers for loading static resources
//!
//! The catalog JSON is served next to the page, so paths are resolved
//! against the current window origin rather than a separate API host.

/// Get the origin of the current page
///
/// # Returns
/// - Origin like "http://localhost:8080"
/// - Empty string if window is not available (relative URLs still work then)
pub fn origin() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full URL for a resource path
///
/// Absolute URLs are returned unchanged.
///
/// # Example
/// ```rust,ignore
/// let url = resource_url("/sample-data.json");
/// ```
pub fn resource_url(path: &str) -> String {
    join_url(&origin(), path)
}

fn join_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}
